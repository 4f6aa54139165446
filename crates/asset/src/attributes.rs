//! Raw vertex attributes in file-declaration order.
//!
//! Face corners reference these positionally with 1-based ordinals, so the
//! store never reorders or drops entries.

use corelib::{Vec2, Vec3};

/// Number of entries declared so far in each attribute array.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AttributeCounts {
    pub positions: usize,
    pub tex_coords: usize,
    pub normals: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeStore {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&mut self, position: Vec3) {
        self.positions.push(position);
    }

    pub fn push_tex_coord(&mut self, tex_coord: Vec2) {
        self.tex_coords.push(tex_coord);
    }

    pub fn push_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn counts(&self) -> AttributeCounts {
        AttributeCounts {
            positions: self.positions.len(),
            tex_coords: self.tex_coords.len(),
            normals: self.normals.len(),
        }
    }

    /// Position for a 1-based ordinal; `None` for 0 or past the end.
    #[inline]
    pub fn position(&self, ordinal: u32) -> Option<Vec3> {
        fetch(&self.positions, ordinal)
    }

    #[inline]
    pub fn tex_coord(&self, ordinal: u32) -> Option<Vec2> {
        fetch(&self.tex_coords, ordinal)
    }

    #[inline]
    pub fn normal(&self, ordinal: u32) -> Option<Vec3> {
        fetch(&self.normals, ordinal)
    }
}

fn fetch<T: Copy>(items: &[T], ordinal: u32) -> Option<T> {
    let index = usize::try_from(ordinal.checked_sub(1)?).ok()?;
    items.get(index).copied()
}
