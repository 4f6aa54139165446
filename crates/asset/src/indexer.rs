//! Vertex deduplication: realizes triangle corners against the attribute
//! store and assigns each distinct vertex value a sequential `u32` id.
//!
//! Equality is exact float equality of all eight components. Values parsed
//! from the same decimal text always collapse; values produced by
//! arithmetic (procedural or transformed meshes) may differ in the last bit
//! and will then stay separate.

use std::collections::HashMap;

use corelib::{AttributeKind, IngestError, IngestResult, Vec2, Vec3};

use crate::{
    attributes::AttributeStore,
    face::CornerRef,
    mesh::{MeshData, MeshVertex},
    triangulate::Triangle,
};

/// Hashable exact-equality key for a [`MeshVertex`].
///
/// Uses the IEEE bit pattern with `-0.0` folded onto `0.0`, so two keys are
/// equal exactly when the float components compare equal (the tokenizer
/// rejects NaN).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct VertexKey([u32; 8]);

impl VertexKey {
    fn of(v: &MeshVertex) -> Self {
        let [px, py, pz] = v.position;
        let [u, tv] = v.tex_coord;
        let [nx, ny, nz] = v.normal;
        Self([px, py, pz, u, tv, nx, ny, nz].map(canonical_bits))
    }
}

#[inline]
fn canonical_bits(value: f32) -> u32 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Builds the vertex and index buffers from a triangle stream.
#[derive(Debug, Default)]
pub struct VertexIndexer {
    unique: HashMap<VertexKey, u32>,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl VertexIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a corner into its realized vertex. Absent texture/normal
    /// references yield zero values; present ones must be in range.
    pub fn realize(store: &AttributeStore, corner: &CornerRef, line: usize) -> IngestResult<MeshVertex> {
        let out_of_range = |kind: AttributeKind, index: u32, len: usize| {
            IngestError::AttributeIndexOutOfRange {
                line,
                kind,
                index: i64::from(index),
                len,
            }
        };

        let position = store.position(corner.position).ok_or_else(|| {
            out_of_range(AttributeKind::Position, corner.position, store.positions().len())
        })?;

        let tex_coord = match corner.tex_coord {
            Some(t) => store.tex_coord(t).ok_or_else(|| {
                out_of_range(AttributeKind::TexCoord, t, store.tex_coords().len())
            })?,
            None => Vec2::ZERO,
        };

        let normal = match corner.normal {
            Some(n) => store
                .normal(n)
                .ok_or_else(|| out_of_range(AttributeKind::Normal, n, store.normals().len()))?,
            None => Vec3::ZERO,
        };

        Ok(MeshVertex::new(
            position.to_array(),
            tex_coord.to_array(),
            normal.to_array(),
        ))
    }

    /// Append one index per triangle corner, inserting unseen vertices in
    /// first-occurrence order.
    pub fn push_triangle(&mut self, store: &AttributeStore, triangle: &Triangle) -> IngestResult<()> {
        for corner in &triangle.corners {
            let vertex = Self::realize(store, corner, triangle.line)?;
            let index = self.insert(vertex)?;
            self.indices.push(index);
        }
        Ok(())
    }

    fn insert(&mut self, vertex: MeshVertex) -> IngestResult<u32> {
        let key = VertexKey::of(&vertex);
        if let Some(&idx) = self.unique.get(&key) {
            return Ok(idx);
        }

        let idx = u32::try_from(self.vertices.len()).map_err(|_| IngestError::IndexOverflow)?;
        self.vertices.push(vertex);
        self.unique.insert(key, idx);
        Ok(idx)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Hand out the finished buffers, or [`IngestError::EmptyMesh`] if no
    /// triangle was pushed.
    pub fn finish(self) -> IngestResult<MeshData> {
        if self.indices.is_empty() {
            return Err(IngestError::EmptyMesh);
        }
        debug_assert_eq!(self.indices.len() % 3, 0);
        Ok(MeshData::new(self.vertices, self.indices))
    }
}

/// Index a full triangle stream in one go.
pub fn build_indexed_mesh(store: &AttributeStore, triangles: &[Triangle]) -> IngestResult<MeshData> {
    let mut indexer = VertexIndexer::new();
    for triangle in triangles {
        indexer.push_triangle(store, triangle)?;
    }
    log::debug!(
        "Indexed {} corners into {} unique vertices",
        indexer.index_count(),
        indexer.vertex_count()
    );
    indexer.finish()
}
