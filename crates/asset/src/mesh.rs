//! CPU-side mesh representation produced by the OBJ loader.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Component layout of one vertex attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
}

impl VertexFormat {
    pub const fn size(self) -> usize {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
        }
    }
}

/// Where an attribute lives inside [`MeshVertex`] and which shader
/// location it binds to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub offset: usize,
    pub format: VertexFormat,
}

/// Realized vertex: dereferenced position/uv/normal. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub const STRIDE: usize = size_of::<MeshVertex>();

    /// Locations 0/1/2 = position/tex_coord/normal.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            offset: offset_of!(MeshVertex, position),
            format: VertexFormat::Float32x3,
        },
        VertexAttribute {
            location: 1,
            offset: offset_of!(MeshVertex, tex_coord),
            format: VertexFormat::Float32x2,
        },
        VertexAttribute {
            location: 2,
            offset: offset_of!(MeshVertex, normal),
            format: VertexFormat::Float32x3,
        },
    ];

    pub fn new(position: [f32; 3], tex_coord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty, the index count is a
    /// multiple of 3 and every index addresses a vertex.
    pub fn is_valid(&self) -> bool {
        let len = self.vertices.len();
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < len)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes, ready for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0, 0, 0]);
        assert!(data.is_valid());
        assert_eq!(data.triangle_count(), 1);

        let dangling = MeshData::new(vec![MeshVertex::default()], vec![0, 1, 0]);
        assert!(!dangling.is_valid());

        let partial = MeshData::new(vec![MeshVertex::default()], vec![0, 0]);
        assert!(!partial.is_valid());
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(MeshVertex::STRIDE, 32);
        let offsets: Vec<usize> = MeshVertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);

        let total: usize = MeshVertex::ATTRIBUTES.iter().map(|a| a.format.size()).sum();
        assert_eq!(total, MeshVertex::STRIDE);
    }

    #[test]
    fn byte_views_match_buffer_sizes() {
        let data = MeshData::new(
            vec![MeshVertex::new([1.0, 2.0, 3.0], [0.5, 0.5], [0.0, 0.0, 1.0]); 2],
            vec![0, 1, 0],
        );
        assert_eq!(data.vertex_bytes().len(), 2 * MeshVertex::STRIDE);
        assert_eq!(data.index_bytes().len(), 3 * 4);
        assert_eq!(&data.vertex_bytes()[..4], &1.0f32.to_ne_bytes());
    }
}
