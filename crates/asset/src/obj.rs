//! OBJ ingestion: positions, texture coordinates, normals and polygon faces.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use corelib::{IngestError, IngestResult, Vec2, Vec3};

use crate::{
    attributes::AttributeStore,
    face::assemble_face,
    indexer::build_indexed_mesh,
    mesh::{MeshData, MeshVertex},
    tokenizer::{Record, parse_record},
    triangulate::{Triangle, triangulate_fan},
};

/// Loader knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accept negative corner indices (`-1` = last declared entry).
    pub allow_relative_indices: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            allow_relative_indices: true,
        }
    }
}

/// Result of one ingestion run: the raw attribute arrays as read from the
/// file plus the deduplicated vertex and index buffers.
///
/// Each reader is built from scratch; nothing is shared between runs.
#[derive(Clone, Debug)]
pub struct ObjReader {
    file_name: Option<PathBuf>,
    attributes: AttributeStore,
    mesh: MeshData,
}

impl ObjReader {
    /// Open and ingest the file at `path`.
    pub fn from_path(path: impl AsRef<Path>, options: LoadOptions) -> IngestResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Reading OBJ file {}", path.display());
        let mut reader = Self::from_reader(BufReader::new(file), options)?;
        reader.file_name = Some(path.to_path_buf());
        Ok(reader)
    }

    /// Ingest from any [`BufRead`] source.
    pub fn from_reader<R: BufRead>(reader: R, options: LoadOptions) -> IngestResult<Self> {
        let mut attributes = AttributeStore::new();
        let mut triangles: Vec<Triangle> = Vec::new();
        let mut face_count = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| IngestError::Io {
                line: line_no,
                source,
            })?;

            match parse_record(&line, line_no)? {
                Some(Record::Position(p)) => attributes.push_position(p),
                Some(Record::TexCoord(t)) => attributes.push_tex_coord(t),
                Some(Record::Normal(n)) => attributes.push_normal(n),
                Some(Record::Face(tokens)) => {
                    let face = assemble_face(
                        &tokens,
                        line_no,
                        attributes.counts(),
                        options.allow_relative_indices,
                    )?;
                    triangles.extend(triangulate_fan(&face)?);
                    face_count += 1;
                }
                None => {}
            }
        }

        let counts = attributes.counts();
        log::debug!(
            "Parsed {} positions, {} texture coordinates, {} normals, {} faces -> {} triangles",
            counts.positions,
            counts.tex_coords,
            counts.normals,
            face_count,
            triangles.len()
        );

        let mesh = build_indexed_mesh(&attributes, &triangles)?;

        Ok(Self {
            file_name: None,
            attributes,
            mesh,
        })
    }

    /// Ingest an in-memory OBJ document.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str, options: LoadOptions) -> IngestResult<Self> {
        Self::from_reader(io::Cursor::new(contents), options)
    }

    /// Source path, if the mesh was loaded from a file.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn positions(&self) -> &[Vec3] {
        self.attributes.positions()
    }

    pub fn texture_coordinates(&self) -> &[Vec2] {
        self.attributes.tex_coords()
    }

    pub fn normals(&self) -> &[Vec3] {
        self.attributes.normals()
    }

    /// Unique realized vertices in first-occurrence order.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.mesh.vertices
    }

    /// Three entries per triangle, each indexing [`Self::vertices`].
    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn into_mesh(self) -> MeshData {
        self.mesh
    }
}

/// Ingest `path` with default options and keep only the buffers.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> IngestResult<MeshData> {
    ObjReader::from_path(path, LoadOptions::default()).map(ObjReader::into_mesh)
}

/// [`load_obj_from_path`] for an already opened source.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> IngestResult<MeshData> {
    ObjReader::from_reader(reader, LoadOptions::default()).map(ObjReader::into_mesh)
}

/// [`load_obj_from_path`] for OBJ text held in memory.
pub fn load_obj_from_str(contents: &str) -> IngestResult<MeshData> {
    ObjReader::from_str(contents, LoadOptions::default()).map(ObjReader::into_mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::AttributeKind;

    #[test]
    fn corners_realize_declared_values() {
        let src = "\
v 0.5 -1.0 2.0
v 1.5 0.0 0.0
v 0.0 3.25 0.0
vt 0.125 0.875
vn 0.0 1.0 0.0
f 1/1/1 2//1 3/1
";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(
            mesh.vertices,
            vec![
                MeshVertex::new([0.5, -1.0, 2.0], [0.125, 0.875], [0.0, 1.0, 0.0]),
                MeshVertex::new([1.5, 0.0, 0.0], [0.0, 0.0], [0.0, 1.0, 0.0]),
                MeshVertex::new([0.0, 3.25, 0.0], [0.125, 0.875], [0.0, 0.0, 0.0]),
            ]
        );
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn quad_with_full_triplets() {
        let src = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";
        let reader = ObjReader::from_str(src, LoadOptions::default()).unwrap();
        assert_eq!(reader.vertices().len(), 4);
        assert_eq!(reader.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(reader.positions().len(), 4);
        assert_eq!(reader.texture_coordinates().len(), 4);
        assert_eq!(reader.normals().len(), 1);
        assert_eq!(reader.file_name(), None);
    }

    #[test]
    fn repeated_triplet_across_faces_is_shared() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn relative_indices_resolve_at_declaration_point() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
v 5 5 5
f 1 2 -1
";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 1, 3]);
        assert_eq!(mesh.vertices[3].position, [5.0, 5.0, 5.0]);

        let strict = LoadOptions {
            allow_relative_indices: false,
        };
        let err = ObjReader::from_str(src, strict).unwrap_err();
        assert!(matches!(err, IngestError::MalformedFaceCorner { line: 4, .. }));
    }

    #[test]
    fn errors_report_source_line() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert!(matches!(
            err,
            IngestError::AttributeIndexOutOfRange {
                line: 4,
                kind: AttributeKind::Position,
                index: 9,
                len: 3
            }
        ));
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"v 0 0 0\n\xff\xfe\n";
        let err = load_obj_from_reader(bytes).unwrap_err();
        assert!(matches!(err, IngestError::Io { line: 2, .. }));
    }
}
