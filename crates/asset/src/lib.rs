//! Asset loading/parsers.
//! OBJ ingestion: text records -> attribute store -> faces -> fan triangles
//! -> deduplicated vertex buffer + u32 index buffer.

pub mod attributes;
pub mod batch;
pub mod face;
pub mod indexer;
pub mod mesh;
pub mod obj;
pub mod tokenizer;
pub mod triangulate;

pub use corelib::{IngestError, IngestResult};
pub use mesh::{MeshData, MeshVertex};
pub use obj::{LoadOptions, ObjReader, load_obj_from_path, load_obj_from_reader, load_obj_from_str};
