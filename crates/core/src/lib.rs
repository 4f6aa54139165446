//! Core shared types and errors (renderer-agnostic).

use std::{io, path::PathBuf};

pub use glam::{Vec2, Vec3, vec2, vec3};
use thiserror::Error;

/// Which attribute store a face corner reference points into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl AttributeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single mesh ingestion run. Every variant aborts the run;
/// no partially built buffers are handed out alongside it.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open mesh file {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: '{keyword}' record ends before its {missing} component")]
    TruncatedRecord {
        line: usize,
        keyword: &'static str,
        missing: &'static str,
    },

    #[error("line {line}: '{token}' is not a valid {what}")]
    MalformedAttribute {
        line: usize,
        token: String,
        what: &'static str,
    },

    #[error("line {line}: malformed face corner '{token}'")]
    MalformedFaceCorner { line: usize, token: String },

    #[error("line {line}: face has {corners} corner(s), at least 3 are required")]
    DegenerateFace { line: usize, corners: usize },

    #[error("line {line}: {kind} index {index} is out of range (declared: {len})")]
    AttributeIndexOutOfRange {
        line: usize,
        kind: AttributeKind,
        index: i64,
        len: usize,
    },

    #[error("mesh contains no triangles")]
    EmptyMesh,

    #[error("mesh has more unique vertices than a 32-bit index buffer can address")]
    IndexOverflow,
}

pub type IngestResult<T> = Result<T, IngestError>;
