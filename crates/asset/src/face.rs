//! Face corner parsing: `p`, `p/t`, `p//n` and `p/t/n` tokens.

use corelib::{AttributeKind, IngestError, IngestResult};

use crate::attributes::AttributeCounts;

/// Unresolved reference from one face corner into the attribute store.
///
/// Ordinals are 1-based and absolute (relative indices are already
/// resolved). Texture and normal are `None` when the corner omits them,
/// which is distinct from an explicit (invalid) ordinal of 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CornerRef {
    pub position: u32,
    pub tex_coord: Option<u32>,
    pub normal: Option<u32>,
}

impl CornerRef {
    pub fn new(position: u32, tex_coord: Option<u32>, normal: Option<u32>) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

/// Polygon corners of one `f` record, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Source line of the record.
    pub line: usize,
    pub corners: Vec<CornerRef>,
}

/// Parse every corner token of a face record.
///
/// `counts` are the attribute counts declared before this record; they are
/// only consulted to resolve negative (relative) indices.
pub fn assemble_face(
    tokens: &[&str],
    line_no: usize,
    counts: AttributeCounts,
    allow_relative: bool,
) -> IngestResult<Face> {
    let corners = tokens
        .iter()
        .map(|token| parse_corner(token, line_no, counts, allow_relative))
        .collect::<IngestResult<Vec<_>>>()?;

    Ok(Face {
        line: line_no,
        corners,
    })
}

/// Parse one corner token into a [`CornerRef`].
pub fn parse_corner(
    token: &str,
    line_no: usize,
    counts: AttributeCounts,
    allow_relative: bool,
) -> IngestResult<CornerRef> {
    let malformed = || IngestError::MalformedFaceCorner {
        line: line_no,
        token: token.to_owned(),
    };

    let fields: Vec<&str> = token.split('/').collect();
    if fields.len() > 3 {
        return Err(malformed());
    }

    let resolve = |field: &str, kind: AttributeKind, len: usize| -> IngestResult<u32> {
        // OBJ indices are bare digits, optionally negated; `+1` is not one.
        if field.starts_with('+') {
            return Err(malformed());
        }
        let raw = field.parse::<i64>().map_err(|_| malformed())?;
        resolve_ordinal(raw, kind, len, line_no, allow_relative).ok_or_else(|| {
            if raw < 0 && !allow_relative {
                malformed()
            } else {
                IngestError::AttributeIndexOutOfRange {
                    line: line_no,
                    kind,
                    index: raw,
                    len,
                }
            }
        })
    };

    let position = match fields[0] {
        "" => return Err(malformed()),
        field => resolve(field, AttributeKind::Position, counts.positions)?,
    };

    let tex_coord = match fields.get(1) {
        Some(field) if !field.is_empty() => {
            Some(resolve(field, AttributeKind::TexCoord, counts.tex_coords)?)
        }
        _ => None,
    };

    let normal = match fields.get(2) {
        Some(field) if !field.is_empty() => {
            Some(resolve(field, AttributeKind::Normal, counts.normals)?)
        }
        _ => None,
    };

    Ok(CornerRef::new(position, tex_coord, normal))
}

/// Map a raw OBJ index onto a 1-based absolute ordinal.
///
/// Positive values pass through unchanged (including 0; bounds are checked
/// when the vertex is realized). Negative values count back from the most
/// recently declared entry.
fn resolve_ordinal(
    raw: i64,
    kind: AttributeKind,
    len: usize,
    line_no: usize,
    allow_relative: bool,
) -> Option<u32> {
    if raw >= 0 {
        return u32::try_from(raw).ok();
    }
    if !allow_relative {
        return None;
    }

    let absolute = i64::try_from(len).ok()? + raw + 1;
    if absolute < 1 {
        return None;
    }
    log::trace!(
        "Line {}: relative {} index {} resolved to {}",
        line_no,
        kind,
        raw,
        absolute
    );
    u32::try_from(absolute).ok()
}
