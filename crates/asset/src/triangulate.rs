//! Fan triangulation of polygon faces.
//!
//! Corner 0 is the shared apex: triangle `k` is `(0, k, k + 1)`. This is
//! only correct for convex planar polygons; concave or non-planar faces are
//! split the same way without any geometric check.

use corelib::{IngestError, IngestResult};

use crate::face::{CornerRef, Face};

/// Three corners of one emitted triangle, winding as in the source face.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Triangle {
    /// Source line of the face this triangle came from.
    pub line: usize,
    pub corners: [CornerRef; 3],
}

/// Split `face` into `n - 2` triangles sharing corner 0.
pub fn triangulate_fan(face: &Face) -> IngestResult<Vec<Triangle>> {
    let corners = &face.corners;
    if corners.len() < 3 {
        return Err(IngestError::DegenerateFace {
            line: face.line,
            corners: corners.len(),
        });
    }

    let apex = corners[0];
    let triangles = corners[1..]
        .windows(2)
        .map(|edge| Triangle {
            line: face.line,
            corners: [apex, edge[0], edge[1]],
        })
        .collect();

    Ok(triangles)
}
