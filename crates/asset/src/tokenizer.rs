//! Line tokenizer for OBJ text: turns one source line into a typed record.

use corelib::{IngestError, IngestResult, Vec2, Vec3, vec2, vec3};

/// One recognised OBJ record. Face corners borrow from the source line.
#[derive(Clone, Debug, PartialEq)]
pub enum Record<'a> {
    Position(Vec3),
    TexCoord(Vec2),
    Normal(Vec3),
    Face(Vec<&'a str>),
}

/// Parse a single line (`line_no` is 1-based, used for diagnostics).
///
/// Returns `Ok(None)` for blank lines, comments and keywords this pipeline
/// does not consume (`o`, `g`, `s`, `usemtl`, `mtllib`, ...).
pub fn parse_record(line: &str, line_no: usize) -> IngestResult<Option<Record<'_>>> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };

    let mut parts = content.split_whitespace();
    let Some(tag) = parts.next() else {
        return Ok(None);
    };

    let record = match tag {
        "v" => {
            let x = parse_f32(parts.next(), line_no, "v", "x coordinate")?;
            let y = parse_f32(parts.next(), line_no, "v", "y coordinate")?;
            let z = parse_f32(parts.next(), line_no, "v", "z coordinate")?;
            Record::Position(vec3(x, y, z))
        }
        "vt" => {
            let u = parse_f32(parts.next(), line_no, "vt", "u coordinate")?;
            let v = parse_f32(parts.next(), line_no, "vt", "v coordinate")?;
            Record::TexCoord(vec2(u, v))
        }
        "vn" => {
            let nx = parse_f32(parts.next(), line_no, "vn", "nx coordinate")?;
            let ny = parse_f32(parts.next(), line_no, "vn", "ny coordinate")?;
            let nz = parse_f32(parts.next(), line_no, "vn", "nz coordinate")?;
            Record::Normal(vec3(nx, ny, nz))
        }
        "f" => Record::Face(parts.collect()),
        _ => {
            log::trace!("Skipping '{}' record on line {}", tag, line_no);
            return Ok(None);
        }
    };

    Ok(Some(record))
}

fn parse_f32(
    value: Option<&str>,
    line_no: usize,
    keyword: &'static str,
    what: &'static str,
) -> IngestResult<f32> {
    let token = value.ok_or(IngestError::TruncatedRecord {
        line: line_no,
        keyword,
        missing: what,
    })?;

    // Non-finite values would break exact-equality deduplication.
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IngestError::MalformedAttribute {
            line: line_no,
            token: token.to_owned(),
            what,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_records() {
        assert_eq!(
            parse_record("v 1.0 -2.5 3e1", 1).unwrap(),
            Some(Record::Position(vec3(1.0, -2.5, 30.0)))
        );
        assert_eq!(
            parse_record("vt 0.25 0.75", 2).unwrap(),
            Some(Record::TexCoord(vec2(0.25, 0.75)))
        );
        assert_eq!(
            parse_record("vn 0 0 1", 3).unwrap(),
            Some(Record::Normal(vec3(0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(
            parse_record("  v\t1   2 \t 3  ", 1).unwrap(),
            Some(Record::Position(vec3(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            parse_record("f  1/1/1   2/2/1\t3/3/1 ", 1).unwrap(),
            Some(Record::Face(vec!["1/1/1", "2/2/1", "3/3/1"]))
        );
    }

    #[test]
    fn extra_components_are_ignored() {
        assert_eq!(
            parse_record("v 1 2 3 1.0", 1).unwrap(),
            Some(Record::Position(vec3(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            parse_record("vt 0.5 0.5 0.0", 1).unwrap(),
            Some(Record::TexCoord(vec2(0.5, 0.5)))
        );
    }

    #[test]
    fn comments_and_unknown_keywords_are_skipped() {
        assert_eq!(parse_record("", 1).unwrap(), None);
        assert_eq!(parse_record("   ", 1).unwrap(), None);
        assert_eq!(parse_record("# exported by a tool", 1).unwrap(), None);
        assert_eq!(parse_record("usemtl Material.001", 1).unwrap(), None);
        assert_eq!(parse_record("s off", 1).unwrap(), None);
        assert_eq!(
            parse_record("v 1 2 3 # trailing note", 1).unwrap(),
            Some(Record::Position(vec3(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn missing_component_is_truncated() {
        let err = parse_record("v 1.0 2.0", 4).unwrap_err();
        assert!(matches!(
            err,
            IngestError::TruncatedRecord {
                line: 4,
                keyword: "v",
                missing: "z coordinate"
            }
        ));

        let err = parse_record("vt", 5).unwrap_err();
        assert!(matches!(err, IngestError::TruncatedRecord { line: 5, .. }));
    }

    #[test]
    fn non_numeric_component_is_malformed() {
        let err = parse_record("vn 0 up 1", 9).unwrap_err();
        match err {
            IngestError::MalformedAttribute { line, token, what } => {
                assert_eq!(line, 9);
                assert_eq!(token, "up");
                assert_eq!(what, "ny coordinate");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_component_is_malformed() {
        assert!(matches!(
            parse_record("v nan 0 0", 1),
            Err(IngestError::MalformedAttribute { .. })
        ));
        assert!(matches!(
            parse_record("v 0 inf 0", 1),
            Err(IngestError::MalformedAttribute { .. })
        ));
    }
}
