//! Input reader: `x1 y1 x2 y2` records, one per line.
//!
//! Blank lines and lines starting with `#` are skipped. Anything else must be
//! exactly four whitespace-separated integers.

use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::geom::Segment;

/// Parses one record. `line` is 1-based and only used for error context.
pub fn parse_record(text: &str, line: usize) -> Result<Segment, InputError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(InputError::FieldCount {
            line,
            found: tokens.len(),
        });
    }
    let mut v = [0i64; 4];
    for (slot, tok) in v.iter_mut().zip(&tokens) {
        *slot = tok.parse().map_err(|source| InputError::BadNumber {
            line,
            token: (*tok).to_string(),
            source,
        })?;
    }
    Ok(Segment::from((v[0], v[1], v[2], v[3])))
}

/// Parses a whole document; segments keep input order.
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, InputError> {
    let mut out = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push(parse_record(trimmed, i + 1)?);
    }
    Ok(out)
}

/// Reads and parses a segment file. Errors carry the path.
pub fn read_segments(path: &Path) -> Result<Vec<Segment>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let segments = parse_segments(&text).map_err(|e| InputError::InFile {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    tracing::debug!(path = %path.display(), segments = segments.len(), "read segments");
    Ok(segments)
}

/// Serializes segments back into the record format.
pub fn format_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for s in segments {
        out.push_str(&format!("{} {} {} {}\n", s.a.x, s.a.y, s.b.x, s.b.y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn skips_blanks_and_comments() {
        let text = "# header\n\n0 0 1 0\n   \n  # indented comment\n1 0 -2 7\n";
        let segs = parse_segments(text).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].b, Point::new(-2, 7));
    }

    #[test]
    fn reports_line_of_bad_record() {
        let err = parse_segments("0 0 1 0\n0 0 1\n").unwrap_err();
        assert!(matches!(err, InputError::FieldCount { line: 2, found: 3 }));

        let err = parse_segments("\n0 0 x 1\n").unwrap_err();
        match err {
            InputError::BadNumber { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
        // Decimals are not lattice coordinates.
        assert!(parse_record("0 0 1.5 2", 1).is_err());
    }

    #[test]
    fn format_parses_back() {
        let segs = vec![Segment::from((0, 0, 3, 4)), Segment::from((-1, 2, 2, -1))];
        assert_eq!(parse_segments(&format_segments(&segs)).unwrap(), segs);
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_segments(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
        assert_eq!(err.line(), None);
    }
}
