//! Catalog Loader
//!
//! Reads `name,currentRank,highestRank,state,tags,website` rows after a
//! header line. Fields may be double-quoted to embed commas; `""` inside a
//! quoted field is a literal quote.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::university::University;

/// Fields per catalog row.
pub const FIELD_COUNT: usize = 6;

/// Catalog loading errors. Any error means no catalog at all.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying read failed.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// A rank column did not hold a positive integer.
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidRank {
        /// 1-based line number in the source.
        line: usize,
        /// Column name.
        field: &'static str,
        /// Offending text.
        value: String,
    },

    /// No usable rows.
    #[error("catalog contains no universities")]
    Empty,
}

/// Split one line on commas that sit outside double quotes.
///
/// Enclosing quotes are removed and every field is trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn parse_rank(value: &str, line: usize, field: &'static str) -> Result<u32, CatalogError> {
    match value.parse::<u32>() {
        Ok(rank) if rank > 0 => Ok(rank),
        _ => Err(CatalogError::InvalidRank {
            line,
            field,
            value: value.to_string(),
        }),
    }
}

/// Parse a single data row. `Ok(None)` means the row is short and skipped.
pub fn parse_row(line: &str, line_no: usize) -> Result<Option<University>, CatalogError> {
    let fields = split_fields(line);
    if fields.len() < FIELD_COUNT {
        debug!("Skipping line {}: {} fields", line_no, fields.len());
        return Ok(None);
    }

    let current_rank = parse_rank(&fields[1], line_no, "current rank")?;
    let highest_rank = parse_rank(&fields[2], line_no, "highest rank")?;

    Ok(Some(University::new(
        fields[0].as_str(),
        current_rank,
        highest_rank,
        fields[3].as_str(),
        fields[4].as_str(),
        fields[5].as_str(),
    )))
}

/// Read every row from a buffered source. The first line is the header.
pub fn read_universities<R: BufRead>(reader: R) -> Result<Vec<University>, CatalogError> {
    let mut universities = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue;
        }
        if let Some(university) = parse_row(&line, idx + 1)? {
            universities.push(university);
        }
    }

    if universities.is_empty() {
        return Err(CatalogError::Empty);
    }

    Ok(universities)
}

/// Open and read a catalog file.
pub fn read_file(path: &Path) -> Result<Vec<University>, CatalogError> {
    let file = File::open(path)?;
    read_universities(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,currentRank,highestRank,state,tags,website\n";

    #[test]
    fn test_split_plain() {
        let fields = split_fields("A, 1 ,2,CA,Public;Large,https://a.edu");
        assert_eq!(fields, vec!["A", "1", "2", "CA", "Public;Large", "https://a.edu"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        let fields = split_fields(r#""University of California, Berkeley",15,4,CA,"Public;Research",https://berkeley.edu"#);
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], "University of California, Berkeley");
        assert_eq!(fields[4], "Public;Research");
    }

    #[test]
    fn test_split_escaped_quote() {
        let fields = split_fields(r#""The ""Big"" One",1"#);
        assert_eq!(fields, vec![r#"The "Big" One"#, "1"]);
    }

    #[test]
    fn test_short_rows_skipped() {
        let source = format!("{HEADER}A,1,1,CA,Public,https://a.edu\n\nB,2,2\nC,3,3,NY,Private,https://c.edu\n");
        let list = read_universities(source.as_bytes()).unwrap();
        let names: Vec<&str> = list.iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let source = format!("{HEADER}A,1,1,CA,Public,https://a.edu,extra\n");
        let list = read_universities(source.as_bytes()).unwrap();
        assert_eq!(list[0].website(), "https://a.edu");
    }

    #[test]
    fn test_bad_rank_fails_whole_load() {
        let source = format!("{HEADER}A,1,1,CA,Public,https://a.edu\nB,two,2,NY,Private,https://b.edu\n");
        let err = read_universities(source.as_bytes()).unwrap_err();
        match err {
            CatalogError::InvalidRank { line, field, value } => {
                assert_eq!(line, 3);
                assert_eq!(field, "current rank");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_rank_rejected() {
        let source = format!("{HEADER}A,1,0,CA,Public,https://a.edu\n");
        assert!(matches!(
            read_universities(source.as_bytes()),
            Err(CatalogError::InvalidRank { field: "highest rank", .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            read_universities(HEADER.as_bytes()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
