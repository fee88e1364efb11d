//! Sample file parsing
//!
//! Accepted layouts, all of which may be mixed within one file:
//!
//! ```text
//! 0.12            one value per line
//! 0.15 0.18       whitespace separated
//! 0.20, 0.22,     comma separated, trailing comma allowed
//! [0.1, 0.2]      a single bracketed list
//! ```
//!
//! Blank lines and trailing whitespace are ignored. The first token that is
//! not a finite number aborts parsing with its 1-based line number.

use std::fs;
use std::io;
use std::path::Path;

use super::series::SampleSeries;
use crate::error::{EcgGraphError, Result};

impl SampleSeries {
    /// Parse samples from text
    ///
    /// # Errors
    ///
    /// - [`EcgGraphError::InvalidSample`] naming the line of the first bad token
    /// - [`EcgGraphError::EmptyInput`] if the text holds no tokens
    ///
    /// # Example
    ///
    /// ```rust
    /// use ecg_graph::signal::SampleSeries;
    ///
    /// let series = SampleSeries::parse("0.1\n0.5, -0.2\n\n").unwrap();
    /// assert_eq!(series.values(), &[0.1, 0.5, -0.2]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let body = strip_list_brackets(text);
        let mut values = Vec::new();

        for (line_idx, line) in body.lines().enumerate() {
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                values.push(parse_token(token, line_idx + 1)?);
            }
        }

        Self::new(values)
    }

    /// Read and parse a sample file
    ///
    /// # Errors
    ///
    /// - [`EcgGraphError::InputNotFound`] if `path` does not exist
    /// - [`EcgGraphError::InputRead`] if it exists but cannot be read as text
    /// - any error from [`SampleSeries::parse`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading ECG data from {}", path.display());

        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                EcgGraphError::InputNotFound { path: path.to_path_buf() }
            } else {
                EcgGraphError::InputRead { path: path.to_path_buf(), source }
            }
        })?;

        Self::parse(&text)
    }
}

/// Remove one surrounding `[` ... `]` pair, keeping line structure intact
fn strip_list_brackets(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return text.to_string();
    }

    // Both brackets are ASCII, so these are char boundaries
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len() - 1;

    let mut owned = text.to_string();
    owned.replace_range(end..end + 1, " ");
    owned.replace_range(start..start + 1, " ");
    owned
}

fn parse_token(token: &str, line: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EcgGraphError::InvalidSample { line, token: token.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_one_per_line() {
        let series = SampleSeries::parse("1.0\n2.0\n3.5\n").unwrap();
        assert_eq!(series.values(), &[1.0, 2.0, 3.5]);
    }

    #[test]
    fn test_parse_tolerates_blank_lines_and_trailing_whitespace() {
        let series = SampleSeries::parse("1.0   \n\n  2.0\t\n\n\n").unwrap();
        assert_eq!(series.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_parse_mixed_separators() {
        let series = SampleSeries::parse("0.1, 0.2 0.3,\n-0.4,0.5").unwrap();
        assert_eq!(series.values(), &[0.1, 0.2, 0.3, -0.4, 0.5]);
    }

    #[test]
    fn test_parse_bracketed_list() {
        let series = SampleSeries::parse("[0.1, 0.5, -0.2]\n").unwrap();
        assert_eq!(series.values(), &[0.1, 0.5, -0.2]);
    }

    #[test]
    fn test_parse_bracketed_list_keeps_line_numbers() {
        let err = SampleSeries::parse("[0.1,\n0.5,\nx]").unwrap_err();
        assert!(matches!(err, EcgGraphError::InvalidSample { line: 3, ref token } if token == "x"));
    }

    #[test]
    fn test_parse_reports_offending_line() {
        let err = SampleSeries::parse("1.0\nabc\n2.0").unwrap_err();
        match err {
            EcgGraphError::InvalidSample { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_nan_token() {
        let err = SampleSeries::parse("1.0 NaN").unwrap_err();
        assert!(matches!(err, EcgGraphError::InvalidSample { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(matches!(SampleSeries::parse(" \n\n"), Err(EcgGraphError::EmptyInput)));
        assert!(matches!(SampleSeries::parse("[]"), Err(EcgGraphError::EmptyInput)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.1\n0.2\n0.3").unwrap();
        let series = SampleSeries::from_file(file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = SampleSeries::from_file(&missing).unwrap_err();
        assert!(matches!(err, EcgGraphError::InputNotFound { path } if path == missing));
    }

    #[test]
    fn test_from_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SampleSeries::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, EcgGraphError::InputRead { .. }));
    }
}
