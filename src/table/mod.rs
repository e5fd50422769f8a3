//! Whitespace-delimited numeric tables (analytic solution and extracted profiles).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::VerifyError;

/// A rectangular table of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: PathBuf,
    cols: usize,
    data: Vec<f64>,
}

impl Table {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(VerifyError::MissingInput { path: path.to_path_buf() }.into());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading table {}", path.display()))?;
        Ok(Self::parse(&text, path)?)
    }

    /// Parse `text`; `source` is only used to label errors.
    ///
    /// Blank lines and `#` comments are skipped, and Fortran `D` exponents are accepted.
    pub fn parse(text: &str, source: &Path) -> Result<Self, VerifyError> {
        let mut cols = 0;
        let mut data = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw.split_once('#') {
                Some((before, _)) => before,
                None => raw,
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if cols == 0 {
                cols = fields.len();
            } else if fields.len() != cols {
                return Err(VerifyError::Ragged {
                    path: source.to_path_buf(),
                    line: line_no,
                    expected: cols,
                    found: fields.len(),
                });
            }
            for field in fields {
                let value = parse_number(field).ok_or_else(|| VerifyError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    message: format!("could not convert '{}' to a number", field),
                })?;
                data.push(value);
            }
        }

        if data.is_empty() {
            return Err(VerifyError::EmptyTable { path: source.to_path_buf() });
        }

        Ok(Self { source: source.to_path_buf(), cols, data })
    }

    pub fn rows(&self) -> usize {
        self.data.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn column(&self, index: usize) -> Result<Vec<f64>, VerifyError> {
        if index >= self.cols {
            return Err(VerifyError::MissingColumn {
                path: self.source.clone(),
                index,
                width: self.cols,
            });
        }
        Ok(self.data.iter().skip(index).step_by(self.cols).copied().collect())
    }

    /// Pairs `(x, y)` taken from two columns, row by row.
    pub fn pairs(&self, x: usize, y: usize) -> Result<Vec<(f64, f64)>, VerifyError> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Ok(xs.into_iter().zip(ys).collect())
    }
}

fn parse_number(field: &str) -> Option<f64> {
    if let Ok(v) = field.parse::<f64>() {
        return Some(v);
    }
    // 1.0D-03
    let is_d = |c: char| c == 'd' || c == 'D';
    if field.contains(is_d) {
        let swapped = field.replace(is_d, "e");
        return swapped.parse::<f64>().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> &'static Path {
        Path::new("test.dat")
    }

    #[test]
    fn test_parse_basic_table() {
        let text = "# r rho u p e\n0.0 1.0 0.0 1e-5 2.5\n\n0.1  2.0 0.5 3.0 -1.25\n";
        let t = Table::parse(text, src()).unwrap();
        assert_eq!(t.rows(), 2);
        assert_eq!(t.cols(), 5);
        assert_eq!(t.column(4).unwrap(), vec![2.5, -1.25]);
        assert_eq!(t.column(3).unwrap(), vec![1e-5, 3.0]);
        assert_eq!(t.pairs(0, 1).unwrap(), vec![(0.0, 1.0), (0.1, 2.0)]);
    }

    #[test]
    fn test_trailing_comment_and_fortran_exponent() {
        let text = "1.0D-03 2.5d+01 # trailing\n\t3 4\n";
        let t = Table::parse(text, src()).unwrap();
        assert_eq!(t.column(0).unwrap(), vec![1.0e-3, 3.0]);
        assert_eq!(t.column(1).unwrap(), vec![25.0, 4.0]);
    }

    #[test]
    fn test_ragged_row_names_line() {
        let err = Table::parse("1 2 3\n4 5\n", src()).unwrap_err();
        match err {
            VerifyError::Ragged { line, expected, found, .. } => {
                assert_eq!((line, expected, found), (2, 3, 2));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_names_line() {
        let err = Table::parse("1 2\n\n3 abc\n", src()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("test.dat:3:"), "Got: {}", msg);
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = Table::parse("# only a header\n\n", src()).unwrap_err();
        assert!(matches!(err, VerifyError::EmptyTable { .. }));
    }

    #[test]
    fn test_column_out_of_range() {
        let t = Table::parse("1 2\n", src()).unwrap();
        assert!(matches!(
            t.column(5),
            Err(VerifyError::MissingColumn { index: 5, width: 2, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Table::load(Path::new("/nonexistent/cylindrical_sedov.dat")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VerifyError>(),
            Some(VerifyError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.out");
        fs::write(&path, "0.01 1.0 0.0 0.1 0.25\n0.02 1.1 0.1 0.2 0.5\n").unwrap();
        let t = Table::load(&path).unwrap();
        assert_eq!(t.rows(), 2);
        assert_eq!(t.source(), path.as_path());
    }
}
