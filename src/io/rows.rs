//! IO for row-oriented numeric files
//!
//! Each line holds comma-separated numbers, for example one input vector or one row of a
//! crossbar:
//! ```text
//!     0.0,1.5,-3.0
//!     10000.0,0.0,250000.0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{Error, Result};

/// Read comma-separated rows of numbers; blank lines are skipped
///
/// `source` is only used to report errors.
pub fn read_rows<R: Read>(r: R, source: &Path) -> Result<Vec<Vec<f64>>> {
    Ok(Rows::parse(r, source)?.rows)
}

/// Write rows of numbers, comma-separated, one row per line
pub fn write_rows<W: Write>(w: &mut W, rows: &[Vec<f64>]) -> Result<()> {
    for row in rows {
        writeln!(w, "{}", row.iter().map(|x| format!("{:?}", x)).join(","))?;
    }
    Ok(())
}

/// Check that a row has at least `expected` values
pub fn check_row(row: &[f64], expected: usize, source: &Path, line: usize) -> Result<()> {
    if row.len() < expected {
        return Err(Error::ShortRow {
            path: source.to_path_buf(),
            line,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

/// Rows read from a file, remembering where each one comes from
#[derive(Clone, Debug, PartialEq)]
pub struct Rows {
    /// File the rows were read from
    pub path: PathBuf,
    /// Values of each row
    pub rows: Vec<Vec<f64>>,
    /// 1-based line of each row in the file
    pub lines: Vec<usize>,
}

impl Rows {
    /// Rows on consecutive lines
    pub fn new(path: impl Into<PathBuf>, rows: Vec<Vec<f64>>) -> Rows {
        Rows {
            path: path.into(),
            lines: (1..=rows.len()).collect(),
            rows,
        }
    }

    /// Parse rows, skipping blank lines
    pub fn parse<R: Read>(r: R, path: &Path) -> Result<Rows> {
        let mut ret = Rows::new(path, Vec::new());
        for (i, l) in BufReader::new(r).lines().enumerate() {
            let l = l?;
            let t = l.trim();
            if t.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for token in t.split(',').map(str::trim) {
                let x = token.parse::<f64>().map_err(|_| Error::Parse {
                    path: path.to_path_buf(),
                    line: i + 1,
                    token: token.to_string(),
                })?;
                row.push(x);
            }
            ret.rows.push(row);
            ret.lines.push(i + 1);
        }
        Ok(ret)
    }

    /// Read rows from a file
    pub fn read(path: &Path) -> Result<Rows> {
        Rows::parse(File::open(path)?, path)
    }

    /// Line of the i-th row; missing rows are counted after the last one
    pub fn line(&self, i: usize) -> usize {
        match self.lines.get(i) {
            Some(l) => *l,
            None => self.lines.last().copied().unwrap_or(0) + i + 1 - self.lines.len(),
        }
    }

    /// Get a row, checking that it exists and has at least `len` values
    pub fn row(&self, i: usize, len: usize) -> Result<&[f64]> {
        let row = self.rows.get(i).map(Vec::as_slice).unwrap_or(&[]);
        check_row(row, len, &self.path, self.line(i))?;
        Ok(&row[..len])
    }

    /// Swap rows and columns; all rows must have the length of the first one
    pub fn transpose(&self) -> Result<Vec<Vec<f64>>> {
        let Some(first) = self.rows.first() else {
            return Ok(Vec::new());
        };
        let nb_cols = first.len();
        for i in 0..self.rows.len() {
            self.row(i, nb_cols)?;
        }
        Ok((0..nb_cols)
            .map(|c| self.rows.iter().map(|row| row[c]).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{read_rows, write_rows, Rows};
    use crate::Error;

    #[test]
    fn test_basic_readwrite() {
        let example = "0.0,1.5,-3\n\n 10000.0 , 0 ,2.5e5\n";
        let rows = read_rows(example.as_bytes(), Path::new("test.csv")).unwrap();
        assert_eq!(rows, vec![vec![0.0, 1.5, -3.0], vec![1e4, 0.0, 2.5e5]]);
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "0.0,1.5,-3.0\n10000.0,0.0,250000.0\n"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = read_rows("1,2\n3,x\n".as_bytes(), Path::new("in.csv")).unwrap_err();
        match err {
            Error::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            e => panic!("Unexpected error {e}"),
        }
    }

    #[test]
    fn test_transpose() {
        let rows = Rows::new("t.csv", vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = rows.transpose().unwrap();
        assert_eq!(t, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert!(Rows::new("t.csv", Vec::new()).transpose().unwrap().is_empty());
        let ragged = Rows::parse("1,2\n\n3\n".as_bytes(), Path::new("t.csv")).unwrap();
        assert!(matches!(
            ragged.transpose(),
            Err(Error::ShortRow { line: 3, .. })
        ));
    }

    #[test]
    fn test_row_access() {
        let rows = Rows::new("r.csv", vec![vec![1.0, 2.0, 3.0], vec![4.0]]);
        assert_eq!(rows.row(0, 2).unwrap(), &[1.0, 2.0]);
        assert!(matches!(
            rows.row(1, 2),
            Err(Error::ShortRow {
                line: 2,
                found: 1,
                ..
            })
        ));
        assert!(matches!(
            rows.row(5, 1),
            Err(Error::ShortRow { found: 0, .. })
        ));
    }

    #[test]
    fn test_line_numbers_skip_blanks() {
        let rows = Rows::parse("\n\n1,2\n3\n".as_bytes(), Path::new("r.csv")).unwrap();
        assert_eq!(rows.lines, vec![3, 4]);
        assert!(matches!(
            rows.row(1, 2),
            Err(Error::ShortRow {
                line: 4,
                found: 1,
                ..
            })
        ));
        // Missing rows are reported after the last line
        assert_eq!(rows.line(2), 5);
        assert_eq!(rows.line(3), 6);
        assert_eq!(Rows::new("e.csv", Vec::new()).line(0), 1);
    }
}
