//! Dense square matrices and their CSV representation.
//!
//! Input files hold `n` lines of `n` comma-separated decimal numbers with no
//! header row. Loading is lenient about trailing content: columns beyond `n`
//! on a line and lines beyond the `n`-th are ignored. Anything short of an
//! `n x n` block of finite numbers is rejected as malformed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// An `n x n` matrix of `f64` stored in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Builds a matrix from row-major `data`, which must hold exactly `n * n` values.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::Config(format!(
                "{} values cannot form a {n}x{n} matrix",
                data.len()
            )));
        }
        Ok(Self { n, data })
    }

    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Self { n, data }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Resets every cell to zero, keeping the allocation.
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Swaps in a freshly computed row-major buffer of the same size and
    /// returns the previous one.
    pub(crate) fn replace_data(&mut self, data: Vec<f64>) -> Vec<f64> {
        debug_assert_eq!(data.len(), self.n * self.n);
        std::mem::replace(&mut self.data, data)
    }

    /// Largest element-wise absolute difference. Matrices must have the same size.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        debug_assert_eq!(self.n, other.n);
        self.data
            .iter()
            .zip(&other.data)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    /// Reads the leading `n x n` block of a comma-separated file.
    pub fn load_csv(path: impl AsRef<Path>, n: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::io(path, err))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut data = Vec::with_capacity(n * n);
        let mut record = csv::StringRecord::new();
        let mut rows = 0usize;
        while rows < n {
            if !reader
                .read_record(&mut record)
                .map_err(|err| Error::csv(path, err))?
            {
                break;
            }
            let line = record
                .position()
                .map_or(rows as u64 + 1, |pos| pos.line());
            if record.len() < n {
                return Err(Error::malformed(
                    path,
                    line,
                    format!("expected {n} columns, found {}", record.len()),
                ));
            }
            for (col, field) in record.iter().take(n).enumerate() {
                let value = parse_cell(field).ok_or_else(|| {
                    Error::malformed(
                        path,
                        line,
                        format!("column {}: {field:?} is not a finite number", col + 1),
                    )
                })?;
                data.push(value);
            }
            rows += 1;
        }

        if rows < n {
            return Err(Error::malformed(
                path,
                rows as u64 + 1,
                format!("expected {n} rows, found {rows}"),
            ));
        }

        debug!(path = %path.display(), n, "loaded matrix");
        Ok(Self { n, data })
    }

    /// Writes the matrix as `n` lines of `n` comma-separated values in `{:.18e}` form.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| Error::io(path, err))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        let mut fields = Vec::with_capacity(self.n);
        for row in self.data.chunks_exact(self.n.max(1)) {
            fields.clear();
            fields.extend(row.iter().map(|v| format!("{v:.18e}")));
            writer
                .write_record(&fields)
                .map_err(|err| Error::csv(path, err))?;
        }
        writer.flush().map_err(|err| Error::io(path, err))?;

        debug!(path = %path.display(), n = self.n, "wrote matrix");
        Ok(())
    }
}

fn parse_cell(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::scratch_dir;
    use std::fs;

    #[test]
    fn loads_square_block() {
        let dir = scratch_dir("load");
        let path = dir.join("m.csv");
        fs::write(&path, "1,2,3\n4,5,6\n7,8,9\n").unwrap();

        let m = Matrix::load_csv(&path, 3).unwrap();
        assert_eq!(m.n(), 3);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    fn ignores_extra_columns_and_rows() {
        let dir = scratch_dir("lenient");
        let path = dir.join("m.csv");
        fs::write(&path, "1, 2, 99\n3, 4, 99\n5, 6, 99\n").unwrap();

        let m = Matrix::load_csv(&path, 2).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn parses_scientific_notation() {
        let dir = scratch_dir("sci");
        let path = dir.join("m.csv");
        fs::write(
            &path,
            "1.500000000000000000e+00,-2.5e-01\n3.0E2,4\n",
        )
        .unwrap();

        let m = Matrix::load_csv(&path, 2).unwrap();
        assert_eq!(m.as_slice(), &[1.5, -0.25, 300.0, 4.0]);
    }

    #[test]
    fn too_few_rows_is_malformed() {
        let dir = scratch_dir("short");
        let path = dir.join("m.csv");
        fs::write(&path, "1,2,3\n4,5,6\n").unwrap();

        let err = Matrix::load_csv(&path, 3).unwrap_err();
        assert!(err.is_malformed(), "{err}");
        assert!(err.to_string().contains("expected 3 rows, found 2"), "{err}");
    }

    #[test]
    fn too_few_columns_is_malformed() {
        let dir = scratch_dir("narrow");
        let path = dir.join("m.csv");
        fs::write(&path, "1,2\n3\n").unwrap();

        let err = Matrix::load_csv(&path, 2).unwrap_err();
        assert!(err.is_malformed(), "{err}");
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let dir = scratch_dir("nan");
        let path = dir.join("m.csv");
        fs::write(&path, "1,x\n3,4\n").unwrap();

        let err = Matrix::load_csv(&path, 2).unwrap_err();
        assert!(err.is_malformed(), "{err}");
        assert!(err.to_string().contains("column 2"), "{err}");

        fs::write(&path, "1,inf\n3,4\n").unwrap();
        assert!(Matrix::load_csv(&path, 2).unwrap_err().is_malformed());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = scratch_dir("blank");
        let path = dir.join("m.csv");
        fs::write(&path, "1,2\n\n3,4\n").unwrap();

        let m = Matrix::load_csv(&path, 2).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        fs::write(&path, "1,2\n\n").unwrap();
        assert!(Matrix::load_csv(&path, 2).unwrap_err().is_malformed());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = scratch_dir("missing");
        let err = Matrix::load_csv(dir.join("nope.csv"), 2).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err}");
    }

    #[test]
    fn write_then_load_is_exact() {
        let dir = scratch_dir("write");
        let path = dir.join("m.csv");
        let m = Matrix::from_fn(4, |i, j| (i as f64 + 1.0) / (j as f64 + 3.0) - 0.1);

        m.write_csv(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains('"'));

        let loaded = Matrix::load_csv(&path, 4).unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Matrix::from_vec(2, vec![1.0; 4]).is_ok());
        assert!(matches!(
            Matrix::from_vec(2, vec![1.0; 3]),
            Err(Error::Config(_))
        ));
    }
}
