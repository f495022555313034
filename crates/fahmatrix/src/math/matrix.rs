use std::fmt;
use std::ops::{Index, IndexMut, RangeBounds};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::helpers::format::{format_matrix, FormatOptions};
use crate::shape::Shape;

/// Dense `f64` matrix, row-major: element `(i, j)` lives at `i * cols + j`.
///
/// A live matrix always has `rows >= 1`, `cols >= 1` and exactly
/// `rows * cols` elements. Dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Wire form; validated on the way back in.
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}

impl From<Matrix> for RawMatrix {
    fn from(m: Matrix) -> Self {
        RawMatrix {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidDimension { rows, cols });
    }
    Ok(())
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        check_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(MatrixError::DimensionMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// For engine code that derives `data` from an existing valid matrix.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() == rows * cols);
        Self { data, rows, cols }
    }

    /// Matrix with every element set to `fill`.
    pub fn from_elem(rows: usize, cols: usize, fill: f64) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::from_elem(rows, cols, 0.0)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Build from row vectors. All rows must have the same, non-zero length; a
/// ragged input reports the total element count it was given.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        check_dims(rows.len(), cols)?;
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(MatrixError::DimensionMismatch {
                    rows: rows.len(),
                    cols,
                    len: rows.iter().map(Vec::len).sum(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        if !self.shape().contains(row, col) {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(self.offset(row, col))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let offset = self.check_index(row, col)?;
        Ok(self.data[offset])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let offset = self.check_index(row, col)?;
        Ok(&mut self.data[offset])
    }

    /// Overwrites one element in place.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `row >= nrows()`.
    pub fn row_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn column(&self, col: usize) -> Result<Vec<f64>> {
        self.check_index(0, col)?;
        Ok((0..self.rows).map(|row| self[(row, col)]).collect())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks(self.cols)
    }

    /// Exchanges two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a, 0)?;
        self.check_index(b, 0)?;
        self.exchange_rows(a, b);
        Ok(())
    }

    /// Row exchange for callers that already hold valid indices.
    pub(crate) fn exchange_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let cols = self.cols;
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..(lo + 1) * cols].swap_with_slice(&mut tail[..cols]);
    }

    /// Copy of the given rows, in the order given. Duplicates are allowed.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Matrix> {
        check_dims(indices.len(), self.cols)?;
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &row in indices {
            self.check_index(row, 0)?;
            data.extend_from_slice(self.row_slice(row));
        }
        Ok(Matrix {
            data,
            rows: indices.len(),
            cols: self.cols,
        })
    }

    pub fn select_columns<R>(&self, range: R) -> Result<Matrix>
    where
        R: RangeBounds<usize>,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        if end > self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: 0,
                col: end - 1,
                shape: self.shape(),
            });
        }
        check_dims(self.rows, end.saturating_sub(start))?;

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            data.extend_from_slice(&self.row_slice(row)[start..end]);
        }

        Ok(Matrix {
            data,
            rows: self.rows,
            cols: new_cols,
        })
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Largest absolute element.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Elementwise comparison with an absolute tolerance. Shapes must match.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            self.shape().contains(index.0, index.1),
            "index {:?} out of bounds for {} matrix",
            index,
            self.shape()
        );
        &self.data[self.offset(index.0, index.1)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            self.shape().contains(index.0, index.1),
            "index {:?} out of bounds for {} matrix",
            index,
            self.shape()
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut options = FormatOptions::default();
        if let Some(precision) = f.precision() {
            options.precision = precision;
        }
        f.write_str(&format_matrix(self, &options))
    }
}
