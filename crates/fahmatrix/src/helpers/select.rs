//! Positional row/column selection.
use crate::error::{MatrixError, Result};
use crate::math::Matrix;

/// Rows shown by [`head_default`] and [`tail_default`].
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// First `n` rows (all rows when the matrix is shorter).
pub fn head(m: &Matrix, n: usize) -> Result<Matrix> {
    let take = preview_len(m, n)?;
    m.select_rows(&(0..take).collect::<Vec<_>>())
}

/// Last `n` rows (all rows when the matrix is shorter).
pub fn tail(m: &Matrix, n: usize) -> Result<Matrix> {
    let take = preview_len(m, n)?;
    m.select_rows(&((m.nrows() - take)..m.nrows()).collect::<Vec<_>>())
}

pub fn head_default(m: &Matrix) -> Result<Matrix> {
    head(m, DEFAULT_PREVIEW_ROWS)
}

pub fn tail_default(m: &Matrix) -> Result<Matrix> {
    tail(m, DEFAULT_PREVIEW_ROWS)
}

fn preview_len(m: &Matrix, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(MatrixError::InvalidDimension {
            rows: 0,
            cols: m.ncols(),
        });
    }
    Ok(n.min(m.nrows()))
}

/// Sub-matrix at the given row and column positions, in the order given.
/// An empty position list selects every row (or column).
pub fn select(m: &Matrix, rows: &[usize], cols: &[usize]) -> Result<Matrix> {
    let rows: Vec<usize> = if rows.is_empty() {
        (0..m.nrows()).collect()
    } else {
        rows.to_vec()
    };
    let cols: Vec<usize> = if cols.is_empty() {
        (0..m.ncols()).collect()
    } else {
        cols.to_vec()
    };

    let mut data = Vec::with_capacity(rows.len() * cols.len());
    for &r in &rows {
        for &c in &cols {
            data.push(m.get(r, c)?);
        }
    }
    Matrix::from_shape_vec((rows.len(), cols.len()), data)
}
