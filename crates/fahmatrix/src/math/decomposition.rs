//! Gaussian elimination with partial pivoting and the solvers built on it.
//!
//! One forward pass ([`forward_eliminate`]) and one backward pass
//! ([`backward_eliminate`]) serve every algorithm here:
//!
//! - **Row echelon form**: forward pass only.
//! - **Determinant**: forward pass at zero tolerance, `(-1)^swaps · Π diag`.
//! - **Inverse**: both passes on `[A | I]` (Gauss-Jordan).
//! - **Solve**: both passes on `[A | B]`.
//!
//! # Numerical Stability
//!
//! At every pivot column the row with the largest absolute value is moved into
//! the pivot position, which keeps every elimination factor at most 1 in
//! magnitude and bounds rounding error growth.
//!
//! A pivot candidate counts as zero when its magnitude is at most
//! `tolerance * max|a_ij|`. The test is relative so that uniformly scaled
//! matrices (`1e-8 * I`) stay invertible while rank-deficient ones are
//! reported as [`MatrixError::SingularMatrix`]. Caller supplied tolerances
//! must be positive and finite, and are raised to at least [`MIN_TOLERANCE`]:
//! an exact-zero test would let round-off residue in a singular matrix pass
//! as a pivot.
//!
//! # Example
//!
//! ```
//! use fahmatrix::math::{determinant, inverse};
//! use fahmatrix::Matrix;
//!
//! let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! assert!((determinant(&a).unwrap() + 2.0).abs() < 1e-12);
//!
//! let inv = inverse(&a).unwrap();
//! assert!(inv.approx_eq(&Matrix::from_rows(&[vec![-2.0, 1.0], vec![1.5, -0.5]]).unwrap(), 1e-12));
//! ```
use crate::error::{MatrixError, Result};
use crate::math::Matrix;
use crate::shape::{self, Operation};

/// Relative pivot tolerance used when none is supplied.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Smallest relative pivot tolerance the solvers will run with.
pub const MIN_TOLERANCE: f64 = f64::EPSILON;

/// Row echelon form produced by [`row_reduce`].
#[derive(Debug, Clone)]
pub struct RowEchelon {
    /// Upper-trapezoidal matrix; entries below each pivot are exactly zero.
    pub matrix: Matrix,
    /// Column of the pivot in row `i`, for each pivot row.
    pub pivot_columns: Vec<usize>,
    /// Number of row exchanges (parity of the permutation).
    pub swaps: usize,
}

impl RowEchelon {
    pub fn rank(&self) -> usize {
        self.pivot_columns.len()
    }
}

struct Elimination {
    pivots: Vec<usize>,
    swaps: usize,
    /// First column without a usable pivot, with its best candidate magnitude.
    deficient: Option<(usize, f64)>,
}

/// Reduces `a` to row echelon form at [`DEFAULT_TOLERANCE`].
pub fn row_reduce(a: &Matrix) -> RowEchelon {
    echelon_form(a, DEFAULT_TOLERANCE)
}

/// Fails with [`MatrixError::InvalidTolerance`] unless `tolerance` is positive
/// and finite.
pub fn row_reduce_with_tolerance(a: &Matrix, tolerance: f64) -> Result<RowEchelon> {
    let tolerance = checked_tolerance(tolerance)?;
    Ok(echelon_form(a, tolerance))
}

fn echelon_form(a: &Matrix, tolerance: f64) -> RowEchelon {
    let mut work = a.clone();
    let elim = forward_eliminate(&mut work, None, tolerance);
    RowEchelon {
        matrix: work,
        pivot_columns: elim.pivots,
        swaps: elim.swaps,
    }
}

/// Reduced row echelon form: unit pivots, zeros above and below each pivot.
pub fn reduced_row_echelon(a: &Matrix) -> Matrix {
    let mut work = a.clone();
    let elim = forward_eliminate(&mut work, None, DEFAULT_TOLERANCE);
    backward_eliminate(&mut work, None, &elim.pivots);
    work
}

pub fn rank(a: &Matrix) -> usize {
    row_reduce(a).rank()
}

/// Determinant of a square matrix.
///
/// Only exactly-zero pivot columns are skipped, so near-singular matrices
/// report their (tiny) computed determinant rather than `0.0`.
pub fn determinant(a: &Matrix) -> Result<f64> {
    shape::ensure_square(Operation::Determinant, a)?;
    let n = a.nrows();
    if n == 1 {
        return Ok(a[(0, 0)]);
    }
    let echelon = echelon_form(a, 0.0);
    if echelon.rank() < n {
        return Ok(0.0);
    }
    let sign = if echelon.swaps % 2 == 0 { 1.0 } else { -1.0 };
    Ok((0..n).fold(sign, |det, i| det * echelon.matrix[(i, i)]))
}

pub fn inverse(a: &Matrix) -> Result<Matrix> {
    inverse_with_tolerance(a, DEFAULT_TOLERANCE)
}

/// Gauss-Jordan inverse. Fails with [`MatrixError::SingularMatrix`] when a
/// pivot column has no candidate above `tolerance * max|a_ij|`.
pub fn inverse_with_tolerance(a: &Matrix, tolerance: f64) -> Result<Matrix> {
    shape::ensure_square(Operation::Inverse, a)?;
    let tolerance = checked_tolerance(tolerance)?;
    log::debug!("inverse: {} matrix, tolerance {:e}", a.shape(), tolerance);
    let identity = Matrix::identity(a.nrows())?;
    eliminate_against(a, identity, tolerance)
}

pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    solve_with_tolerance(a, b, DEFAULT_TOLERANCE)
}

/// Solves `A X = B` for `X`; `b` may hold several right-hand side columns.
pub fn solve_with_tolerance(a: &Matrix, b: &Matrix, tolerance: f64) -> Result<Matrix> {
    shape::ensure_square(Operation::Solve, a)?;
    shape::ensure_same_rows(Operation::Solve, a, b)?;
    let tolerance = checked_tolerance(tolerance)?;
    log::debug!(
        "solve: {} system with {} right-hand side(s)",
        a.shape(),
        b.ncols()
    );
    eliminate_against(a, b.clone(), tolerance)
}

fn checked_tolerance(tolerance: f64) -> Result<f64> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(MatrixError::InvalidTolerance { tolerance });
    }
    Ok(tolerance.max(MIN_TOLERANCE))
}

/// Runs both passes on `[a | rhs]` and returns the transformed `rhs`.
fn eliminate_against(a: &Matrix, mut rhs: Matrix, tolerance: f64) -> Result<Matrix> {
    let mut work = a.clone();
    let elim = forward_eliminate(&mut work, Some(&mut rhs), tolerance);
    if let Some((column, magnitude)) = elim.deficient {
        log::debug!("singular matrix: column {} best pivot {:e}", column, magnitude);
        return Err(MatrixError::SingularMatrix { column, magnitude });
    }
    backward_eliminate(&mut work, Some(&mut rhs), &elim.pivots);
    Ok(rhs)
}

/// Row with the largest `|work[r][col]|` for `r >= from`; first one wins ties.
fn select_pivot(work: &Matrix, from: usize, col: usize) -> (usize, f64) {
    let mut best = (from, work[(from, col)].abs());
    for r in (from + 1)..work.nrows() {
        let magnitude = work[(r, col)].abs();
        if magnitude > best.1 {
            best = (r, magnitude);
        }
    }
    best
}

/// `m[target][from_col..] -= factor * m[source][from_col..]`
fn subtract_scaled_row(m: &mut Matrix, target: usize, source: usize, factor: f64, from_col: usize) {
    let cols = m.ncols();
    let data = m.as_mut_slice();
    let (src, dst) = if source < target {
        let (head, tail) = data.split_at_mut(target * cols);
        (&head[source * cols..(source + 1) * cols], &mut tail[..cols])
    } else {
        let (head, tail) = data.split_at_mut(source * cols);
        (&tail[..cols], &mut head[target * cols..(target + 1) * cols])
    };
    for (d, s) in dst[from_col..].iter_mut().zip(&src[from_col..]) {
        *d -= factor * s;
    }
}

/// Forward pass: row echelon form in place, mirroring every row operation
/// onto `augment` when present.
fn forward_eliminate(
    work: &mut Matrix,
    mut augment: Option<&mut Matrix>,
    tolerance: f64,
) -> Elimination {
    let threshold = tolerance * work.max_abs();
    let (rows, cols) = (work.nrows(), work.ncols());
    let mut pivots = Vec::with_capacity(rows.min(cols));
    let mut swaps = 0;
    let mut deficient = None;

    let mut row = 0;
    for col in 0..cols {
        if row == rows {
            break;
        }
        let (pivot_row, magnitude) = select_pivot(work, row, col);
        if magnitude <= threshold {
            deficient.get_or_insert((col, magnitude));
            for r in row..rows {
                work[(r, col)] = 0.0;
            }
            continue;
        }

        if pivot_row != row {
            work.exchange_rows(row, pivot_row);
            if let Some(aug) = augment.as_deref_mut() {
                aug.exchange_rows(row, pivot_row);
            }
            swaps += 1;
            log::trace!("column {}: swapped rows {} and {}", col, row, pivot_row);
        }

        let pivot = work[(row, col)];
        for r in (row + 1)..rows {
            let factor = work[(r, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            work[(r, col)] = 0.0;
            subtract_scaled_row(work, r, row, factor, col + 1);
            if let Some(aug) = augment.as_deref_mut() {
                subtract_scaled_row(aug, r, row, factor, 0);
            }
        }

        pivots.push(col);
        row += 1;
    }

    Elimination {
        pivots,
        swaps,
        deficient,
    }
}

/// Backward pass over an echelon form: scales pivots to 1 and clears every
/// entry above them, bottom pivot first.
fn backward_eliminate(work: &mut Matrix, mut augment: Option<&mut Matrix>, pivots: &[usize]) {
    for (row, &col) in pivots.iter().enumerate().rev() {
        let pivot = work[(row, col)];
        for v in work.row_slice_mut(row).iter_mut() {
            *v /= pivot;
        }
        work[(row, col)] = 1.0;
        if let Some(aug) = augment.as_deref_mut() {
            for v in aug.row_slice_mut(row).iter_mut() {
                *v /= pivot;
            }
        }

        for r in 0..row {
            let factor = work[(r, col)];
            if factor == 0.0 {
                continue;
            }
            subtract_scaled_row(work, r, row, factor, col);
            work[(r, col)] = 0.0;
            if let Some(aug) = augment.as_deref_mut() {
                subtract_scaled_row(aug, r, row, factor, 0);
            }
        }
    }
}
