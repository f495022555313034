//! Random matrix generation.
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{MatrixError, Result};
use crate::math::Matrix;

/// Matrix with elements drawn uniformly from `[low, high]`.
///
/// Fails with [`MatrixError::InvalidRange`] if `low > high` or either bound is
/// not finite.
pub fn random_uniform<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Matrix> {
    let mut m = Matrix::zeros(rows, cols)?;
    if !(low.is_finite() && high.is_finite() && low <= high) {
        return Err(MatrixError::InvalidRange { low, high });
    }
    let dist = Uniform::new_inclusive(low, high);
    for v in m.as_mut_slice().iter_mut() {
        *v = dist.sample(rng);
    }
    Ok(m)
}

/// Strictly diagonally dominant `n x n` matrix, hence always invertible.
pub fn random_diagonally_dominant<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Matrix> {
    let mut m = random_uniform(n, n, -1.0, 1.0, rng)?;
    for i in 0..n {
        let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| m[(i, j)].abs()).sum();
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        m[(i, i)] = sign * (off_diagonal + rng.gen_range(1.0..2.0));
    }
    Ok(m)
}
