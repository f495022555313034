use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{self, Matrix, DEFAULT_TOLERANCE};

/// Numeric settings shared by callers of the engine.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Relative pivot tolerance for singularity detection. Must be positive
    /// and finite; the solvers reject anything else.
    pub tolerance: f64,
    /// Absolute tolerance for elementwise matrix comparison.
    pub comparison_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            comparison_tolerance: 1e-9,
        }
    }
}

impl EngineConfig {
    pub fn new(tolerance: f64, comparison_tolerance: f64) -> Self {
        Self {
            tolerance,
            comparison_tolerance,
        }
    }

    pub fn inverse(&self, a: &Matrix) -> Result<Matrix> {
        math::inverse_with_tolerance(a, self.tolerance)
    }

    pub fn solve(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        math::solve_with_tolerance(a, b, self.tolerance)
    }

    pub fn rank(&self, a: &Matrix) -> Result<usize> {
        Ok(math::row_reduce_with_tolerance(a, self.tolerance)?.rank())
    }

    pub fn matrices_match(&self, a: &Matrix, b: &Matrix) -> bool {
        a.approx_eq(b, self.comparison_tolerance)
    }
}
