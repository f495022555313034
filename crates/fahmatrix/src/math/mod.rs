//! The matrix engine: storage, arithmetic and elimination-based solvers.
//!
//! Storage is row-major and owned; every operation takes `&Matrix` operands
//! and returns a fresh `Matrix`.
pub mod arithmetic;
pub mod decomposition;
pub mod matrix;

pub use decomposition::{
    determinant, inverse, inverse_with_tolerance, rank, reduced_row_echelon, row_reduce,
    row_reduce_with_tolerance, solve, solve_with_tolerance, RowEchelon, DEFAULT_TOLERANCE,
    MIN_TOLERANCE,
};
pub use matrix::Matrix;
