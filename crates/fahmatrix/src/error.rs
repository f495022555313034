use std::error::Error;
use std::fmt;

use crate::shape::{Shape, ShapeError};

/// Failures raised by the matrix engine.
///
/// Every variant is reported before any state is mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Construction with zero rows or columns.
    InvalidDimension { rows: usize, cols: usize },
    /// Supplied buffer length disagrees with the declared shape.
    DimensionMismatch { rows: usize, cols: usize, len: usize },
    /// Element access outside the declared extents.
    IndexOutOfBounds { row: usize, col: usize, shape: Shape },
    /// Operand shapes incompatible for the requested operation.
    Shape(ShapeError),
    /// No usable pivot in `column`; `magnitude` is the largest candidate found.
    SingularMatrix { column: usize, magnitude: f64 },
    /// Pivot tolerance that is not a positive finite number.
    InvalidTolerance { tolerance: f64 },
    /// Sampling bounds with `low > high` or a non-finite end.
    InvalidRange { low: f64, high: f64 },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InvalidDimension { rows, cols } => {
                write!(f, "invalid dimensions {}x{}: rows and cols must be >= 1", rows, cols)
            }
            MatrixError::DimensionMismatch { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            MatrixError::IndexOutOfBounds { row, col, shape } => {
                write!(f, "index ({}, {}) out of bounds for {} matrix", row, col, shape)
            }
            MatrixError::Shape(err) => write!(f, "{}", err),
            MatrixError::SingularMatrix { column, magnitude } => write!(
                f,
                "matrix is singular: no pivot in column {} (largest candidate {:.2e})",
                column, magnitude
            ),
            MatrixError::InvalidTolerance { tolerance } => write!(
                f,
                "invalid pivot tolerance {}: must be positive and finite",
                tolerance
            ),
            MatrixError::InvalidRange { low, high } => {
                write!(f, "invalid range [{}, {}]: bounds must be finite with low <= high", low, high)
            }
        }
    }
}

impl Error for MatrixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MatrixError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShapeError> for MatrixError {
    fn from(err: ShapeError) -> Self {
        MatrixError::Shape(err)
    }
}
