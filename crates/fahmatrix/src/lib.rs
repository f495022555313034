//! fahmatrix: a dense `f64` matrix engine.
//!
//! The engine lives in [`math`]: row-major storage with bounds-checked access,
//! elementwise and matrix arithmetic, and an elimination core (partial
//! pivoting) that drives determinant, inverse, rank and linear solves. Every
//! multi-operand operation is validated by [`shape`] before any element is
//! read.
//!
//! Around the engine sit thin consumers of its public contract: CSV/JSON
//! adapters in [`io`], formatting/selection/random helpers in [`helpers`] and
//! column statistics in [`stats`].
pub mod config;
pub mod error;
pub mod helpers;
pub mod io;
pub mod math;
pub mod shape;
pub mod stats;

pub use error::{MatrixError, Result};
pub use math::Matrix;
pub use shape::{Operation, Shape, ShapeError};
