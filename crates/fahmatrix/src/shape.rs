//! Shape checks run before any arithmetic or decomposition touches an element.
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Matrix;

/// `(rows, cols)` extents of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl From<(usize, usize)> for Shape {
    fn from(value: (usize, usize)) -> Self {
        Shape::new(value.0, value.1)
    }
}

impl From<Shape> for (usize, usize) {
    fn from(value: Shape) -> Self {
        (value.rows, value.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// The operation a [`ShapeError`] was raised for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Trace,
    Determinant,
    Inverse,
    Solve,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Trace => "trace",
            Operation::Determinant => "determinant",
            Operation::Inverse => "inverse",
            Operation::Solve => "solve",
        };
        f.write_str(name)
    }
}

/// Operand shapes incompatible for the requested operation.
///
/// `right` is `None` for single-operand checks (square-only operations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub op: Operation,
    pub left: Shape,
    pub right: Option<Shape>,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.right {
            Some(right) => write!(
                f,
                "incompatible shapes for {}: {} and {}",
                self.op, self.left, right
            ),
            None => write!(
                f,
                "{} requires a square matrix, got {}",
                self.op, self.left
            ),
        }
    }
}

impl Error for ShapeError {}

/// Elementwise operations need identical extents.
pub fn same_shape(a: &Matrix, b: &Matrix) -> bool {
    a.shape() == b.shape()
}

/// `a * b` is defined iff `a.cols == b.rows`.
pub fn multipliable(a: &Matrix, b: &Matrix) -> bool {
    a.ncols() == b.nrows()
}

pub fn is_square(a: &Matrix) -> bool {
    a.shape().is_square()
}

pub fn ensure_same_shape(op: Operation, a: &Matrix, b: &Matrix) -> Result<(), ShapeError> {
    if same_shape(a, b) {
        Ok(())
    } else {
        Err(pair_error(op, a, b))
    }
}

pub fn ensure_multipliable(op: Operation, a: &Matrix, b: &Matrix) -> Result<(), ShapeError> {
    if multipliable(a, b) {
        Ok(())
    } else {
        Err(pair_error(op, a, b))
    }
}

/// Right-hand sides of a linear system must have one row per equation.
pub fn ensure_same_rows(op: Operation, a: &Matrix, b: &Matrix) -> Result<(), ShapeError> {
    if a.nrows() == b.nrows() {
        Ok(())
    } else {
        Err(pair_error(op, a, b))
    }
}

pub fn ensure_square(op: Operation, a: &Matrix) -> Result<(), ShapeError> {
    if is_square(a) {
        Ok(())
    } else {
        Err(ShapeError {
            op,
            left: a.shape(),
            right: None,
        })
    }
}

fn pair_error(op: Operation, a: &Matrix, b: &Matrix) -> ShapeError {
    ShapeError {
        op,
        left: a.shape(),
        right: Some(b.shape()),
    }
}
