//! Elementwise and matrix-level arithmetic.
//!
//! Every operation validates operand shapes before reading an element and
//! returns a new matrix; operands are never mutated.
use std::ops::{Mul, Neg};

use crate::error::Result;
use crate::math::Matrix;
use crate::shape::{self, Operation};

/// Minimum `rows * inner * cols` before `multiply` fans rows out to rayon.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_WORK: usize = 1 << 18;

impl Matrix {
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        shape::ensure_same_shape(Operation::Add, self, other)?;
        Ok(self.zip_map(other, |a, b| a + b))
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        shape::ensure_same_shape(Operation::Subtract, self, other)?;
        Ok(self.zip_map(other, |a, b| a - b))
    }

    pub fn scalar_multiply(&self, k: f64) -> Matrix {
        self.mapv(|v| v * k)
    }

    /// Standard product: `out[i][j] = Σ_k self[i][k] * other[k][j]`, summed in
    /// increasing `k`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        shape::ensure_multipliable(Operation::Multiply, self, other)?;
        let mut out = Matrix::zeros(self.nrows(), other.ncols())?;
        let work = self.nrows() * self.ncols() * other.ncols();
        fill_product_rows(self, other, out.as_mut_slice(), work);
        Ok(out)
    }

    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = (self.nrows(), self.ncols());
        let mut data = vec![0.0; rows * cols];
        for (i, row) in self.iter_rows().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[j * rows + i] = v;
            }
        }
        Matrix::from_parts(cols, rows, data)
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> Result<f64> {
        shape::ensure_square(Operation::Trace, self)?;
        Ok((0..self.nrows()).map(|i| self[(i, i)]).sum())
    }

    fn zip_map<F>(&self, other: &Matrix, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut out = self.clone();
        for (o, &b) in out.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *o = f(*o, b);
        }
        out
    }
}

pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.add(b)
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.subtract(b)
}

pub fn scalar_multiply(a: &Matrix, k: f64) -> Matrix {
    a.scalar_multiply(k)
}

pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.multiply(b)
}

pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Computes one output row of `a * b` into `out_row`.
fn product_row(a: &Matrix, b: &Matrix, i: usize, out_row: &mut [f64]) {
    for (k, &aik) in a.row_slice(i).iter().enumerate() {
        for (o, &bkj) in out_row.iter_mut().zip(b.row_slice(k)) {
            *o += aik * bkj;
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_product_rows(a: &Matrix, b: &Matrix, out: &mut [f64], _work: usize) {
    for (i, out_row) in out.chunks_mut(b.ncols()).enumerate() {
        product_row(a, b, i, out_row);
    }
}

#[cfg(feature = "parallel")]
fn fill_product_rows(a: &Matrix, b: &Matrix, out: &mut [f64], work: usize) {
    use rayon::prelude::*;

    if work < PARALLEL_MIN_WORK {
        for (i, out_row) in out.chunks_mut(b.ncols()).enumerate() {
            product_row(a, b, i, out_row);
        }
        return;
    }
    log::trace!("multiply: distributing {} rows over rayon", a.nrows());
    out.par_chunks_mut(b.ncols())
        .enumerate()
        .for_each(|(i, out_row)| product_row(a, b, i, out_row));
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.scalar_multiply(rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.mapv(|v| -v)
    }
}
