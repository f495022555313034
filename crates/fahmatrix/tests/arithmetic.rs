//! Integration tests for elementwise and matrix arithmetic.

use approx::assert_relative_eq;
use fahmatrix::helpers::random_uniform;
use fahmatrix::math::arithmetic;
use fahmatrix::{Matrix, MatrixError, Operation, Shape, ShapeError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
}

fn a() -> Matrix {
    m(&[&[1.0, 2.0], &[3.0, 4.0]])
}

fn b() -> Matrix {
    m(&[&[5.0, 6.0], &[7.0, 8.0]])
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[test]
fn add_two_by_two() {
    assert_eq!(a().add(&b()).unwrap(), m(&[&[6.0, 8.0], &[10.0, 12.0]]));
}

#[test]
fn subtract_two_by_two() {
    assert_eq!(
        arithmetic::subtract(&b(), &a()).unwrap(),
        m(&[&[4.0, 4.0], &[4.0, 4.0]])
    );
}

#[test]
fn multiply_two_by_two() {
    assert_eq!(
        a().multiply(&b()).unwrap(),
        m(&[&[19.0, 22.0], &[43.0, 50.0]])
    );
}

#[test]
fn scalar_multiply_preserves_shape() {
    let r = arithmetic::scalar_multiply(&a(), -0.5);
    assert_eq!(r, m(&[&[-0.5, -1.0], &[-1.5, -2.0]]));
}

#[test]
fn transpose_swaps_extents() {
    let x = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let t = arithmetic::transpose(&x);
    assert_eq!(t.shape(), Shape::new(3, 2));
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(t[(j, i)], x[(i, j)]);
        }
    }
}

#[test]
fn trace_sums_diagonal() {
    assert_eq!(a().trace().unwrap(), 5.0);
    let rect = Matrix::zeros(2, 3).unwrap();
    assert!(matches!(rect.trace(), Err(MatrixError::Shape(_))));
}

#[test]
fn non_square_product_shape() {
    let x = Matrix::from_elem(2, 3, 1.0).unwrap();
    let y = Matrix::from_elem(3, 4, 2.0).unwrap();
    let p = x.multiply(&y).unwrap();
    assert_eq!(p.shape(), Shape::new(2, 4));
    assert!(p.as_slice().iter().all(|&v| v == 6.0));
}

// ---------------------------------------------------------------------------
// Shape failures
// ---------------------------------------------------------------------------

#[test]
fn multiply_incompatible_shapes() {
    let x = Matrix::zeros(2, 3).unwrap();
    let err = x.multiply(&x).unwrap_err();
    assert_eq!(
        err,
        MatrixError::Shape(ShapeError {
            op: Operation::Multiply,
            left: Shape::new(2, 3),
            right: Some(Shape::new(2, 3)),
        })
    );
}

#[test]
fn add_requires_same_shape() {
    let x = Matrix::zeros(2, 3).unwrap();
    let y = Matrix::zeros(3, 2).unwrap();
    assert!(matches!(
        arithmetic::add(&x, &y),
        Err(MatrixError::Shape(ShapeError { op: Operation::Add, .. }))
    ));
    assert!(matches!(
        x.subtract(&y),
        Err(MatrixError::Shape(ShapeError { op: Operation::Subtract, .. }))
    ));
}

#[test]
fn operands_are_not_mutated() {
    let (x, y) = (a(), b());
    let _ = x.add(&y).unwrap();
    let _ = x.multiply(&y).unwrap();
    let _ = x.transpose();
    assert_eq!(x, a());
    assert_eq!(y, b());
}

// ---------------------------------------------------------------------------
// Algebraic properties
// ---------------------------------------------------------------------------

#[test]
fn transpose_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    for (rows, cols) in [(1, 1), (1, 5), (4, 2), (3, 3)] {
        let x = random_uniform(rows, cols, -10.0, 10.0, &mut rng).unwrap();
        assert_eq!(x.transpose().transpose(), x);
    }
}

#[test]
fn addition_commutes() {
    let mut rng = StdRng::seed_from_u64(11);
    let x = random_uniform(4, 3, -1.0, 1.0, &mut rng).unwrap();
    let y = random_uniform(4, 3, -1.0, 1.0, &mut rng).unwrap();
    assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
}

#[test]
fn multiplication_associates_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(3);
    let x = random_uniform(3, 4, -2.0, 2.0, &mut rng).unwrap();
    let y = random_uniform(4, 5, -2.0, 2.0, &mut rng).unwrap();
    let z = random_uniform(5, 2, -2.0, 2.0, &mut rng).unwrap();
    let left = x.multiply(&y).unwrap().multiply(&z).unwrap();
    let right = x.multiply(&y.multiply(&z).unwrap()).unwrap();
    assert_relative_eq!(left, right, epsilon = 1e-12, max_relative = 1e-9);
}

#[test]
fn identity_is_multiplicative_unit() {
    let eye = Matrix::identity(2).unwrap();
    assert_eq!(a().multiply(&eye).unwrap(), a());
    assert_eq!(eye.multiply(&a()).unwrap(), a());
}

#[test]
fn operator_sugar() {
    assert_eq!(&a() * 2.0, m(&[&[2.0, 4.0], &[6.0, 8.0]]));
    assert_eq!(-&a(), a().scalar_multiply(-1.0));
}
