use approx::assert_relative_eq;
use fahmatrix::config::EngineConfig;
use fahmatrix::helpers::random_diagonally_dominant;
use fahmatrix::math::{
    determinant, inverse, inverse_with_tolerance, rank, reduced_row_echelon, row_reduce,
    row_reduce_with_tolerance, solve, solve_with_tolerance,
};
use fahmatrix::{Matrix, MatrixError, Operation, Shape, ShapeError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
}

fn a() -> Matrix {
    m(&[&[1.0, 2.0], &[3.0, 4.0]])
}

// ---------------------------------------------------------------------------
// Determinant
// ---------------------------------------------------------------------------

#[test]
fn determinant_of_two_by_two() {
    assert!((determinant(&a()).unwrap() + 2.0).abs() < 1e-12);
}

#[test]
fn determinant_of_identity_is_one() {
    for n in 1..=6 {
        let det = determinant(&Matrix::identity(n).unwrap()).unwrap();
        assert!((det - 1.0).abs() < 1e-12, "n = {}: {}", n, det);
    }
}

#[test]
fn determinant_of_one_by_one_is_the_element() {
    assert_eq!(determinant(&m(&[&[7.0]])).unwrap(), 7.0);
    assert_eq!(determinant(&m(&[&[0.0]])).unwrap(), 0.0);
}

#[test]
fn determinant_sign_follows_row_swaps() {
    let permutation = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
    assert_eq!(determinant(&permutation).unwrap(), -1.0);
}

#[test]
fn determinant_of_singular_matrix_is_zero() {
    assert_eq!(determinant(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).unwrap(), 0.0);
    assert_eq!(determinant(&Matrix::zeros(3, 3).unwrap()).unwrap(), 0.0);
}

#[test]
fn determinant_of_upper_triangular_is_diagonal_product() {
    let u = m(&[&[2.0, 5.0, -1.0], &[0.0, 3.0, 4.0], &[0.0, 0.0, -0.5]]);
    assert_relative_eq!(determinant(&u).unwrap(), -3.0, max_relative = 1e-12);
}

#[test]
fn determinant_is_multiplicative() {
    let mut rng = StdRng::seed_from_u64(42);
    let x = random_diagonally_dominant(4, &mut rng).unwrap();
    let y = random_diagonally_dominant(4, &mut rng).unwrap();
    let lhs = determinant(&x.multiply(&y).unwrap()).unwrap();
    let rhs = determinant(&x).unwrap() * determinant(&y).unwrap();
    assert_relative_eq!(lhs, rhs, max_relative = 1e-9);
}

#[test]
fn determinant_requires_square() {
    let err = determinant(&Matrix::zeros(2, 3).unwrap()).unwrap_err();
    assert_eq!(
        err,
        MatrixError::Shape(ShapeError {
            op: Operation::Determinant,
            left: Shape::new(2, 3),
            right: None,
        })
    );
    assert_eq!(err.to_string(), "determinant requires a square matrix, got 2x3");
}

// ---------------------------------------------------------------------------
// Inverse
// ---------------------------------------------------------------------------

#[test]
fn inverse_of_two_by_two() {
    let inv = inverse(&a()).unwrap();
    let expected = m(&[&[-2.0, 1.0], &[1.5, -0.5]]);
    assert!(inv.approx_eq(&expected, 1e-12), "{}", inv);
}

#[test]
fn inverse_of_one_by_one() {
    assert_eq!(inverse(&m(&[&[4.0]])).unwrap(), m(&[&[0.25]]));
    assert!(matches!(
        inverse(&m(&[&[0.0]])),
        Err(MatrixError::SingularMatrix { column: 0, .. })
    ));
}

#[test]
fn inverse_of_singular_matrix_fails() {
    let err = inverse(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).unwrap_err();
    assert_eq!(
        err,
        MatrixError::SingularMatrix {
            column: 1,
            magnitude: 0.0
        }
    );
    assert!(err.to_string().starts_with("matrix is singular"));
}

#[test]
fn inverse_of_zero_matrix_fails() {
    assert!(matches!(
        inverse(&Matrix::zeros(3, 3).unwrap()),
        Err(MatrixError::SingularMatrix { column: 0, .. })
    ));
}

#[test]
fn inverse_requires_square() {
    assert!(matches!(
        inverse(&Matrix::zeros(3, 2).unwrap()),
        Err(MatrixError::Shape(ShapeError {
            op: Operation::Inverse,
            right: None,
            ..
        }))
    ));
}

#[test]
fn product_with_inverse_is_identity() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in 1..=8 {
        let x = random_diagonally_dominant(n, &mut rng).unwrap();
        let inv = inverse(&x).unwrap();
        let eye = Matrix::identity(n).unwrap();
        assert!(x.multiply(&inv).unwrap().approx_eq(&eye, 1e-9), "n = {}", n);
        assert!(inv.multiply(&x).unwrap().approx_eq(&eye, 1e-9), "n = {}", n);
    }
}

#[test]
fn inverse_does_not_mutate_input() {
    let x = a();
    let _ = inverse(&x).unwrap();
    assert_eq!(x, a());
}

#[test]
fn pivot_tolerance_controls_singularity() {
    let nearly = m(&[&[1.0, 0.0], &[0.0, 1e-12]]);
    assert!(matches!(
        inverse(&nearly),
        Err(MatrixError::SingularMatrix { column: 1, .. })
    ));
    let inv = inverse_with_tolerance(&nearly, 1e-14).unwrap();
    assert_relative_eq!(inv[(1, 1)], 1e12, max_relative = 1e-12);

    let loose = EngineConfig {
        tolerance: 1e-14,
        ..EngineConfig::default()
    };
    assert!(loose.inverse(&nearly).is_ok());
    assert!(EngineConfig::default().inverse(&nearly).is_err());
}

#[test]
fn non_positive_tolerance_is_rejected() {
    for tolerance in [0.0, -1e-10, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            inverse_with_tolerance(&a(), tolerance),
            Err(MatrixError::InvalidTolerance { .. })
        ));
        assert!(matches!(
            solve_with_tolerance(&a(), &m(&[&[1.0], &[1.0]]), tolerance),
            Err(MatrixError::InvalidTolerance { .. })
        ));
        assert!(row_reduce_with_tolerance(&a(), tolerance).is_err());
    }
    let zero = EngineConfig::new(0.0, 1e-9);
    assert!(matches!(
        zero.inverse(&a()),
        Err(MatrixError::InvalidTolerance { .. })
    ));
    assert!(zero.rank(&a()).is_err());
}

#[test]
fn round_off_residue_never_counts_as_a_pivot() {
    let singular = [
        m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]),
        m(&[&[0.1, 0.3], &[0.3, 0.9]]),
    ];
    for x in &singular {
        assert!(matches!(
            inverse(x),
            Err(MatrixError::SingularMatrix { .. })
        ));
        // Tolerances far below machine epsilon are raised to the floor.
        assert!(matches!(
            inverse_with_tolerance(x, 1e-300),
            Err(MatrixError::SingularMatrix { .. })
        ));
        let rhs = Matrix::from_elem(x.nrows(), 1, 1.0).unwrap();
        assert!(matches!(
            solve_with_tolerance(x, &rhs, 1e-300),
            Err(MatrixError::SingularMatrix { .. })
        ));
        assert!(row_reduce_with_tolerance(x, 1e-300).unwrap().rank() < x.nrows());
    }
}

// ---------------------------------------------------------------------------
// Solve
// ---------------------------------------------------------------------------

#[test]
fn solve_single_right_hand_side() {
    let x = solve(&a(), &m(&[&[5.0], &[6.0]])).unwrap();
    assert!(x.approx_eq(&m(&[&[-4.0], &[4.5]]), 1e-12), "{}", x);
}

#[test]
fn solve_matches_inverse_product() {
    let mut rng = StdRng::seed_from_u64(99);
    let x = random_diagonally_dominant(5, &mut rng).unwrap();
    let b = fahmatrix::helpers::random_uniform(5, 3, -4.0, 4.0, &mut rng).unwrap();
    let solved = solve(&x, &b).unwrap();
    let via_inverse = inverse(&x).unwrap().multiply(&b).unwrap();
    assert!(solved.approx_eq(&via_inverse, 1e-9));
    assert!(x.multiply(&solved).unwrap().approx_eq(&b, 1e-9));
}

#[test]
fn solve_rejects_bad_shapes_and_singular_systems() {
    assert!(matches!(
        solve(&a(), &Matrix::zeros(3, 1).unwrap()),
        Err(MatrixError::Shape(_))
    ));
    assert!(matches!(
        solve(&Matrix::zeros(2, 3).unwrap(), &Matrix::zeros(2, 1).unwrap()),
        Err(MatrixError::Shape(_))
    ));
    assert!(matches!(
        solve(&m(&[&[1.0, 2.0], &[2.0, 4.0]]), &m(&[&[1.0], &[2.0]])),
        Err(MatrixError::SingularMatrix { .. })
    ));
}

// ---------------------------------------------------------------------------
// Echelon forms and rank
// ---------------------------------------------------------------------------

#[test]
fn row_reduce_reports_pivots_and_swaps() {
    let echelon = row_reduce(&a());
    assert_eq!(echelon.pivot_columns, vec![0, 1]);
    assert_eq!(echelon.swaps, 1);
    assert_eq!(echelon.rank(), 2);
    assert_eq!(echelon.matrix[(1, 0)], 0.0);
    assert_eq!(echelon.matrix[(0, 0)], 3.0);
}

#[test]
fn reduced_row_echelon_of_rank_deficient_matrix() {
    let x = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
    let r = reduced_row_echelon(&x);
    let expected = m(&[&[1.0, 0.0, -1.0], &[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0]]);
    assert!(r.approx_eq(&expected, 1e-9), "{}", r);
    assert_eq!(rank(&x), 2);
}

#[test]
fn rank_of_rectangular_and_degenerate_matrices() {
    assert_eq!(rank(&Matrix::zeros(3, 4).unwrap()), 0);
    assert_eq!(rank(&Matrix::identity(4).unwrap()), 4);
    assert_eq!(rank(&m(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]])), 1);
    assert_eq!(rank(&m(&[&[1.0], &[0.0], &[5.0]])), 1);
}
