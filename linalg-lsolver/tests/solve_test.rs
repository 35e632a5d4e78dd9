use linalg_lsolver::{
    solve_linear_equation, DenseMatrix, DenseVector, GaussianElimination, LinalgError,
    SolveAlgorithm, SolveOutcome, SparseMatrix, StorageLayout, Triplet, Unsolvable,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

/// Strictly diagonally dominant `n x n` matrix with small integer off-diagonals.
fn diagonally_dominant(n: usize, layout: StorageLayout) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        2.0 * n as f64
                    } else {
                        ((i * 7 + j * 3) % 5) as f64 - 2.0
                    }
                })
                .collect()
        })
        .collect();
    DenseMatrix::from_rows(&rows, layout).unwrap()
}

#[test]
fn test_solve_linear_equation_example() {
    init_logger();
    let a = DenseMatrix::from_rows(
        &[vec![1.0, 0.0, 3.0], vec![4.0, 5.0, 2.0], vec![5.0, 7.0, 0.0]],
        StorageLayout::RowMajor,
    )
    .unwrap();
    let b = DenseVector::new(vec![1.0, 4.0, 2.0]);

    let x = solve_linear_equation(&a, &b).expect("system should be solvable");
    assert_approx_eq_vec(x.as_slice(), &[-8.0, 6.0, 3.0], 1e-6);

    // Residual A x - b vanishes.
    let residual = (&(&a * &x).unwrap() - &b).unwrap();
    assert!(residual.magnitude() < 1e-9);
}

#[test]
fn test_solve_linear_equation_singular() {
    init_logger();
    let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]], StorageLayout::RowMajor)
        .unwrap();
    assert!(solve_linear_equation(&a, &DenseVector::new(vec![1.0, 1.0])).is_none());
    assert!(solve_linear_equation(&a, &DenseVector::new(vec![3.0, 6.0])).is_none());
}

#[test]
fn test_solve_linear_equation_shape_mismatch() {
    init_logger();
    let wide = DenseMatrix::<f64>::zeros(2, 3, StorageLayout::ColumnMajor);
    assert!(solve_linear_equation(&wide, &DenseVector::zeros(2)).is_none());

    let square = DenseMatrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 2.0]], StorageLayout::RowMajor)
        .unwrap();
    assert!(solve_linear_equation(&square, &DenseVector::zeros(3)).is_none());
}

#[test]
fn test_solve_reports_reason() -> Result<(), LinalgError> {
    init_logger();
    let wide = DenseMatrix::<f64>::zeros(2, 3, StorageLayout::ColumnMajor);
    let outcome = GaussianElimination::default().solve(&wide, &DenseVector::zeros(2))?;
    match outcome {
        SolveOutcome::Unsolvable(Unsolvable::NotSquare { rows, cols }) => {
            assert_eq!((rows, cols), (2, 3));
        }
        other => panic!("Expected NotSquare, got {:?}", other),
    }

    let square = DenseMatrix::<f64>::zeros(2, 2, StorageLayout::ColumnMajor);
    let outcome = GaussianElimination::default().solve(&square, &DenseVector::zeros(3))?;
    assert_eq!(
        outcome,
        SolveOutcome::Unsolvable(Unsolvable::RhsLengthMismatch { rows: 2, len: 3 })
    );
    Ok(())
}

#[test]
fn test_solve_larger_system_both_layouts() {
    init_logger();
    let n = 20;
    let expected: Vec<f64> = (0..n).map(|i| i as f64 * 0.5 - 3.0).collect();
    let x_true = DenseVector::new(expected.clone());

    for layout in [StorageLayout::RowMajor, StorageLayout::ColumnMajor] {
        let a = diagonally_dominant(n, layout);
        let b = (&a * &x_true).unwrap();
        let x = solve_linear_equation(&a, &b).expect("diagonally dominant system is solvable");
        assert_approx_eq_vec(x.as_slice(), &expected, 1e-6);
    }
}

#[test]
fn test_solve_sparse_system() -> Result<(), LinalgError> {
    init_logger();
    // Tridiagonal 4x4: 4 on the diagonal, -1 next to it.
    let n = 4;
    let mut triplets = Vec::new();
    for i in 0..n {
        if i > 0 {
            triplets.push(Triplet::new(i, i - 1, -1.0));
        }
        triplets.push(Triplet::new(i, i, 4.0));
        if i + 1 < n {
            triplets.push(Triplet::new(i, i + 1, -1.0));
        }
    }
    let a = SparseMatrix::from_triplets(n, n, triplets)?;
    let b = DenseVector::new(vec![3.0, 2.0, 2.0, 3.0]);

    let outcome = GaussianElimination::new().solve(&a, &b)?;
    let x = outcome.solution().expect("tridiagonal system is solvable");
    assert_approx_eq_vec(x.as_slice(), &[1.0, 1.0, 1.0, 1.0], 1e-6);

    // Dense and sparse storage of the same system agree.
    let dense = GaussianElimination::new().solve(&a.to_dense(StorageLayout::RowMajor), &b)?;
    assert_eq!(outcome, dense);
    Ok(())
}

#[test]
fn test_solve_integer_system() {
    init_logger();
    let a = DenseMatrix::from_rows(&[vec![2, 1], vec![1, 3]], StorageLayout::ColumnMajor).unwrap();
    let b = DenseVector::new(vec![5, 10]);
    let x = solve_linear_equation(&a, &b).expect("system should be solvable");
    assert_approx_eq_vec(x.as_slice(), &[1.0, 3.0], 1e-6);
}
