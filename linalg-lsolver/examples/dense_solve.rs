use linalg_lsolver::{
    DenseMatrix, DenseVector, GaussianElimination, LinalgError, SolveAlgorithm, SolveOutcome,
    StorageLayout,
};
use std::time::Instant;

/// Creates an n x n diagonally dominant matrix.
/// Diagonal entries are `n`, off-diagonal entries lie in [-0.5, 0.5].
fn create_dominant_matrix(n: usize, layout: StorageLayout) -> Result<DenseMatrix<f64>, LinalgError> {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        n as f64
                    } else {
                        ((i * 31 + j * 17) % 11) as f64 / 10.0 - 0.5
                    }
                })
                .collect()
        })
        .collect();
    DenseMatrix::from_rows(&rows, layout)
}

/// Creates a vector b of size n with b[i] = sin(i / n).
fn create_sin_vector(n: usize) -> DenseVector<f64> {
    DenseVector::new((0..n).map(|i| (i as f64 / n as f64).sin()).collect())
}

fn main() -> Result<(), LinalgError> {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let n = 200;
    log::info!("Setting up {}x{} dominant matrices and sin vector b...", n, n);
    let a = create_dominant_matrix(n, StorageLayout::RowMajor)?;
    let b_mat = create_dominant_matrix(n, StorageLayout::ColumnMajor)?;
    let b = create_sin_vector(n);

    let start_time = Instant::now();
    let product = (&a * &b_mat)?;
    log::info!(
        "Multiplied {}x{} by {}x{} in {:?} (first element {:.3})",
        a.rows(),
        a.cols(),
        b_mat.rows(),
        b_mat.cols(),
        start_time.elapsed(),
        product.at(0, 0)?
    );

    let algorithm = GaussianElimination::new();
    log::info!("Running Gaussian elimination...");
    log::info!("  Size: {}", n);
    log::info!("  Pivot tolerance: {:e}", algorithm.pivot_tolerance);

    let start_time = Instant::now();
    let outcome = algorithm.solve(&a, &b)?;
    let duration = start_time.elapsed();

    match outcome {
        SolveOutcome::Solved(result) => {
            let residual = (&(&a * &result.x)? - &b)?;
            log::info!("Solve finished in {:?}", duration);
            log::info!("  Row swaps: {}", result.metadata.row_swaps);
            log::info!(
                "  Smallest pivot: {:e}",
                result.metadata.min_pivot_magnitude
            );
            log::info!("  Residual norm ||Ax - b||: {:e}", residual.magnitude());
        }
        SolveOutcome::Unsolvable(reason) => {
            log::error!("System could not be solved: {}", reason);
        }
    }
    Ok(())
}
