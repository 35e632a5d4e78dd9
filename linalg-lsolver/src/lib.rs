//! `linalg-lsolver`: linear equation solvers built on `linalg-core`.
//!
//! This library solves systems of linear equations of the form Ax = b. A
//! singular or ill-shaped system is reported as an outcome, never as a panic.

pub mod algorithms;

pub use algorithms::{
    EliminationMetadata, GaussianElimination, SolveAlgorithm, SolveOutcome, SolveResult,
    Unsolvable,
};
// Re-export from linalg_core
pub use linalg_core::{
    DenseMatrix, DenseVector, LinalgError, Matrix, Scalar, SparseMatrix, StorageLayout, Triplet,
    Vector,
};

/// Solves `a x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when the system is unsolvable: `a` is not square, `b` does
/// not have one entry per row, or a pivot falls below [`linalg_core::EPSILON`].
/// The solution is always in `f64`, whatever the input element type. Use
/// [`GaussianElimination`] directly for the reason and the elimination
/// metadata.
pub fn solve_linear_equation<T: Scalar>(
    a: &DenseMatrix<T>,
    b: &DenseVector<T>,
) -> Option<DenseVector<f64>> {
    match GaussianElimination::default().solve(a, b) {
        Ok(outcome) => outcome.into_solution(),
        Err(e) => {
            log::error!("Gaussian elimination failed: {}", e);
            None
        }
    }
}
