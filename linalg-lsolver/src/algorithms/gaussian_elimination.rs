use crate::algorithms::{GaussianElimination, SolveAlgorithm, SolveOutcome, SolveResult, Unsolvable};
use linalg_core::{DenseMatrix, DenseVector, LinalgError, Matrix, Scalar, StorageLayout};
use log::{debug, trace, warn};

/// Bookkeeping from a successful elimination.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationMetadata {
    /// Number of row exchanges made by partial pivoting.
    pub row_swaps: usize,
    /// Smallest pivot magnitude accepted. `f64::INFINITY` for an empty system.
    pub min_pivot_magnitude: f64,
}

enum Elimination {
    Complete(EliminationMetadata),
    Singular { column: usize, magnitude: f64 },
}

impl<M: Matrix> SolveAlgorithm<M> for GaussianElimination {
    type Metadata = EliminationMetadata;

    fn solve(
        &self,
        a: &M,
        b: &DenseVector<M::Value>,
    ) -> Result<SolveOutcome<EliminationMetadata>, LinalgError> {
        if let Some(reason) = self.validate_inputs(a, b) {
            warn!("Rejecting linear system: {}", reason);
            return Ok(SolveOutcome::Unsolvable(reason));
        }

        let mut u = promote(a)?;
        let mut y = b.map(|v| v.to_f64_lossy());
        debug!(
            "Solving {}x{} system by Gaussian elimination (pivot tolerance {:e})",
            u.rows(),
            u.cols(),
            self.pivot_tolerance
        );

        match self.forward_eliminate(&mut u, &mut y)? {
            Elimination::Singular { column, magnitude } => {
                warn!(
                    "Matrix is singular at column {} (pivot magnitude {:e})",
                    column, magnitude
                );
                Ok(SolveOutcome::Unsolvable(Unsolvable::SingularPivot {
                    column,
                    magnitude,
                }))
            }
            Elimination::Complete(metadata) => {
                debug!(
                    "Forward elimination done: {} row swaps, smallest pivot {:e}",
                    metadata.row_swaps, metadata.min_pivot_magnitude
                );
                let x = back_substitute(&u, y)?;
                Ok(SolveOutcome::Solved(SolveResult { x, metadata }))
            }
        }
    }
}

/// Copies `a` into a row-major `f64` working matrix, whatever its storage.
fn promote<M: Matrix>(a: &M) -> Result<DenseMatrix<f64>, LinalgError> {
    let (rows, cols) = a.dims();
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push(a.at(row, col)?.to_f64_lossy());
        }
    }
    DenseMatrix::with_layout(rows, cols, data, StorageLayout::RowMajor)
}

impl GaussianElimination {
    /// Reduces `u` to unit upper-triangular form, applying the same row
    /// operations to `y`.
    fn forward_eliminate(
        &self,
        u: &mut DenseMatrix<f64>,
        y: &mut DenseVector<f64>,
    ) -> Result<Elimination, LinalgError> {
        let n = u.rows();
        let mut row_swaps = 0;
        let mut min_pivot_magnitude = f64::INFINITY;

        for i in 0..n {
            // First row holding the largest magnitude in column i.
            let mut pivot_row = i;
            let mut magnitude = u.at(i, i)?.abs();
            for r in i + 1..n {
                let candidate = u.at(r, i)?.abs();
                if candidate > magnitude {
                    pivot_row = r;
                    magnitude = candidate;
                }
            }
            if pivot_row != i {
                u.swap_rows(i, pivot_row)?;
                y.swap(i, pivot_row)?;
                row_swaps += 1;
                debug!("Pivot swap: row {} <-> row {}", i, pivot_row);
            }

            if magnitude.is_nan() || magnitude < self.pivot_tolerance {
                return Ok(Elimination::Singular {
                    column: i,
                    magnitude,
                });
            }
            min_pivot_magnitude = min_pivot_magnitude.min(magnitude);

            let inv_pivot = 1.0 / u.at(i, i)?;
            for col in 0..n {
                *u.at_mut(i, col)? *= inv_pivot;
            }
            u.set(i, i, 1.0)?;
            y[i] *= inv_pivot;

            for j in i + 1..n {
                let factor = u.at(j, i)?;
                if factor == 0.0 {
                    continue;
                }
                for col in i..n {
                    let pivot_value = u.at(i, col)?;
                    *u.at_mut(j, col)? -= factor * pivot_value;
                }
                y[j] -= factor * y[i];
                trace!("Eliminated column {} from row {} (factor {})", i, j, factor);
            }
        }

        Ok(Elimination::Complete(EliminationMetadata {
            row_swaps,
            min_pivot_magnitude,
        }))
    }
}

/// Solves `u x = y` for unit upper-triangular `u`, walking pivots last to first.
fn back_substitute(
    u: &DenseMatrix<f64>,
    y: DenseVector<f64>,
) -> Result<DenseVector<f64>, LinalgError> {
    let mut x = y;
    for i in (0..u.rows()).rev() {
        let xi = x[i];
        for j in 0..i {
            x[j] -= u.at(j, i)? * xi;
        }
    }
    Ok(x)
}
