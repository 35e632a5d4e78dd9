use linalg_core::{DenseVector, LinalgError, Matrix, Vector, EPSILON};
use thiserror::Error;

pub mod gaussian_elimination;

pub use gaussian_elimination::EliminationMetadata;

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult<M> {
    pub x: DenseVector<f64>, // Solution vector
    pub metadata: M,         // Metadata about the solve process
}

/// Result of one solve attempt.
///
/// A singular or ill-shaped system is an expected outcome, not an error, so
/// it is reported here rather than through [`LinalgError`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome<M> {
    Solved(SolveResult<M>),
    Unsolvable(Unsolvable),
}

impl<M> SolveOutcome<M> {
    pub fn is_solvable(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&DenseVector<f64>> {
        match self {
            SolveOutcome::Solved(result) => Some(&result.x),
            SolveOutcome::Unsolvable(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<DenseVector<f64>> {
        match self {
            SolveOutcome::Solved(result) => Some(result.x),
            SolveOutcome::Unsolvable(_) => None,
        }
    }
}

/// Why a system could not be solved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unsolvable {
    #[error("Coefficient matrix must be square (dims: {rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("Coefficient matrix rows ({rows}) must match RHS vector length ({len})")]
    RhsLengthMismatch { rows: usize, len: usize },

    #[error("Matrix is singular: best pivot for column {column} has magnitude {magnitude:e}")]
    SingularPivot { column: usize, magnitude: f64 },
}

// --- Algorithm Trait Definition ---
/// Trait representing a specific linear system solving algorithm.
/// Generic over the Matrix type (Sparse/Dense) it supports.
pub trait SolveAlgorithm<M: Matrix> {
    type Metadata: std::fmt::Debug;

    /// Solves the linear system Ax = b for x.
    ///
    /// # Arguments
    ///
    /// * `a` - The coefficient matrix A.
    /// * `b` - The right-hand side vector b.
    ///
    /// # Returns
    ///
    /// The outcome of the attempt. `Err` is reserved for failures of the
    /// underlying storage operations, never for singular input.
    fn solve(
        &self,
        a: &M,
        b: &DenseVector<M::Value>,
    ) -> Result<SolveOutcome<Self::Metadata>, LinalgError>;

    /// Shape checks shared by every algorithm: `a` square and `b` as long as
    /// `a` has rows.
    fn validate_inputs(&self, a: &M, b: &DenseVector<M::Value>) -> Option<Unsolvable> {
        let (rows, cols) = a.dims();
        if !a.is_square() {
            return Some(Unsolvable::NotSquare { rows, cols });
        }
        if rows != Vector::len(b) {
            return Some(Unsolvable::RhsLengthMismatch {
                rows,
                len: Vector::len(b),
            });
        }
        None
    }
}

// --- Algorithm Struct Definitions ---

/// Gaussian elimination with partial pivoting followed by back-substitution.
#[derive(Debug, Clone)]
pub struct GaussianElimination {
    /// Pivots with a smaller magnitude mark the system as singular.
    pub pivot_tolerance: f64,
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self {
            pivot_tolerance: EPSILON,
        }
    }
}

impl GaussianElimination {
    /// Creates a new instance of the Gaussian elimination algorithm with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance of the Gaussian elimination algorithm with specified parameters.
    pub fn with_params(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }
}
