//! # Linear Algebra Core Library
//!
//! Dense vectors and matrices with a selectable storage layout, a coordinate
//! list sparse matrix, and the arithmetic the solvers build on.

pub mod dense_matrix;
pub mod error;
pub mod layout;
pub mod ops;
pub mod sparse_matrix;
pub mod traits;
pub mod vector;

pub use dense_matrix::DenseMatrix;
pub use error::{LinalgError, Result};
pub use layout::StorageLayout;
pub use ops::{cross_product, dot_product, multiply, multiply_vector};
pub use sparse_matrix::{SparseMatrix, SparseMatrixIter, Triplet};
pub use traits::{approx_eq, Matrix, Scalar, Vector, EPSILON};
pub use vector::DenseVector;
