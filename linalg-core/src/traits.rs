use bytemuck::{Pod, Zeroable};
use num_traits::{Num, NumCast, ToPrimitive};
use std::fmt::Debug;

use crate::error::{LinalgError, Result};
use crate::vector::DenseVector;

/// Absolute tolerance used for every "is this zero" decision in the library.
///
/// It is a fixed tolerance, not a relative one: systems with very large or
/// very small magnitudes may be reported singular (or not) unexpectedly.
pub const EPSILON: f64 = 1e-6;

/// Returns whether two doubles differ by less than [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Numeric element type accepted by vectors and matrices.
///
/// Implemented for every primitive integer and float type.
pub trait Scalar:
    Copy + Debug + Default + PartialEq + PartialOrd + Num + NumCast + Pod + Zeroable + Send + Sync
{
    /// Promotes the value to `f64`. Values with no `f64` representation become NaN.
    fn to_f64_lossy(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Returns whether the value lies within [`EPSILON`] of zero.
    fn is_approx_zero(self) -> bool {
        self.to_f64_lossy().abs() < EPSILON
    }
}

impl<T> Scalar for T where
    T: Copy
        + Debug
        + Default
        + PartialEq
        + PartialOrd
        + Num
        + NumCast
        + Pod
        + Zeroable
        + Send
        + Sync
{
}

/// Logical two-dimensional contract shared by dense and sparse storage.
///
/// Only `dims`, `at` and `set` are required. The row and column accessors have
/// element-wise default implementations that storage with a cheaper physical
/// path overrides.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements.
    type Value: Scalar;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Returns the logical element count, `rows * cols`.
    fn size(&self) -> usize {
        let (rows, cols) = self.dims();
        rows * cols
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }

    fn at(&self, row: usize, col: usize) -> Result<Self::Value>;

    fn set(&mut self, row: usize, col: usize, value: Self::Value) -> Result<()>;

    fn row(&self, row: usize) -> Result<DenseVector<Self::Value>> {
        if row >= self.rows() {
            return Err(LinalgError::out_of_bounds("Row", row, self.rows()));
        }
        (0..self.cols())
            .map(|col| self.at(row, col))
            .collect::<Result<Vec<_>>>()
            .map(DenseVector::new)
    }

    fn col(&self, col: usize) -> Result<DenseVector<Self::Value>> {
        if col >= self.cols() {
            return Err(LinalgError::out_of_bounds("Column", col, self.cols()));
        }
        (0..self.rows())
            .map(|row| self.at(row, col))
            .collect::<Result<Vec<_>>>()
            .map(DenseVector::new)
    }

    fn set_row(&mut self, row: usize, values: &DenseVector<Self::Value>) -> Result<()> {
        if row >= self.rows() {
            return Err(LinalgError::out_of_bounds("Row", row, self.rows()));
        }
        if values.len() != self.cols() {
            return Err(LinalgError::InvalidDimensions(format!(
                "Row length ({}) must match column count ({})",
                values.len(),
                self.cols()
            )));
        }
        for (col, &value) in values.iter().enumerate() {
            self.set(row, col, value)?;
        }
        Ok(())
    }

    fn set_col(&mut self, col: usize, values: &DenseVector<Self::Value>) -> Result<()> {
        if col >= self.cols() {
            return Err(LinalgError::out_of_bounds("Column", col, self.cols()));
        }
        if values.len() != self.rows() {
            return Err(LinalgError::InvalidDimensions(format!(
                "Column length ({}) must match row count ({})",
                values.len(),
                self.rows()
            )));
        }
        for (row, &value) in values.iter().enumerate() {
            self.set(row, col, value)?;
        }
        Ok(())
    }
}

/// Generic trait representing a vector.
pub trait Vector: Debug {
    /// The underlying numeric type of the vector elements.
    type Value: Scalar;

    /// Returns the number of elements in the vector.
    fn len(&self) -> usize;

    /// Checks if the vector is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
