use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, Result};
use crate::layout::StorageLayout;
use crate::traits::{Matrix, Scalar};
use num_traits::Zero;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a sparse matrix as a list of coordinate triplets (COO).
///
/// Entries are kept in insertion order and each `(row, col)` appears at most
/// once. Positions without an entry read as zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "SparseMatrixParts<T>",
        bound(deserialize = "T: Scalar + Deserialize<'de>")
    )
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    rows: usize,
    cols: usize,
    entries: Vec<Triplet<T>>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SparseMatrixParts<T> {
    rows: usize,
    cols: usize,
    entries: Vec<Triplet<T>>,
}

#[cfg(feature = "serde")]
impl<T: Scalar> TryFrom<SparseMatrixParts<T>> for SparseMatrix<T> {
    type Error = LinalgError;

    fn try_from(parts: SparseMatrixParts<T>) -> Result<Self> {
        Self::from_triplets(parts.rows, parts.cols, parts.entries)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet<T> {
    row: usize,
    col: usize,
    value: T,
}

impl<T: Copy> Triplet<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Triplet { row, col, value }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Scalar> SparseMatrix<T> {
    /// Creates an all-zero sparse matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        SparseMatrix {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Builds a matrix from coordinate triplets.
    ///
    /// A later triplet for the same position overwrites an earlier one, and
    /// approximately-zero values leave the position empty.
    pub fn from_triplets(rows: usize, cols: usize, triplets: Vec<Triplet<T>>) -> Result<Self> {
        let mut matrix = SparseMatrix::new(rows, cols);
        for Triplet { row, col, value } in triplets {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Collects the non-zero entries of a dense matrix, row by row.
    pub fn from_dense(dense: &DenseMatrix<T>) -> Self {
        let (rows, cols) = (dense.rows(), dense.cols());
        let layout = dense.layout();
        let mut entries = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let value = dense.data()[layout.offset(row, col, rows, cols)];
                if !value.is_approx_zero() {
                    entries.push(Triplet { row, col, value });
                }
            }
        }
        SparseMatrix {
            rows,
            cols,
            entries,
        }
    }

    /// Expands into a dense matrix stored in `layout`.
    pub fn to_dense(&self, layout: StorageLayout) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.rows, self.cols, layout);
        let data = dense.data_mut();
        for entry in &self.entries {
            data[layout.offset(entry.row, entry.col, self.rows, self.cols)] = entry.value;
        }
        dense
    }

    /// Returns the dimensions of the matrix (rows, cols).
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn position(&self, row: usize, col: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.row == row && entry.col == col)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LinalgError::out_of_bounds("Row", row, self.rows));
        }
        if col >= self.cols {
            return Err(LinalgError::out_of_bounds("Column", col, self.cols));
        }
        Ok(())
    }

    /// Gets the stored value at `(row, col)`.
    ///
    /// Returns `None` both for empty positions and for positions outside the
    /// matrix; [`Matrix::at`] distinguishes the two.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.position(row, col).map(|i| self.entries[i].value)
    }

    pub fn iter(&self) -> SparseMatrixIter<'_, T> {
        SparseMatrixIter {
            entries: self.entries.iter(),
        }
    }
}

/// Iterator over the stored entries of a [`SparseMatrix`] in insertion order.
pub struct SparseMatrixIter<'a, T> {
    entries: std::slice::Iter<'a, Triplet<T>>,
}

impl<T: Copy> Iterator for SparseMatrixIter<'_, T> {
    type Item = Triplet<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T: Scalar> Matrix for SparseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn at(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.get(row, col).unwrap_or_else(T::zero))
    }

    /// Writing an approximately-zero value removes the entry.
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        match (self.position(row, col), value.is_approx_zero()) {
            (Some(i), true) => {
                self.entries.remove(i);
            }
            (Some(i), false) => self.entries[i].value = value,
            (None, true) => {}
            (None, false) => self.entries.push(Triplet { row, col, value }),
        }
        Ok(())
    }
}
