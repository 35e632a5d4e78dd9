//! Physical storage orders for dense matrices and the permutations between them.
//!
//! Element addressing goes through [`StorageLayout::offset`]. Callers still
//! match on the layout where a row or column is contiguous in one order and
//! strided in the other.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which a matrix's elements are packed into its flat buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageLayout {
    /// `(row, col)` lives at `row * cols + col`.
    RowMajor,
    /// `(row, col)` lives at `col * rows + row`.
    #[default]
    ColumnMajor,
}

impl StorageLayout {
    /// Flat buffer offset of `(row, col)` in a `rows x cols` matrix.
    #[inline]
    pub fn offset(self, row: usize, col: usize, rows: usize, cols: usize) -> usize {
        match self {
            StorageLayout::RowMajor => row * cols + col,
            StorageLayout::ColumnMajor => col * rows + row,
        }
    }

    /// The other layout.
    pub fn transposed(self) -> Self {
        match self {
            StorageLayout::RowMajor => StorageLayout::ColumnMajor,
            StorageLayout::ColumnMajor => StorageLayout::RowMajor,
        }
    }

    /// Re-packs `data`, currently stored in `self` order, into `target` order.
    pub fn permute<T: Copy>(self, target: StorageLayout, data: &[T], rows: usize, cols: usize) -> Vec<T> {
        match (self, target) {
            (StorageLayout::RowMajor, StorageLayout::ColumnMajor) => to_column_major(data, rows, cols),
            (StorageLayout::ColumnMajor, StorageLayout::RowMajor) => to_row_major(data, rows, cols),
            _ => data.to_vec(),
        }
    }
}

/// Whether re-packing `data` as a `rows x cols` matrix changes its order.
fn needs_permutation<T>(data: &[T], rows: usize, cols: usize) -> bool {
    rows > 1 && cols > 1 && rows.checked_mul(cols) == Some(data.len())
}

/// Returns a column-major buffer to read as row-major.
///
/// `data` holds `rows * cols` elements in column-major order. Single rows and
/// single columns are returned unchanged, and so is a buffer whose length is
/// not `rows * cols`.
pub fn to_row_major<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    if !needs_permutation(data, rows, cols) {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    for row in 0..rows {
        out.extend((0..cols).map(|col| data[col * rows + row]));
    }
    out
}

/// Returns a row-major buffer to read as column-major.
///
/// Inverse of [`to_row_major`] for the same `rows` and `cols`, with the same
/// pass-through for mismatched lengths.
pub fn to_column_major<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    if !needs_permutation(data, rows, cols) {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    for col in 0..cols {
        out.extend((0..rows).map(|row| data[row * cols + col]));
    }
    out
}
