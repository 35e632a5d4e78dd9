use crate::error::{LinalgError, Result};
use crate::layout::StorageLayout;
use crate::traits::{Matrix, Scalar};
use crate::vector::DenseVector;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dense matrix owning a flat buffer in either row-major or column-major order.
///
/// Logical `(row, col)` access is identical for both layouts; only the cost of
/// row-wise versus column-wise work differs. Operations that work along the
/// physical layout copy contiguous runs, the others gather or scatter with a
/// stride. Convert the layout first before bulk work against the grain.
///
/// Equality compares the representation: two matrices holding the same logical
/// values in different layouts are *not* equal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "DenseMatrixParts<T>",
        bound(deserialize = "T: Scalar + Deserialize<'de>")
    )
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    layout: StorageLayout,
    data: Vec<T>, // data.len() == rows * cols, addressed through `layout`
}

/// Unvalidated wire form of a [`DenseMatrix`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DenseMatrixParts<T> {
    rows: usize,
    cols: usize,
    layout: StorageLayout,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Scalar> TryFrom<DenseMatrixParts<T>> for DenseMatrix<T> {
    type Error = LinalgError;

    fn try_from(parts: DenseMatrixParts<T>) -> Result<Self> {
        Self::with_layout(parts.rows, parts.cols, parts.data, parts.layout)
    }
}

impl<T: Scalar> Default for DenseMatrix<T> {
    fn default() -> Self {
        Self::empty(StorageLayout::default())
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a new DenseMatrix from column-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        Self::with_layout(rows, cols, data, StorageLayout::ColumnMajor)
    }

    /// Creates a new DenseMatrix from data packed in the given layout.
    pub fn with_layout(
        rows: usize,
        cols: usize,
        data: Vec<T>,
        layout: StorageLayout,
    ) -> Result<Self> {
        let Some(size) = rows.checked_mul(cols) else {
            return Err(LinalgError::InvalidDimensions(format!(
                "Element count of {}x{} overflows usize",
                rows, cols
            )));
        };
        if data.len() != size {
            return Err(LinalgError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            layout,
            data,
        })
    }

    /// Creates a new DenseMatrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize, layout: StorageLayout) -> Self {
        Self {
            rows,
            cols,
            layout,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Creates the 0x0 matrix.
    pub fn empty(layout: StorageLayout) -> Self {
        Self::zeros(0, 0, layout)
    }

    /// Builds a matrix from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<T>], layout: StorageLayout) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, ragged)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(LinalgError::InvalidDimensions(format!(
                "Row {} has length {} but row 0 has length {}",
                i,
                ragged.len(),
                cols
            )));
        }
        let row_major: Vec<T> = rows.iter().flatten().copied().collect();
        let data = StorageLayout::RowMajor.permute(layout, &row_major, rows.len(), cols);
        Self::with_layout(rows.len(), cols, data, layout)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True when the matrix holds no elements (any dimension is zero).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn layout(&self) -> StorageLayout {
        self.layout
    }

    /// Returns a slice view of the underlying buffer, in physical order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Replaces the buffer, keeping shape and layout.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<()> {
        if data.len() != self.size() {
            return Err(LinalgError::InvalidDimensions(format!(
                "Data length ({}) does not match matrix size ({})",
                data.len(),
                self.size()
            )));
        }
        self.data = data;
        Ok(())
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        self.layout.offset(row, col, self.rows, self.cols)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LinalgError::out_of_bounds("Row", row, self.rows));
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(LinalgError::out_of_bounds("Column", col, self.cols));
        }
        Ok(())
    }

    pub fn at(&self, row: usize, col: usize) -> Result<T> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.check_row(row)?;
        self.check_col(col)?;
        let offset = self.offset(row, col);
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        *self.at_mut(row, col)? = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<DenseVector<T>> {
        self.check_row(row)?;
        let values = match self.layout {
            StorageLayout::RowMajor => self.data[row * self.cols..(row + 1) * self.cols].to_vec(),
            StorageLayout::ColumnMajor => (0..self.cols)
                .map(|col| self.data[self.offset(row, col)])
                .collect(),
        };
        Ok(DenseVector::new(values))
    }

    pub fn col(&self, col: usize) -> Result<DenseVector<T>> {
        self.check_col(col)?;
        let values = match self.layout {
            StorageLayout::ColumnMajor => self.data[col * self.rows..(col + 1) * self.rows].to_vec(),
            StorageLayout::RowMajor => (0..self.rows)
                .map(|row| self.data[self.offset(row, col)])
                .collect(),
        };
        Ok(DenseVector::new(values))
    }

    pub fn set_row(&mut self, row: usize, values: &DenseVector<T>) -> Result<()> {
        self.check_row(row)?;
        if values.len() != self.cols {
            return Err(LinalgError::InvalidDimensions(format!(
                "Row length ({}) must match column count ({})",
                values.len(),
                self.cols
            )));
        }
        match self.layout {
            StorageLayout::RowMajor => {
                let start = row * self.cols;
                self.data[start..start + self.cols].copy_from_slice(values.as_slice());
            }
            StorageLayout::ColumnMajor => {
                for (col, &value) in values.iter().enumerate() {
                    let offset = self.offset(row, col);
                    self.data[offset] = value;
                }
            }
        }
        Ok(())
    }

    pub fn set_col(&mut self, col: usize, values: &DenseVector<T>) -> Result<()> {
        self.check_col(col)?;
        if values.len() != self.rows {
            return Err(LinalgError::InvalidDimensions(format!(
                "Column length ({}) must match row count ({})",
                values.len(),
                self.rows
            )));
        }
        match self.layout {
            StorageLayout::ColumnMajor => {
                let start = col * self.rows;
                self.data[start..start + self.rows].copy_from_slice(values.as_slice());
            }
            StorageLayout::RowMajor => {
                for (row, &value) in values.iter().enumerate() {
                    let offset = self.offset(row, col);
                    self.data[offset] = value;
                }
            }
        }
        Ok(())
    }

    /// Exchanges two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        if a == b {
            return Ok(());
        }
        for col in 0..self.cols {
            let (oa, ob) = (self.offset(a, col), self.offset(b, col));
            self.data.swap(oa, ob);
        }
        Ok(())
    }

    /// Inserts `values` as a new row at `pos`, shifting later rows down.
    ///
    /// `pos == rows()` appends. A 0x0 matrix accepts a row of any length and
    /// takes its column count from it.
    pub fn add_row(&mut self, pos: usize, values: &DenseVector<T>) -> Result<()> {
        if pos > self.rows {
            return Err(LinalgError::OutOfBounds(format!(
                "Row insertion position {} must not exceed {}",
                pos, self.rows
            )));
        }
        let cols = if self.rows == 0 && self.cols == 0 {
            values.len()
        } else {
            self.cols
        };
        if values.len() != cols {
            return Err(LinalgError::InvalidDimensions(format!(
                "Row length ({}) must match column count ({})",
                values.len(),
                cols
            )));
        }

        match self.layout {
            StorageLayout::RowMajor => {
                let start = pos * cols;
                self.data.splice(start..start, values.iter().copied());
            }
            StorageLayout::ColumnMajor => {
                // Columns before `col` already have rows + 1 entries.
                for (col, &value) in values.iter().enumerate() {
                    self.data.insert(col * (self.rows + 1) + pos, value);
                }
            }
        }
        self.rows += 1;
        self.cols = cols;
        Ok(())
    }

    /// Inserts `values` as a new column at `pos`, shifting later columns right.
    ///
    /// `pos == cols()` appends. A 0x0 matrix accepts a column of any length and
    /// takes its row count from it.
    pub fn add_col(&mut self, pos: usize, values: &DenseVector<T>) -> Result<()> {
        if pos > self.cols {
            return Err(LinalgError::OutOfBounds(format!(
                "Column insertion position {} must not exceed {}",
                pos, self.cols
            )));
        }
        let rows = if self.rows == 0 && self.cols == 0 {
            values.len()
        } else {
            self.rows
        };
        if values.len() != rows {
            return Err(LinalgError::InvalidDimensions(format!(
                "Column length ({}) must match row count ({})",
                values.len(),
                rows
            )));
        }

        match self.layout {
            StorageLayout::ColumnMajor => {
                let start = pos * rows;
                self.data.splice(start..start, values.iter().copied());
            }
            StorageLayout::RowMajor => {
                // Rows before `row` already have cols + 1 entries.
                for (row, &value) in values.iter().enumerate() {
                    self.data.insert(row * (self.cols + 1) + pos, value);
                }
            }
        }
        self.cols += 1;
        self.rows = rows;
        Ok(())
    }

    pub fn remove_row(&mut self, pos: usize) -> Result<()> {
        self.check_row(pos)?;
        match self.layout {
            StorageLayout::RowMajor => {
                self.data.drain(pos * self.cols..(pos + 1) * self.cols);
            }
            StorageLayout::ColumnMajor => {
                let rows = self.rows;
                let mut index = 0;
                self.data.retain(|_| {
                    let keep = index % rows != pos;
                    index += 1;
                    keep
                });
            }
        }
        self.rows -= 1;
        Ok(())
    }

    pub fn remove_col(&mut self, pos: usize) -> Result<()> {
        self.check_col(pos)?;
        match self.layout {
            StorageLayout::ColumnMajor => {
                self.data.drain(pos * self.rows..(pos + 1) * self.rows);
            }
            StorageLayout::RowMajor => {
                let cols = self.cols;
                let mut index = 0;
                self.data.retain(|_| {
                    let keep = index % cols != pos;
                    index += 1;
                    keep
                });
            }
        }
        self.cols -= 1;
        Ok(())
    }

    fn check_block(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> Result<()> {
        if r0 > r1 || r1 > self.rows {
            return Err(LinalgError::bad_range("Row", r0, r1, self.rows));
        }
        if c0 > c1 || c1 > self.cols {
            return Err(LinalgError::bad_range("Column", c0, c1, self.cols));
        }
        Ok(())
    }

    /// Copies out the block `[r0, r1) x [c0, c1)`, keeping this matrix's layout.
    pub fn sub_matrix(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> Result<Self> {
        self.check_block(r0, r1, c0, c1)?;
        let mut block = match self.layout {
            StorageLayout::RowMajor => Self::zeros(0, c1 - c0, self.layout),
            StorageLayout::ColumnMajor => Self::zeros(r1 - r0, 0, self.layout),
        };
        match self.layout {
            StorageLayout::RowMajor => {
                for row in r0..r1 {
                    let line = self.row(row)?.sub_vector(c0, c1)?;
                    block.add_row(block.rows(), &line)?;
                }
            }
            StorageLayout::ColumnMajor => {
                for col in c0..c1 {
                    let line = self.col(col)?.sub_vector(r0, r1)?;
                    block.add_col(block.cols(), &line)?;
                }
            }
        }
        Ok(block)
    }

    /// Overwrites the block `[r0, r1) x [c0, c1)` with `block`.
    pub fn set_sub_matrix(
        &mut self,
        r0: usize,
        r1: usize,
        c0: usize,
        c1: usize,
        block: &Self,
    ) -> Result<()> {
        self.check_block(r0, r1, c0, c1)?;
        if block.dims() != (r1 - r0, c1 - c0) {
            return Err(LinalgError::InvalidDimensions(format!(
                "Block dimensions ({}x{}) must match target range ({}x{})",
                block.rows(),
                block.cols(),
                r1 - r0,
                c1 - c0
            )));
        }
        match self.layout {
            StorageLayout::RowMajor => {
                for row in r0..r1 {
                    let start = self.offset(row, c0);
                    let line = block.row(row - r0)?;
                    self.data[start..start + (c1 - c0)].copy_from_slice(line.as_slice());
                }
            }
            StorageLayout::ColumnMajor => {
                for col in c0..c1 {
                    let start = self.offset(r0, col);
                    let line = block.col(col - c0)?;
                    self.data[start..start + (r1 - r0)].copy_from_slice(line.as_slice());
                }
            }
        }
        Ok(())
    }

    /// Re-packs the buffer into `layout` in place. No-op if already there.
    pub fn convert_to(&mut self, layout: StorageLayout) {
        if self.layout == layout {
            return;
        }
        log::debug!(
            "Converting {}x{} matrix from {:?} to {:?}",
            self.rows,
            self.cols,
            self.layout,
            layout
        );
        self.data = self.layout.permute(layout, &self.data, self.rows, self.cols);
        self.layout = layout;
    }

    pub fn convert_to_row_major(&mut self) {
        self.convert_to(StorageLayout::RowMajor);
    }

    pub fn convert_to_col_major(&mut self) {
        self.convert_to(StorageLayout::ColumnMajor);
    }

    /// Returns a copy stored in `layout`, leaving `self` untouched.
    pub fn to_layout(&self, layout: StorageLayout) -> Self {
        let mut out = self.clone();
        out.convert_to(layout);
        out
    }

    pub fn to_row_major(&self) -> Self {
        self.to_layout(StorageLayout::RowMajor)
    }

    pub fn to_col_major(&self) -> Self {
        self.to_layout(StorageLayout::ColumnMajor)
    }

    /// Maps every element through `f`, keeping shape and layout.
    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, f: F) -> DenseMatrix<U> {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl<T: Scalar> Matrix for DenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn at(&self, row: usize, col: usize) -> Result<T> {
        DenseMatrix::at(self, row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        DenseMatrix::set(self, row, col, value)
    }

    fn row(&self, row: usize) -> Result<DenseVector<T>> {
        DenseMatrix::row(self, row)
    }

    fn col(&self, col: usize) -> Result<DenseVector<T>> {
        DenseMatrix::col(self, col)
    }

    fn set_row(&mut self, row: usize, values: &DenseVector<T>) -> Result<()> {
        DenseMatrix::set_row(self, row, values)
    }

    fn set_col(&mut self, col: usize, values: &DenseVector<T>) -> Result<()> {
        DenseMatrix::set_col(self, col, values)
    }
}
