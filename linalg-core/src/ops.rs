//! Arithmetic over [`DenseVector`] and [`DenseMatrix`].
//!
//! Binary operators return `Result` so that shape mismatches reach the caller
//! as [`LinalgError::InvalidDimensions`] instead of a panic:
//!
//! ```
//! use linalg_core::{DenseMatrix, StorageLayout};
//!
//! let a = DenseMatrix::from_rows(&[vec![1, 2], vec![3, 4]], StorageLayout::RowMajor)?;
//! let b = DenseMatrix::from_rows(&[vec![5, 6], vec![7, 8]], StorageLayout::RowMajor)?;
//! let c = (&a * &b)?;
//! assert_eq!(c.row(0)?.as_slice(), &[19, 22]);
//! assert_eq!(c.row(1)?.as_slice(), &[43, 50]);
//! # Ok::<(), linalg_core::LinalgError>(())
//! ```

use std::ops::{Add, Mul, Sub};

use num_traits::Zero;

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, Result};
use crate::layout::StorageLayout;
use crate::traits::Scalar;
use crate::vector::DenseVector;

fn slice_dot<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

fn zip_with<T: Scalar>(a: &[T], b: &[T], f: impl Fn(T, T) -> T) -> Vec<T> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Sum of element-wise products of two equally long vectors.
pub fn dot_product<T: Scalar>(a: &DenseVector<T>, b: &DenseVector<T>) -> Result<T> {
    if a.len() != b.len() {
        return Err(LinalgError::InvalidDimensions(format!(
            "Dot product needs equal lengths ({} != {})",
            a.len(),
            b.len()
        )));
    }
    Ok(slice_dot(a.as_slice(), b.as_slice()))
}

/// Cross product of two 3-vectors.
///
/// Unsigned element types wrap or panic on negative components, like any
/// other unsigned subtraction.
pub fn cross_product<T: Scalar>(a: &DenseVector<T>, b: &DenseVector<T>) -> Result<DenseVector<T>> {
    if a.len() != 3 || b.len() != 3 {
        return Err(LinalgError::InvalidDimensions(format!(
            "Cross product is only defined for 3-vectors (got {} and {})",
            a.len(),
            b.len()
        )));
    }
    Ok(DenseVector::new(vec![
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]))
}

fn vector_elementwise<T: Scalar>(
    a: &DenseVector<T>,
    b: &DenseVector<T>,
    op: &str,
    f: impl Fn(T, T) -> T,
) -> Result<DenseVector<T>> {
    if a.len() != b.len() {
        return Err(LinalgError::InvalidDimensions(format!(
            "Vector {} needs equal lengths ({} != {})",
            op,
            a.len(),
            b.len()
        )));
    }
    Ok(DenseVector::new(zip_with(a.as_slice(), b.as_slice(), f)))
}

/// Combines two equally shaped matrices element by element.
///
/// The result takes `a`'s layout; `b`'s buffer is re-packed into that layout
/// first when the two differ.
fn matrix_elementwise<T: Scalar>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    op: &str,
    f: impl Fn(T, T) -> T,
) -> Result<DenseMatrix<T>> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(LinalgError::InvalidDimensions(format!(
            "Matrix {} needs equal dimensions ({}x{} vs {}x{})",
            op,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    let data = if a.layout() == b.layout() {
        zip_with(a.data(), b.data(), f)
    } else {
        let converted = b.layout().permute(a.layout(), b.data(), b.rows(), b.cols());
        zip_with(a.data(), &converted, f)
    };
    DenseMatrix::with_layout(a.rows(), a.cols(), data, a.layout())
}

/// Matrix product by the textbook definition.
///
/// `a` is read through a row-major copy and `b` through a column-major copy so
/// that every dot product walks two contiguous runs. The product is stored in
/// `a`'s original layout.
pub fn multiply<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
    if a.cols() != b.rows() {
        return Err(LinalgError::InvalidDimensions(format!(
            "Cannot multiply {}x{} by {}x{}: inner dimensions differ",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    let mut product = DenseMatrix::zeros(a.rows(), b.cols(), a.layout());
    let inner = a.cols();
    if inner == 0 {
        return Ok(product);
    }

    let lhs = a.to_row_major();
    let rhs = b.to_col_major();
    for (i, a_row) in lhs.data().chunks_exact(inner).enumerate() {
        for (j, b_col) in rhs.data().chunks_exact(inner).enumerate() {
            product.set(i, j, slice_dot(a_row, b_col))?;
        }
    }
    Ok(product)
}

/// Matrix-vector product `a * x`.
pub fn multiply_vector<T: Scalar>(a: &DenseMatrix<T>, x: &DenseVector<T>) -> Result<DenseVector<T>> {
    if a.cols() != x.len() {
        return Err(LinalgError::InvalidDimensions(format!(
            "Cannot multiply {}x{} matrix by vector of length {}",
            a.rows(),
            a.cols(),
            x.len()
        )));
    }
    if a.cols() == 0 {
        return Ok(DenseVector::zeros(a.rows()));
    }
    let out = match a.layout() {
        StorageLayout::RowMajor => a
            .data()
            .chunks_exact(a.cols())
            .map(|row| slice_dot(row, x.as_slice()))
            .collect(),
        StorageLayout::ColumnMajor => {
            let mut out = vec![T::zero(); a.rows()];
            for (col, &weight) in a.data().chunks_exact(a.rows().max(1)).zip(x.iter()) {
                for (acc, &value) in out.iter_mut().zip(col) {
                    *acc = *acc + value * weight;
                }
            }
            out
        }
    };
    Ok(DenseVector::new(out))
}

impl<'a, T: Scalar> Add<&'a DenseVector<T>> for &'a DenseVector<T> {
    type Output = Result<DenseVector<T>>;

    fn add(self, rhs: &'a DenseVector<T>) -> Self::Output {
        vector_elementwise(self, rhs, "addition", |x, y| x + y)
    }
}

impl<'a, T: Scalar> Sub<&'a DenseVector<T>> for &'a DenseVector<T> {
    type Output = Result<DenseVector<T>>;

    fn sub(self, rhs: &'a DenseVector<T>) -> Self::Output {
        vector_elementwise(self, rhs, "subtraction", |x, y| x - y)
    }
}

impl<'a, T: Scalar> Add<&'a DenseMatrix<T>> for &'a DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn add(self, rhs: &'a DenseMatrix<T>) -> Self::Output {
        matrix_elementwise(self, rhs, "addition", |x, y| x + y)
    }
}

impl<'a, T: Scalar> Sub<&'a DenseMatrix<T>> for &'a DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn sub(self, rhs: &'a DenseMatrix<T>) -> Self::Output {
        matrix_elementwise(self, rhs, "subtraction", |x, y| x - y)
    }
}

impl<'a, T: Scalar> Mul<&'a DenseMatrix<T>> for &'a DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn mul(self, rhs: &'a DenseMatrix<T>) -> Self::Output {
        multiply(self, rhs)
    }
}

impl<'a, T: Scalar> Mul<&'a DenseVector<T>> for &'a DenseMatrix<T> {
    type Output = Result<DenseVector<T>>;

    fn mul(self, rhs: &'a DenseVector<T>) -> Self::Output {
        multiply_vector(self, rhs)
    }
}

// Owned operands forward to the borrowed impls.
macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident, $lhs:ident, $rhs:ident, $out:ident) => {
        impl<T: Scalar> $trait<$rhs<T>> for $lhs<T> {
            type Output = Result<$out<T>>;

            fn $method(self, rhs: $rhs<T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add, DenseVector, DenseVector, DenseVector);
forward_owned_binop!(Sub, sub, DenseVector, DenseVector, DenseVector);
forward_owned_binop!(Add, add, DenseMatrix, DenseMatrix, DenseMatrix);
forward_owned_binop!(Sub, sub, DenseMatrix, DenseMatrix, DenseMatrix);
forward_owned_binop!(Mul, mul, DenseMatrix, DenseMatrix, DenseMatrix);
forward_owned_binop!(Mul, mul, DenseMatrix, DenseVector, DenseVector);
