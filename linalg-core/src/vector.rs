use crate::error::{LinalgError, Result};
use crate::traits::{Scalar, Vector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A resizable one-dimensional numeric container.
///
/// Rows and columns extracted from a matrix come out as `DenseVector`s with no
/// link back to the matrix; changes have to be written back explicitly.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseVector<T> {
    data: Vec<T>,
}

impl<T: Scalar> DenseVector<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Creates a vector of `len` default-valued (zero) elements.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn at(&self, index: usize) -> Result<T> {
        self.data
            .get(index)
            .copied()
            .ok_or_else(|| LinalgError::out_of_bounds("Vector", index, self.data.len()))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or_else(|| LinalgError::out_of_bounds("Vector", index, len))
    }

    fn check_range(&self, first: usize, last: usize) -> Result<()> {
        if first > last || last > self.data.len() {
            return Err(LinalgError::bad_range("Vector", first, last, self.data.len()));
        }
        Ok(())
    }

    /// Copies out the half-open range `[first, last)`.
    pub fn sub_vector(&self, first: usize, last: usize) -> Result<Self> {
        self.check_range(first, last)?;
        Ok(Self::new(self.data[first..last].to_vec()))
    }

    /// Overwrites the half-open range `[first, last)` with `values`.
    pub fn set_sub_vector(&mut self, first: usize, last: usize, values: &Self) -> Result<()> {
        self.check_range(first, last)?;
        if values.len() != last - first {
            return Err(LinalgError::InvalidDimensions(format!(
                "Sub-vector length ({}) must match range length ({})",
                values.len(),
                last - first
            )));
        }
        self.data[first..last].copy_from_slice(&values.data);
        Ok(())
    }

    /// Multiplies every element by `factor` in place.
    pub fn scale(&mut self, factor: T) {
        for value in &mut self.data {
            *value = *value * factor;
        }
    }

    pub fn scaled(&self, factor: T) -> Self {
        let mut out = self.clone();
        out.scale(factor);
        out
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let len = self.data.len();
        if i >= len {
            return Err(LinalgError::out_of_bounds("Vector", i, len));
        }
        if j >= len {
            return Err(LinalgError::out_of_bounds("Vector", j, len));
        }
        self.data.swap(i, j);
        Ok(())
    }

    /// Euclidean norm, accumulated in `f64`.
    pub fn magnitude(&self) -> f64 {
        self.data
            .iter()
            .map(|v| {
                let v = v.to_f64_lossy();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Returns the unit vector in the direction of `self`.
    ///
    /// A vector whose magnitude is within [`crate::EPSILON`] of zero normalizes to
    /// the all-zero vector instead of dividing by zero.
    pub fn normalized(&self) -> DenseVector<f64> {
        let magnitude = self.magnitude();
        if magnitude.is_approx_zero() {
            return DenseVector::zeros(self.len());
        }
        DenseVector::new(
            self.data
                .iter()
                .map(|v| v.to_f64_lossy() / magnitude)
                .collect(),
        )
    }

    pub fn dot(&self, other: &Self) -> Result<T> {
        crate::ops::dot_product(self, other)
    }

    pub fn cross(&self, other: &Self) -> Result<Self> {
        crate::ops::cross_product(self, other)
    }

    /// Maps every element through `f` into a new vector.
    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, f: F) -> DenseVector<U> {
        DenseVector::new(self.data.iter().copied().map(f).collect())
    }
}

impl<T> From<Vec<T>> for DenseVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> Index<usize> for DenseVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DenseVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a DenseVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Scalar> Vector for DenseVector<T> {
    type Value = T;

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;

    fn assert_vec_approx_eq(actual: &DenseVector<f64>, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "Vector lengths differ");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(approx_eq(*a, *e), "index {}: expected {}, got {}", i, e, a);
        }
    }

    #[test]
    fn test_subscript_and_at() {
        let mut v = DenseVector::new(vec![0, 1, 2]);
        assert_eq!(v[0], 0);
        v[1] = 5;
        assert_eq!(v.at(1), Ok(5));
        *v.at_mut(2).unwrap() = 7;
        assert_eq!(v.as_slice(), &[0, 5, 7]);
        assert!(matches!(v.at(3), Err(LinalgError::OutOfBounds(_))));
        assert!(matches!(v.at_mut(3), Err(LinalgError::OutOfBounds(_))));
    }

    #[test]
    fn test_buffer_conversions() {
        let mut v = DenseVector::from(vec![3, 1, 2]);
        v.as_mut_slice().sort_unstable();
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert_eq!(v.clone().into_vec(), vec![1, 2, 3]);
        let from_into: DenseVector<i32> = vec![1, 2, 3].into();
        assert_eq!(from_into, v);
    }

    #[test]
    fn test_equality() {
        let mut a = DenseVector::new(vec![0, 2, 1, 4]);
        let b = DenseVector::new(vec![0, 2, 1, 4]);
        assert_eq!(a, b);
        a[2] = 5;
        assert_ne!(a, b);
    }

    #[test]
    fn test_sub_vector() {
        let v = DenseVector::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(v.sub_vector(1, 4).unwrap().as_slice(), &[2, 3, 4]);
        assert!(v.sub_vector(5, 5).unwrap().is_empty());
        assert!(matches!(v.sub_vector(2, 6), Err(LinalgError::OutOfBounds(_))));
        assert!(matches!(v.sub_vector(6, 6), Err(LinalgError::OutOfBounds(_))));
        assert!(matches!(v.sub_vector(3, 2), Err(LinalgError::OutOfBounds(_))));
    }

    #[test]
    fn test_set_sub_vector() {
        let mut v = DenseVector::new(vec![1, 2, 3, 4, 5]);
        v.set_sub_vector(1, 3, &DenseVector::new(vec![9, 8])).unwrap();
        assert_eq!(v.as_slice(), &[1, 9, 8, 4, 5]);

        let err = v.set_sub_vector(1, 3, &DenseVector::new(vec![9])).unwrap_err();
        assert!(matches!(err, LinalgError::InvalidDimensions(_)));
        let err = v.set_sub_vector(4, 6, &DenseVector::new(vec![1, 1])).unwrap_err();
        assert!(matches!(err, LinalgError::OutOfBounds(_)));
        assert_eq!(v.as_slice(), &[1, 9, 8, 4, 5]);
    }

    #[test]
    fn test_scale_and_scaled() {
        let mut v = DenseVector::new(vec![1.0, -2.0, 0.5]);
        let doubled = v.scaled(2.0);
        assert_eq!(doubled.as_slice(), &[2.0, -4.0, 1.0]);
        assert_eq!(v.as_slice(), &[1.0, -2.0, 0.5]);
        v.scale(-1.0);
        assert_eq!(v.as_slice(), &[-1.0, 2.0, -0.5]);
    }

    #[test]
    fn test_swap() {
        let mut v = DenseVector::new(vec![1, 2, 3]);
        v.swap(0, 2).unwrap();
        assert_eq!(v.as_slice(), &[3, 2, 1]);
        assert!(matches!(v.swap(0, 3), Err(LinalgError::OutOfBounds(_))));
    }

    #[test]
    fn test_magnitude() {
        assert!(approx_eq(DenseVector::new(vec![0, 1, 4]).magnitude(), 4.123105626));
        assert!(approx_eq(
            DenseVector::new(vec![1.3902, 0.213, 2.493, 5.343]).magnitude(),
            6.061412627
        ));
        assert!(approx_eq(DenseVector::new(vec![0, 0, 0]).magnitude(), 0.0));
    }

    #[test]
    fn test_normalized() {
        let v = DenseVector::new(vec![0, 1, 4, 2, 3]);
        let mag = v.magnitude();
        assert_vec_approx_eq(
            &v.normalized(),
            &[0.0, 1.0 / mag, 4.0 / mag, 2.0 / mag, 3.0 / mag],
        );
        assert!(approx_eq(v.normalized().magnitude(), 1.0));

        let data = vec![1.23, 0.1, 4.99, -8.7, 12.294, -0.23];
        let v = DenseVector::new(data.clone());
        let mag = v.magnitude();
        let expected: Vec<f64> = data.iter().map(|x| x / mag).collect();
        assert_vec_approx_eq(&v.normalized(), &expected);
    }

    #[test]
    fn test_normalized_zero_vector_stays_zero() {
        let v = DenseVector::new(vec![0.0, 0.0, 0.0]);
        assert_eq!(v.normalized().as_slice(), &[0.0, 0.0, 0.0]);
        let tiny = DenseVector::new(vec![1e-9, 0.0]);
        assert_eq!(tiny.normalized().as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_vector_trait() {
        let v = DenseVector::<u32>::zeros(4);
        assert_eq!(Vector::len(&v), 4);
        assert!(!Vector::is_empty(&v));
        assert!(Vector::is_empty(&DenseVector::<u32>::zeros(0)));
    }
}
