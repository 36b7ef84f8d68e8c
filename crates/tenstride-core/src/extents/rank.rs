//! Extents with a rank fixed at compile time

use std::ops::Index;

use super::{validate_dims, Extents};
use crate::error::{Result, TensorError};

/// Extents of compile-time rank `N` with runtime sizes.
///
/// # Examples
///
/// ```
/// use tenstride_core::{Extents, RankExtents};
///
/// let e = RankExtents::new([3, 4, 2]).unwrap();
/// assert_eq!(e.rank(), 3);
/// assert_eq!(e.product(), 24);
///
/// // Slices must match the fixed rank
/// assert!(RankExtents::<3>::from_slice(&[3, 4]).is_err());
/// ```
#[derive(Debug, Clone, Copy, Eq)]
pub struct RankExtents<const N: usize> {
    dims: [usize; N],
}

impl<const N: usize> RankExtents<N> {
    /// Create extents from an array of sizes.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if any size is zero.
    pub fn new(dims: [usize; N]) -> Result<Self> {
        validate_dims("RankExtents::new", &dims)?;
        Ok(Self { dims })
    }

    /// Create extents from a slice whose length must be `N`.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if `dims.len() != N`, `InvalidShape` on a zero size.
    pub fn from_slice(dims: &[usize]) -> Result<Self> {
        let dims: [usize; N] = dims
            .try_into()
            .map_err(|_| TensorError::length_mismatch("RankExtents::from_slice", N, dims.len()))?;
        Self::new(dims)
    }

    /// Sizes as an array
    pub fn to_array(&self) -> [usize; N] {
        self.dims
    }
}

impl<const N: usize> Default for RankExtents<N> {
    /// All sizes equal to one
    fn default() -> Self {
        Self { dims: [1; N] }
    }
}

impl<const N: usize> Extents for RankExtents<N> {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn from_dims(dims: &[usize]) -> Result<Self> {
        Self::from_slice(dims)
    }
}

impl<const N: usize, O: Extents> PartialEq<O> for RankExtents<N> {
    fn eq(&self, other: &O) -> bool {
        self.same_as(other)
    }
}

impl<const N: usize> Index<usize> for RankExtents<N> {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.dims[k]
    }
}
