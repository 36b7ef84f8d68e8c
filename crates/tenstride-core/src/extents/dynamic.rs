//! Extents with a rank chosen at runtime

use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{validate_dims, Extents};
use crate::error::{Result, TensorError};
use crate::types::Shape;

/// Runtime-rank extents backed by a [`Shape`].
///
/// # Examples
///
/// ```
/// use tenstride_core::{DynExtents, Extents};
///
/// let e = DynExtents::new(&[4, 3, 2]).unwrap();
/// assert_eq!(e.rank(), 3);
/// assert_eq!(e.product(), 24);
/// assert!(e.is_tensor());
///
/// assert!(DynExtents::new(&[4, 0]).is_err());
/// assert_eq!(DynExtents::default().product(), 0);
/// ```
#[derive(Debug, Clone, Default, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SerdeExtents"))]
pub struct DynExtents {
    dims: Shape,
}

/// Wire form of [`DynExtents`], validated on the way in
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SerdeExtents {
    dims: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<SerdeExtents> for DynExtents {
    type Error = TensorError;

    fn try_from(raw: SerdeExtents) -> Result<Self> {
        Self::new(&raw.dims)
    }
}

impl DynExtents {
    /// Create extents from per-axis sizes.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if any size is zero.
    pub fn new(dims: &[usize]) -> Result<Self> {
        validate_dims("DynExtents::new", dims)?;
        Ok(Self {
            dims: Shape::from_slice(dims),
        })
    }

    /// Rank-0 extents
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sizes as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }
}

impl Extents for DynExtents {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn from_dims(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }
}

impl<O: Extents> PartialEq<O> for DynExtents {
    fn eq(&self, other: &O) -> bool {
        self.same_as(other)
    }
}

impl Index<usize> for DynExtents {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.dims[k]
    }
}

impl TryFrom<&[usize]> for DynExtents {
    type Error = TensorError;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }
}

impl TryFrom<Vec<usize>> for DynExtents {
    type Error = TensorError;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Self::new(&dims)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for DynExtents {
    type Error = TensorError;

    fn try_from(dims: [usize; N]) -> Result<Self> {
        Self::new(&dims)
    }
}
