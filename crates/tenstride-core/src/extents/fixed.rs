//! Extents whose rank and sizes are fixed at compile time

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use super::{validate_dims, Extents};
use crate::error::{Result, TensorError};

/// Compile-time size list.
///
/// Implemented by marker types declared with [`static_dims!`](crate::static_dims).
pub trait StaticDims: 'static {
    /// Per-axis sizes
    const DIMS: &'static [usize];
}

/// Declare a marker type carrying a compile-time size list.
///
/// # Examples
///
/// ```
/// use tenstride_core::{static_dims, Extents, StaticExtents};
///
/// static_dims!(pub Dims342 = [3, 4, 2]);
///
/// let e = StaticExtents::<Dims342>::new();
/// assert_eq!(e.dims(), &[3, 4, 2]);
/// assert_eq!(StaticExtents::<Dims342>::PRODUCT, 24);
/// assert_eq!(std::mem::size_of::<StaticExtents<Dims342>>(), 0);
/// ```
#[macro_export]
macro_rules! static_dims {
    ($(#[$meta:meta])* $vis:vis $name:ident = [$($n:expr),* $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        $vis struct $name;

        impl $crate::StaticDims for $name {
            const DIMS: &'static [usize] = &[$($n),*];
        }
    };
}

const fn all_positive(dims: &[usize]) -> bool {
    let mut k = 0;
    while k < dims.len() {
        if dims[k] == 0 {
            return false;
        }
        k += 1;
    }
    true
}

const fn const_product(dims: &[usize]) -> usize {
    if dims.is_empty() {
        return 0;
    }
    let mut p = 1;
    let mut k = 0;
    while k < dims.len() {
        p *= dims[k];
        k += 1;
    }
    p
}

/// Fully static extents: zero-sized, sizes come from `D`.
pub struct StaticExtents<D: StaticDims> {
    _dims: PhantomData<D>,
}

impl<D: StaticDims> StaticExtents<D> {
    /// Number of axes
    pub const RANK: usize = D::DIMS.len();

    /// Number of elements (0 for rank 0)
    pub const PRODUCT: usize = const_product(D::DIMS);

    const VALID: () = assert!(
        all_positive(D::DIMS),
        "static extents must not contain a zero size"
    );

    /// Create the extents; a zero size in `D` fails to compile.
    #[allow(clippy::let_unit_value)]
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self { _dims: PhantomData }
    }
}

impl<D: StaticDims> Default for StaticExtents<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: StaticDims> Clone for StaticExtents<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: StaticDims> Copy for StaticExtents<D> {}

impl<D: StaticDims> fmt::Debug for StaticExtents<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticExtents").field(&D::DIMS).finish()
    }
}

impl<D: StaticDims> Extents for StaticExtents<D> {
    fn dims(&self) -> &[usize] {
        D::DIMS
    }

    fn from_dims(dims: &[usize]) -> Result<Self> {
        validate_dims("StaticExtents::from_dims", dims)?;
        if dims.len() != D::DIMS.len() {
            return Err(TensorError::length_mismatch(
                "StaticExtents::from_dims",
                D::DIMS.len(),
                dims.len(),
            ));
        }
        if dims != D::DIMS {
            return Err(TensorError::invalid_shape(
                "StaticExtents::from_dims",
                dims,
                format!("sizes are fixed to {:?}", D::DIMS),
            ));
        }
        Ok(Self::new())
    }

    fn product(&self) -> usize {
        Self::PRODUCT
    }
}

impl<D: StaticDims, O: Extents> PartialEq<O> for StaticExtents<D> {
    fn eq(&self, other: &O) -> bool {
        self.same_as(other)
    }
}

impl<D: StaticDims> Eq for StaticExtents<D> {}

impl<D: StaticDims> Index<usize> for StaticExtents<D> {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &D::DIMS[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::DynExtents;

    crate::static_dims!(D423 = [4, 2, 3]);
    crate::static_dims!(D1 = [1]);
    crate::static_dims!(D11 = [1, 1]);
    crate::static_dims!(D0 = []);

    #[test]
    fn test_consts() {
        assert_eq!(StaticExtents::<D423>::RANK, 3);
        assert_eq!(StaticExtents::<D423>::PRODUCT, 24);
        assert_eq!(StaticExtents::<D0>::PRODUCT, 0);
        assert_eq!(std::mem::size_of::<StaticExtents<D423>>(), 0);
    }

    #[test]
    fn test_predicates_match_dynamic() {
        let s = StaticExtents::<D423>::new();
        let d = DynExtents::new(&[4, 2, 3]).unwrap();
        assert_eq!(s.is_tensor(), d.is_tensor());
        assert_eq!(s.is_matrix(), d.is_matrix());
        assert_eq!(s.product(), d.product());
        assert_eq!(s, d);
        assert_eq!(s[2], 3);
    }

    #[test]
    fn test_from_dims() {
        assert!(StaticExtents::<D423>::from_dims(&[4, 2, 3]).is_ok());
        assert!(matches!(
            StaticExtents::<D423>::from_dims(&[4, 2]).unwrap_err(),
            TensorError::LengthMismatch { .. }
        ));
        assert!(matches!(
            StaticExtents::<D423>::from_dims(&[4, 3, 2]).unwrap_err(),
            TensorError::InvalidShape { .. }
        ));
    }

    #[test]
    fn test_rank_sensitive_equality() {
        let a = StaticExtents::<D1>::new();
        let b = StaticExtents::<D11>::new();
        assert_ne!(a, b);
        assert!(a.is_scalar() && b.is_scalar());
    }

    #[test]
    fn test_debug() {
        let s = StaticExtents::<D423>::new();
        assert_eq!(format!("{:?}", s), "StaticExtents([4, 2, 3])");
    }
}
