//! Tensor type definition, construction and accessors
//!
//! This module defines the owning `Tensor<T, E>` type. Indexing, trait
//! implementations and layout conversion live in sibling modules.

use scirs2_core::numeric::{One, Zero};
use tenstride_core::{to_strides, DynExtents, Extents, Layout, Result, Strides, TensorError};
use tenstride_kernels::{View, ViewMut};

/// Dense N-dimensional tensor with explicit layout and strides
///
/// Elements live in a contiguous `Vec<T>` of `product(extents)` entries. The
/// layout decides which axis varies fastest in memory, and the strides are
/// derived from the extents and the layout on construction.
///
/// # Type Parameters
///
/// * `T` - Element type
/// * `E` - Extents representation: [`DynExtents`] (default), a fixed-rank
///   [`RankExtents`](tenstride_core::RankExtents) or a compile-time
///   [`StaticExtents`](tenstride_core::StaticExtents)
///
/// # Rank 0
///
/// Rank-0 extents describe zero elements, so a rank-0 tensor is empty.
///
/// # Examples
///
/// ```
/// use tenstride_core::{DynExtents, Layout};
/// use tenstride_dense::Tensor;
///
/// let e = DynExtents::new(&[4, 2, 3]).unwrap();
/// let t = Tensor::from_elem(e, Layout::FirstOrder, 1.5);
/// assert_eq!(t.dims(), &[4, 2, 3]);
/// assert_eq!(t.strides(), &[1, 4, 8]);
/// assert_eq!(t.len(), 24);
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "T: serde::Serialize, E: serde::Serialize"))
)]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: serde::Deserialize<'de>, E: serde::Deserialize<'de>"))
)]
#[cfg_attr(feature = "serde", serde(try_from = "SerdeTensor<T, E>"))]
pub struct Tensor<T, E: Extents = DynExtents> {
    pub(crate) data: Vec<T>,
    pub(crate) extents: E,
    pub(crate) layout: Layout,
    pub(crate) strides: Strides,
}

/// Wire form of [`Tensor`]; the element count and strides are checked
/// against the extents before a tensor is built.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SerdeTensor<T, E> {
    data: Vec<T>,
    extents: E,
    layout: Layout,
    strides: Vec<usize>,
}

#[cfg(feature = "serde")]
impl<T, E: Extents> TryFrom<SerdeTensor<T, E>> for Tensor<T, E> {
    type Error = TensorError;

    fn try_from(raw: SerdeTensor<T, E>) -> Result<Self> {
        let expected = raw.extents.product();
        if raw.data.len() != expected {
            return Err(TensorError::invalid_shape(
                "Tensor::deserialize",
                raw.extents.dims(),
                format!("requires {} elements, got {}", expected, raw.data.len()),
            ));
        }
        let strides = to_strides(raw.extents.dims(), raw.layout);
        if strides.as_slice() != raw.strides.as_slice() {
            return Err(TensorError::invalid_shape(
                "Tensor::deserialize",
                raw.extents.dims(),
                format!(
                    "strides {:?} do not match the {:?} strides {:?}",
                    raw.strides,
                    raw.layout,
                    strides.as_slice()
                ),
            ));
        }
        Ok(Self {
            data: raw.data,
            extents: raw.extents,
            layout: raw.layout,
            strides,
        })
    }
}

impl<T: Clone, E: Extents> Tensor<T, E> {
    /// Create a tensor with every element set to `value`
    pub fn from_elem(extents: E, layout: Layout, value: T) -> Self {
        let strides = to_strides(extents.dims(), layout);
        Self {
            data: vec![value; extents.product()],
            extents,
            layout,
            strides,
        }
    }

    /// Create a tensor from data already stored in `layout` order
    ///
    /// # Errors
    ///
    /// `InvalidShape` if `data.len()` differs from the product of the extents.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::{DynExtents, Layout};
    /// use tenstride_dense::Tensor;
    ///
    /// let e = DynExtents::new(&[2, 3]).unwrap();
    /// let t = Tensor::from_vec(e, Layout::LastOrder, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(*t.get(&[1, 0]).unwrap(), 4);
    ///
    /// let e = DynExtents::new(&[2, 3]).unwrap();
    /// assert!(Tensor::from_vec(e, Layout::LastOrder, vec![1, 2]).is_err());
    /// ```
    pub fn from_vec(extents: E, layout: Layout, data: Vec<T>) -> Result<Self> {
        let expected = extents.product();
        if data.len() != expected {
            return Err(TensorError::invalid_shape(
                "Tensor::from_vec",
                extents.dims(),
                format!("requires {} elements, got {}", expected, data.len()),
            ));
        }
        let strides = to_strides(extents.dims(), layout);
        Ok(Self {
            data,
            extents,
            layout,
            strides,
        })
    }

    /// Replace every element with `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Clone + Zero, E: Extents> Tensor<T, E> {
    /// Zero-filled tensor in first-order layout
    pub fn new(extents: E) -> Self {
        Self::with_layout(extents, Layout::FirstOrder)
    }

    /// Zero-filled tensor in the given layout
    pub fn with_layout(extents: E, layout: Layout) -> Self {
        Self::from_elem(extents, layout, T::zero())
    }

    /// Zero-filled first-order tensor from a size sequence
    ///
    /// # Errors
    ///
    /// Whatever `E::from_dims` reports: `InvalidShape` for a zero size,
    /// `LengthMismatch` for a fixed-rank representation of another rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_dense::Tensor;
    ///
    /// let t = Tensor::<f64>::from_dims(&[2, 3]).unwrap();
    /// assert_eq!(t.len(), 6);
    /// assert!(Tensor::<f64>::from_dims(&[2, 0]).is_err());
    /// ```
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        Ok(Self::new(E::from_dims(dims)?))
    }

    /// Zero-filled first-order tensor
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        Self::from_dims(dims)
    }
}

impl<T: Clone + One, E: Extents> Tensor<T, E> {
    /// First-order tensor of ones
    pub fn ones(dims: &[usize]) -> Result<Self> {
        Ok(Self::from_elem(E::from_dims(dims)?, Layout::FirstOrder, T::one()))
    }
}

impl<T, E: Extents> Tensor<T, E> {
    /// Extents of the tensor
    pub fn extents(&self) -> &E {
        &self.extents
    }

    /// Per-axis sizes
    pub fn dims(&self) -> &[usize] {
        self.extents.dims()
    }

    /// Strides matching the extents and layout
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Storage order
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no element is stored (rank 0)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in storage order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable elements in storage order
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the tensor, returning its storage
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over elements in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Borrow as a kernel operand
    pub fn view(&self) -> View<'_, T> {
        View::new(&self.data, self.extents.dims(), &self.strides)
    }

    /// Borrow as a writable kernel operand
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut::new(&mut self.data, self.extents.dims(), &self.strides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenstride_core::{static_dims, RankExtents, StaticExtents};

    static_dims!(Dims423 = [4, 2, 3]);

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_and_validation() {
        let e = DynExtents::new(&[2, 3]).unwrap();
        let t = Tensor::from_vec(e, Layout::LastOrder, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tensor<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.layout(), Layout::LastOrder);
        assert_eq!(back.strides(), &[3, 1]);
        assert_eq!(back.as_slice(), t.as_slice());

        let zero_extent = r#"{"data":[],"extents":{"dims":[2,0]},"layout":"FirstOrder","strides":[1,2]}"#;
        assert!(serde_json::from_str::<Tensor<i32>>(zero_extent).is_err());

        let short = r#"{"data":[1,2,3],"extents":{"dims":[2,2]},"layout":"FirstOrder","strides":[1,2]}"#;
        let err = serde_json::from_str::<Tensor<i32>>(short).unwrap_err();
        assert!(err.to_string().contains("requires 4 elements"));

        let strided = r#"{"data":[1,2,3,4],"extents":{"dims":[2,2]},"layout":"FirstOrder","strides":[2,1]}"#;
        let err = serde_json::from_str::<Tensor<i32>>(strided).unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn test_new_is_zero_filled() {
        let t = Tensor::<f64>::new(DynExtents::new(&[3, 4, 2]).unwrap());
        assert_eq!(t.len(), 24);
        assert!(t.iter().all(|&x| x == 0.0));
        assert_eq!(t.layout(), Layout::FirstOrder);
        assert_eq!(t.strides(), &[1, 3, 12]);
    }

    #[test]
    fn test_with_layout_strides() {
        let t = Tensor::<i32>::with_layout(DynExtents::new(&[4, 2, 3]).unwrap(), Layout::LastOrder);
        assert_eq!(t.strides(), &[6, 3, 1]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = Tensor::from_vec(DynExtents::new(&[2, 2]).unwrap(), Layout::FirstOrder, vec![1.0; 3])
            .unwrap_err();
        assert!(matches!(err, TensorError::InvalidShape { .. }));
    }

    #[test]
    fn test_rank_zero_tensor_is_empty() {
        let t = Tensor::<f64>::new(DynExtents::empty());
        assert!(t.is_empty());
        assert_eq!(t.rank(), 0);
        assert!(t.strides().is_empty());
    }

    #[test]
    fn test_fixed_rank_and_static_extents() {
        let t = Tensor::<f64, RankExtents<2>>::ones(&[3, 2]).unwrap();
        assert_eq!(t.len(), 6);
        assert!(t.iter().all(|&x| x == 1.0));
        assert!(Tensor::<f64, RankExtents<2>>::ones(&[3, 2, 1]).is_err());

        let s = Tensor::<f64, StaticExtents<Dims423>>::new(StaticExtents::new());
        assert_eq!(s.dims(), &[4, 2, 3]);
        assert_eq!(s.len(), 24);
        assert!(Tensor::<f64, StaticExtents<Dims423>>::from_dims(&[4, 2, 2]).is_err());
    }

    #[test]
    fn test_fill() {
        let mut t = Tensor::<f64>::zeros(&[2, 2]).unwrap();
        t.fill(7.0);
        assert_eq!(t.as_slice(), &[7.0; 4]);
    }

    #[test]
    fn test_into_vec() {
        let t = Tensor::<i32>::ones(&[3]).unwrap();
        assert_eq!(t.into_vec(), vec![1, 1, 1]);
    }
}
