//! Checked element access and layout conversion

use super::types::Tensor;
use tenstride_core::{compute_single_index_checked, to_strides, Extents, Layout, Result, TensorError};
use tenstride_kernels::{copy, Strided, StridedMut};

impl<T, E: Extents> Tensor<T, E> {
    /// Element at a multi-index
    ///
    /// # Errors
    ///
    /// - `InvalidArgumentCount` if `idx.len() != rank`
    /// - `OutOfRange` if any index reaches its axis size
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::{DynExtents, Layout};
    /// use tenstride_dense::Tensor;
    ///
    /// let e = DynExtents::new(&[2, 3]).unwrap();
    /// let t = Tensor::from_vec(e, Layout::FirstOrder, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(*t.get(&[1, 2]).unwrap(), 6);
    /// assert!(t.get(&[2, 0]).is_err());
    /// assert!(t.get(&[1]).is_err());
    /// ```
    pub fn get(&self, idx: &[usize]) -> Result<&T> {
        let j = compute_single_index_checked(idx, self.extents.dims(), &self.strides)?;
        Ok(&self.data[j])
    }

    /// Mutable element at a multi-index, checked like [`get`](Self::get)
    pub fn get_mut(&mut self, idx: &[usize]) -> Result<&mut T> {
        let j = compute_single_index_checked(idx, self.extents.dims(), &self.strides)?;
        Ok(&mut self.data[j])
    }

    /// Alias of [`get`](Self::get)
    pub fn at(&self, idx: &[usize]) -> Result<&T> {
        self.get(idx)
    }

    /// Alias of [`get_mut`](Self::get_mut)
    pub fn at_mut(&mut self, idx: &[usize]) -> Result<&mut T> {
        self.get_mut(idx)
    }

    /// Element at a storage offset
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `j >= len()`.
    pub fn at_linear(&self, j: usize) -> Result<&T> {
        let len = self.data.len();
        self.data.get(j).ok_or_else(|| {
            TensorError::out_of_range("Tensor::at_linear", j, len, "offset must be < len")
        })
    }

    /// Mutable element at a storage offset, checked like [`at_linear`](Self::at_linear)
    pub fn at_linear_mut(&mut self, j: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data.get_mut(j).ok_or_else(|| {
            TensorError::out_of_range("Tensor::at_linear_mut", j, len, "offset must be < len")
        })
    }
}

impl<T: Clone, E: Extents> Tensor<T, E> {
    /// Copy into a tensor with the same extents stored in `layout`
    ///
    /// Every multi-index maps to the same value in the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::{DynExtents, Layout};
    /// use tenstride_dense::Tensor;
    ///
    /// let e = DynExtents::new(&[2, 3]).unwrap();
    /// let f = Tensor::from_vec(e, Layout::FirstOrder, vec![1, 4, 2, 5, 3, 6]).unwrap();
    /// let l = f.to_layout(Layout::LastOrder).unwrap();
    /// assert_eq!(l.as_slice(), &[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(f, l);
    /// ```
    pub fn to_layout(&self, layout: Layout) -> Result<Self> {
        if layout == self.layout {
            return Ok(self.clone());
        }
        let strides = to_strides(self.extents.dims(), layout);
        let mut data = self.data.clone();
        copy(
            self.rank(),
            self.extents.dims(),
            StridedMut::new(&mut data, &strides),
            Strided::new(&self.data, &self.strides),
        )?;
        Ok(Self {
            data,
            extents: self.extents.clone(),
            layout,
            strides,
        })
    }
}
