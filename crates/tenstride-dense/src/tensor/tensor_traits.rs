//! # Tensor - Trait Implementations
//!
//! ## Implemented Traits
//!
//! - `Index` / `IndexMut` by storage offset (`usize`), by multi-index slice and
//!   by multi-index array
//! - `PartialEq` across layouts and extents representations
//! - `Debug`

use super::types::Tensor;
use std::fmt;
use std::ops::{Index, IndexMut};
use tenstride_core::{compute_single_index, compute_single_index_checked, for_each_index, Extents};

impl<T, E: Extents> Tensor<T, E> {
    fn offset_or_panic(&self, idx: &[usize]) -> usize {
        match compute_single_index_checked(idx, self.extents.dims(), &self.strides) {
            Ok(j) => j,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Unchecked storage-offset access; panics past the end like slice indexing
impl<T, E: Extents> Index<usize> for Tensor<T, E> {
    type Output = T;

    fn index(&self, j: usize) -> &T {
        &self.data[j]
    }
}

impl<T, E: Extents> IndexMut<usize> for Tensor<T, E> {
    fn index_mut(&mut self, j: usize) -> &mut T {
        &mut self.data[j]
    }
}

/// Multi-index access; panics on a wrong index count or an out-of-range index
impl<T, E: Extents> Index<&[usize]> for Tensor<T, E> {
    type Output = T;

    fn index(&self, idx: &[usize]) -> &T {
        &self.data[self.offset_or_panic(idx)]
    }
}

impl<T, E: Extents> IndexMut<&[usize]> for Tensor<T, E> {
    fn index_mut(&mut self, idx: &[usize]) -> &mut T {
        let j = self.offset_or_panic(idx);
        &mut self.data[j]
    }
}

impl<T, E: Extents, const N: usize> Index<[usize; N]> for Tensor<T, E> {
    type Output = T;

    fn index(&self, idx: [usize; N]) -> &T {
        &self.data[self.offset_or_panic(&idx)]
    }
}

impl<T, E: Extents, const N: usize> IndexMut<[usize; N]> for Tensor<T, E> {
    fn index_mut(&mut self, idx: [usize; N]) -> &mut T {
        let j = self.offset_or_panic(&idx);
        &mut self.data[j]
    }
}

/// Equal extents and equal elements at every multi-index.
///
/// The layout takes no part: a first-order tensor equals its last-order copy.
impl<T, U, E, F> PartialEq<Tensor<U, F>> for Tensor<T, E>
where
    T: PartialEq<U>,
    E: Extents,
    F: Extents,
{
    fn eq(&self, other: &Tensor<U, F>) -> bool {
        if !self.extents.same_as(&other.extents) {
            return false;
        }
        if self.layout == other.layout {
            return self.data == other.data;
        }
        let mut equal = true;
        for_each_index(self.extents.dims(), self.layout, |idx| {
            if equal {
                let a = &self.data[compute_single_index(idx, &self.strides)];
                let b = &other.data[compute_single_index(idx, &other.strides)];
                equal = a == b;
            }
        });
        equal
    }
}

impl<T: fmt::Debug, E: Extents> fmt::Debug for Tensor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("extents", &self.extents.dims())
            .field("layout", &self.layout)
            .field("strides", &self.strides())
            .field("data", &self.data)
            .finish()
    }
}
