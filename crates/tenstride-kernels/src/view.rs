//! Borrowed strided operands
//!
//! Kernels never own memory. Operands are described by a data slice plus the
//! strides (and, for operands with their own shape, the extents) that map
//! multi-indices into it.

/// Read-only data and strides; the extents are supplied by the algorithm call.
pub struct Strided<'a, T> {
    pub data: &'a [T],
    pub strides: &'a [usize],
}

impl<'a, T> Strided<'a, T> {
    pub fn new(data: &'a [T], strides: &'a [usize]) -> Self {
        Self { data, strides }
    }
}

impl<T> Clone for Strided<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Strided<'_, T> {}

/// Writable data and strides.
pub struct StridedMut<'a, T> {
    pub data: &'a mut [T],
    pub strides: &'a [usize],
}

impl<'a, T> StridedMut<'a, T> {
    pub fn new(data: &'a mut [T], strides: &'a [usize]) -> Self {
        Self { data, strides }
    }
}

/// Read-only operand carrying its own extents.
///
/// The rank of the operand is `extents.len()`.
pub struct View<'a, T> {
    pub data: &'a [T],
    pub extents: &'a [usize],
    pub strides: &'a [usize],
}

impl<'a, T> View<'a, T> {
    pub fn new(data: &'a [T], extents: &'a [usize], strides: &'a [usize]) -> Self {
        Self {
            data,
            extents,
            strides,
        }
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Drop the extents
    pub fn strided(&self) -> Strided<'a, T> {
        Strided::new(self.data, self.strides)
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

/// Writable operand carrying its own extents.
pub struct ViewMut<'a, T> {
    pub data: &'a mut [T],
    pub extents: &'a [usize],
    pub strides: &'a [usize],
}

impl<'a, T> ViewMut<'a, T> {
    pub fn new(data: &'a mut [T], extents: &'a [usize], strides: &'a [usize]) -> Self {
        Self {
            data,
            extents,
            strides,
        }
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> View<'_, T> {
        View::new(self.data, self.extents, self.strides)
    }
}
