//! Core type aliases shared by the tenstride crates.

use smallvec::SmallVec;

/// Type alias for a tensor axis (mode) index.
///
/// Zero-indexed inside the engine. The public product functions of
/// `tenstride-dense` take one-based modes and convert them once.
pub type Axis = usize;

/// Type alias for tensor rank (number of axes).
pub type Rank = usize;

/// Owned list of per-axis extents, or of any other per-mode quantity such as
/// a multi-index or a mode list.
///
/// Extents of rank 6 or less are held without a heap allocation.
///
/// # Examples
///
/// ```
/// use tenstride_core::Shape;
/// use smallvec::smallvec;
///
/// let shape: Shape = smallvec![3, 4, 2];
/// assert_eq!(shape.len(), 3);
/// ```
pub type Shape = SmallVec<[usize; 6]>;

/// Per-axis offset multipliers, same inline capacity as [`Shape`].
pub type Strides = SmallVec<[usize; 6]>;
