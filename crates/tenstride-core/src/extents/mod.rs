//! Extents: the per-axis sizes of an N-dimensional array
//!
//! Three representations share the [`Extents`] trait:
//!
//! - [`DynExtents`]: rank chosen at runtime
//! - [`RankExtents`]: rank fixed by a const generic, sizes chosen at runtime
//! - [`StaticExtents`]: rank and sizes fixed at compile time, no runtime storage
//!
//! All three classify shapes identically and compare equal when their rank and
//! sizes agree.

mod dynamic;
mod fixed;
mod rank;

pub use dynamic::DynExtents;
pub use fixed::{StaticDims, StaticExtents};
pub use rank::RankExtents;

use crate::error::{Result, TensorError};
use crate::types::Shape;

/// Shape descriptor shared by every extents representation.
///
/// Implementors only provide [`dims`](Extents::dims) and
/// [`from_dims`](Extents::from_dims); every predicate is derived from the size
/// sequence.
pub trait Extents: Clone + std::fmt::Debug {
    /// Per-axis sizes
    fn dims(&self) -> &[usize];

    /// Build the representation from a size sequence.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if any size is zero. Representations with a fixed rank
    /// return `LengthMismatch` when the sequence length differs, fully static
    /// ones return `InvalidShape` when the sizes differ from their declaration.
    fn from_dims(dims: &[usize]) -> Result<Self>
    where
        Self: Sized;

    /// Number of axes
    fn rank(&self) -> usize {
        self.dims().len()
    }

    /// Size of axis `k`, checked.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `k >= rank`.
    fn at(&self, k: usize) -> Result<usize> {
        self.dims().get(k).copied().ok_or_else(|| {
            TensorError::out_of_range("Extents::at", k, self.rank(), "axis must be < rank")
        })
    }

    /// True for rank 0
    fn is_empty(&self) -> bool {
        self.dims().is_empty()
    }

    /// Number of elements described by the extents.
    ///
    /// Rank 0 yields 0, not 1.
    fn product(&self) -> usize {
        product(self.dims())
    }

    /// All sizes positive
    fn is_valid(&self) -> bool {
        is_valid(self.dims())
    }

    /// Non-empty and every size is 1
    fn is_scalar(&self) -> bool {
        is_scalar(self.dims())
    }

    /// Shape `(m, [n, 1, ..., 1])` with `m == 1` or `n == 1`
    fn is_vector(&self) -> bool {
        is_vector(self.dims())
    }

    /// Shape `(m, [n, 1, ..., 1])`
    fn is_matrix(&self) -> bool {
        is_matrix(self.dims())
    }

    /// Rank above 2 with a non-trivial axis beyond the second
    fn is_tensor(&self) -> bool {
        is_tensor(self.dims())
    }

    /// Copy the sizes into a [`Shape`]
    fn to_shape(&self) -> Shape {
        Shape::from_slice(self.dims())
    }

    /// Rank-sensitive comparison against any other representation
    fn same_as<O: Extents>(&self, other: &O) -> bool {
        self.dims() == other.dims()
    }
}

/// Reject size sequences containing a zero.
pub fn validate_dims(operation: &str, dims: &[usize]) -> Result<()> {
    if dims.iter().any(|&n| n == 0) {
        return Err(TensorError::invalid_shape(
            operation,
            dims,
            "every extent must be at least 1",
        ));
    }
    Ok(())
}

/// Element count of a size sequence, 0 for rank 0.
pub fn product(dims: &[usize]) -> usize {
    if dims.is_empty() {
        return 0;
    }
    dims.iter().product()
}

/// All sizes positive.
pub fn is_valid(dims: &[usize]) -> bool {
    dims.iter().all(|&n| n > 0)
}

/// Non-empty and every size equal to 1.
pub fn is_scalar(dims: &[usize]) -> bool {
    !dims.is_empty() && dims.iter().all(|&n| n == 1)
}

/// Vector classification used by the extents fixtures.
pub fn is_vector(dims: &[usize]) -> bool {
    match dims.len() {
        0 => false,
        1 => dims[0] >= 1,
        _ => {
            dims[..2].iter().any(|&n| n >= 1)
                && dims[..2].iter().any(|&n| n == 1)
                && dims[2..].iter().all(|&n| n == 1)
        }
    }
}

/// Matrix classification used by the extents fixtures.
pub fn is_matrix(dims: &[usize]) -> bool {
    match dims.len() {
        0 => false,
        1 => dims[0] >= 1,
        _ => dims[..2].iter().any(|&n| n >= 1) && dims[2..].iter().all(|&n| n == 1),
    }
}

/// Tensor classification used by the extents fixtures.
pub fn is_tensor(dims: &[usize]) -> bool {
    dims.len() > 2 && dims[..2].iter().all(|&n| n >= 1) && dims[2..].iter().any(|&n| n > 1)
}
