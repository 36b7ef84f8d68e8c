//! Tensor contraction kernels
//!
//! This module provides the contraction family over strided operands:
//!
//! - **mtv / mtm** - matrix-vector and matrix-matrix products
//! - **ttv** - contract one mode of a tensor against a vector
//! - **ttm** - mode-n product of a tensor with a matrix
//! - **ttt** - contract the trailing `q` modes of A with the leading `q` modes of B
//!
//! All modes are 0-based. `ttt` is the general case: `q == 0` is the outer
//! product and `q == rank(A) == rank(B)` is the inner product.
//!
//! A rank-0 tensor operand makes every kernel here a no-op, matching the
//! strided algorithms.
//!
//! # Output shapes
//!
//! A destination may carry trailing unit extents beyond the natural result
//! rank (for example `[n, 1]` for a rank-1 result). Those axes are ignored.

mod matrix;
mod mode;
mod ttt;

pub use matrix::{mtm, mtv, MTM_BLOCK};
pub use mode::{ttm, ttm_permuted, ttv};
pub use ttt::{ttt, ttt_permuted};

use crate::view::ViewMut;
use tenstride_core::{Result, Shape, TensorError};

/// Check that `actual` equals `expected`, optionally followed by unit extents.
pub(crate) fn check_result_extents(
    operation: &str,
    actual: &[usize],
    expected: &[usize],
) -> Result<()> {
    let k = expected.len();
    let matches = actual.len() >= k
        && actual[..k] == *expected
        && actual[k..].iter().all(|&n| n == 1);
    if !matches {
        return Err(TensorError::incompatible_operands(
            operation,
            actual,
            expected,
            "destination extents differ from the result extents",
        ));
    }
    Ok(())
}

/// Destination must hold at least one element even when its rank is 0.
pub(crate) fn check_destination<T>(operation: &str, dst: &ViewMut<'_, T>) -> Result<()> {
    if dst.data.is_empty() || dst.strides.len() < dst.rank() {
        return Err(TensorError::null_buffer(operation, "dst"));
    }
    crate::validate::check_operand(
        operation,
        "dst",
        dst.rank(),
        dst.data.len(),
        dst.extents,
        dst.strides,
    )
}

/// Copy of `values` without entry `k`.
pub(crate) fn without(values: &[usize], k: usize) -> Shape {
    values
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != k)
        .map(|(_, &v)| v)
        .collect()
}
