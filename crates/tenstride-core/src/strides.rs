//! Stride computation from extents and layout

use crate::extents::is_scalar;
use crate::layout::Layout;
use crate::types::Strides;

/// Compute the per-axis offset multipliers of a dense array.
///
/// Rank-0 and scalar extents yield all-ones strides of the same rank.
/// Otherwise `FirstOrder` gives `s[0] = 1, s[k] = s[k-1] * n[k-1]` and
/// `LastOrder` gives `s[r-1] = 1, s[k] = s[k+1] * n[k+1]`.
///
/// # Complexity
///
/// O(rank)
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
///
/// assert_eq!(to_strides(&[4, 2, 3], Layout::FirstOrder).as_slice(), &[1, 4, 8]);
/// assert_eq!(to_strides(&[4, 2, 3], Layout::LastOrder).as_slice(), &[6, 3, 1]);
/// ```
pub fn to_strides(dims: &[usize], layout: Layout) -> Strides {
    let rank = dims.len();
    let mut s: Strides = Strides::from_elem(1, rank);

    if rank == 0 || is_scalar(dims) {
        return s;
    }

    match layout {
        Layout::FirstOrder => {
            for k in 1..rank {
                s[k] = s[k - 1] * dims[k - 1];
            }
        }
        Layout::LastOrder => {
            for k in (0..rank - 1).rev() {
                s[k] = s[k + 1] * dims[k + 1];
            }
        }
    }
    s
}

/// Check that `strides` is exactly the dense stride vector of `dims` under `layout`.
pub fn is_dense(dims: &[usize], strides: &[usize], layout: Layout) -> bool {
    to_strides(dims, layout).as_slice() == strides
}
