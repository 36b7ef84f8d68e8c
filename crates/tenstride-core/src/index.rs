//! Conversions between multi-indices and linear offsets
//!
//! For dense strides the two transforms are mutually inverse over
//! `[0, product(extents))`.

use crate::error::{Result, TensorError};
use crate::layout::Layout;
use crate::types::Shape;

/// Linear offset `Σ idx[k] * strides[k]`.
///
/// # Examples
///
/// ```
/// use tenstride_core::{compute_single_index, to_strides, Layout};
///
/// let w = to_strides(&[4, 2, 3], Layout::FirstOrder);
/// assert_eq!(compute_single_index(&[3, 1, 2], &w), 3 + 4 + 16);
/// ```
pub fn compute_single_index(idx: &[usize], strides: &[usize]) -> usize {
    idx.iter().zip(strides.iter()).map(|(i, w)| i * w).sum()
}

/// Bounds-checked linear offset of a multi-index.
///
/// # Errors
///
/// - `InvalidArgumentCount` if `idx.len() != dims.len()`
/// - `OutOfRange` if any `idx[k] >= dims[k]`
pub fn compute_single_index_checked(
    idx: &[usize],
    dims: &[usize],
    strides: &[usize],
) -> Result<usize> {
    if idx.len() != dims.len() {
        return Err(TensorError::invalid_argument_count(dims.len(), idx.len()));
    }
    for (k, (&i, &n)) in idx.iter().zip(dims.iter()).enumerate() {
        if i >= n {
            return Err(TensorError::out_of_range(
                "multi-index",
                i,
                n,
                format!("axis {}", k),
            ));
        }
    }
    Ok(compute_single_index(idx, strides))
}

/// Write the multi-index of offset `j` into `out`.
///
/// Axes are visited from the largest stride to the smallest: axis `r-1` first
/// for [`Layout::FirstOrder`], axis 0 first for [`Layout::LastOrder`].
///
/// # Panics
///
/// Panics if `out` is shorter than `strides`.
pub fn compute_multi_index_into(mut j: usize, strides: &[usize], layout: Layout, out: &mut [usize]) {
    let rank = strides.len();
    let mut visit = |k: usize| {
        let w = strides[k];
        out[k] = j / w;
        j -= out[k] * w;
    };
    match layout {
        Layout::FirstOrder => (0..rank).rev().for_each(&mut visit),
        Layout::LastOrder => (0..rank).for_each(&mut visit),
    }
}

/// Multi-index of offset `j`.
///
/// # Examples
///
/// ```
/// use tenstride_core::{compute_multi_index, to_strides, Layout};
///
/// let w = to_strides(&[4, 2, 3], Layout::LastOrder);
/// assert_eq!(compute_multi_index(23, &w, Layout::LastOrder).as_slice(), &[3, 1, 2]);
/// ```
pub fn compute_multi_index(j: usize, strides: &[usize], layout: Layout) -> Shape {
    let mut out = Shape::from_elem(0, strides.len());
    compute_multi_index_into(j, strides, layout, &mut out);
    out
}

/// Visit every multi-index of `dims` in storage order of `layout`.
///
/// The callback sees indices in increasing offset order for dense strides.
/// Rank 0 visits nothing.
pub fn for_each_index<F>(dims: &[usize], layout: Layout, mut f: F)
where
    F: FnMut(&[usize]),
{
    let rank = dims.len();
    if rank == 0 || dims.iter().any(|&n| n == 0) {
        return;
    }
    let mut idx = Shape::from_elem(0, rank);
    loop {
        f(&idx);

        // odometer increment, fastest axis first
        let mut carried = true;
        for step in 0..rank {
            let k = match layout {
                Layout::FirstOrder => step,
                Layout::LastOrder => rank - 1 - step,
            };
            idx[k] += 1;
            if idx[k] < dims[k] {
                carried = false;
                break;
            }
            idx[k] = 0;
        }
        if carried {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strides::to_strides;

    #[test]
    fn test_single_index() {
        let w = to_strides(&[4, 2, 3], Layout::FirstOrder);
        assert_eq!(compute_single_index(&[0, 0, 0], &w), 0);
        assert_eq!(compute_single_index(&[3, 1, 2], &w), 23);
    }

    #[test]
    fn test_checked() {
        let dims = [4, 2, 3];
        let w = to_strides(&dims, Layout::LastOrder);
        assert_eq!(compute_single_index_checked(&[1, 1, 1], &dims, &w).unwrap(), 10);
        assert!(matches!(
            compute_single_index_checked(&[1, 1], &dims, &w).unwrap_err(),
            TensorError::InvalidArgumentCount {
                expected: 3,
                actual: 2
            }
        ));
        assert!(matches!(
            compute_single_index_checked(&[1, 2, 1], &dims, &w).unwrap_err(),
            TensorError::OutOfRange { index: 2, bound: 2, .. }
        ));
    }

    #[test]
    fn test_round_trip_both_layouts() {
        let dims = [3, 1, 4, 2];
        for layout in [Layout::FirstOrder, Layout::LastOrder] {
            let w = to_strides(&dims, layout);
            for j in 0..24 {
                let idx = compute_multi_index(j, &w, layout);
                assert_eq!(compute_single_index(&idx, &w), j);
            }
        }
    }

    #[test]
    fn test_for_each_index_order() {
        let dims = [2, 3];
        for layout in [Layout::FirstOrder, Layout::LastOrder] {
            let w = to_strides(&dims, layout);
            let mut offsets = Vec::new();
            for_each_index(&dims, layout, |idx| offsets.push(compute_single_index(idx, &w)));
            assert_eq!(offsets, (0..6).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_for_each_index_rank_zero() {
        let mut count = 0;
        for_each_index(&[], Layout::FirstOrder, |_| count += 1);
        assert_eq!(count, 0);
    }
}
