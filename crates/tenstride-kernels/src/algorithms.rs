//! Rank-agnostic strided algorithms
//!
//! Copy, transform, fold and axis permutation over operands that share one
//! extents array. Source and destination may use different strides, which is
//! how a layout conversion is expressed.
//!
//! # Contract
//!
//! - `p == 0` is a no-op: nothing is written and folds return `init`
//! - a rank above 0 with an empty slice, or extents/strides shorter than `p`,
//!   fails with `NullBuffer`
//! - overlapping source and destination regions are the caller's problem;
//!   the borrow checker already rules them out for safe callers

use crate::validate::{check_operand, check_permutation, gather};
use crate::view::{Strided, StridedMut};
use crate::walk::{fold1, walk2};
use scirs2_core::num_complex::Complex;
use scirs2_core::numeric::Num;
use std::ops::Neg;
use tenstride_core::{Result, Shape, TensorError};

/// Copy every element of `src` into `dst`.
///
/// # Arguments
///
/// * `p` - Rank
/// * `n` - Shared extents (at least `p` entries)
/// * `dst` - Destination data and strides
/// * `src` - Source data and strides
///
/// # Complexity
///
/// Time: O(∏n), auxiliary space O(p)
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{copy, Strided, StridedMut};
///
/// // 2x3 column-major into row-major
/// let n = [2, 3];
/// let a = [1, 2, 3, 4, 5, 6];
/// let wa = to_strides(&n, Layout::FirstOrder);
/// let wc = to_strides(&n, Layout::LastOrder);
/// let mut c = [0; 6];
///
/// copy(2, &n, StridedMut::new(&mut c, &wc), Strided::new(&a, &wa)).unwrap();
/// assert_eq!(c, [1, 3, 5, 2, 4, 6]);
/// ```
pub fn copy<T: Clone>(
    p: usize,
    n: &[usize],
    dst: StridedMut<'_, T>,
    src: Strided<'_, T>,
) -> Result<()> {
    map_strided("copy", p, n, dst, src, T::clone)
}

/// Write `f(src[i])` into `dst[i]` for every multi-index `i`.
///
/// # Errors
///
/// `NullBuffer` or `BufferTooSmall` for malformed operands.
pub fn transform<T, U, F>(
    p: usize,
    n: &[usize],
    dst: StridedMut<'_, U>,
    src: Strided<'_, T>,
    f: F,
) -> Result<()>
where
    F: FnMut(&T) -> U,
{
    map_strided("transform", p, n, dst, src, f)
}

fn map_strided<T, U, F>(
    operation: &str,
    p: usize,
    n: &[usize],
    dst: StridedMut<'_, U>,
    src: Strided<'_, T>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&T) -> U,
{
    if p == 0 {
        return Ok(());
    }
    check_operand(operation, "dst", p, dst.data.len(), n, dst.strides)?;
    check_operand(operation, "src", p, src.data.len(), n, src.strides)?;

    let c = dst.data;
    let a = src.data;
    walk2(&n[..p], &dst.strides[..p], &src.strides[..p], &mut |oc, oa| {
        c[oc] = f(&a[oa]);
    });
    Ok(())
}

/// Fold `op` over every element of `src`, first axis fastest.
///
/// Returns `init` unchanged when `p == 0`.
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{accumulate, Strided};
///
/// let n = [2, 3];
/// let a: Vec<u64> = (1..=6).collect();
/// let w = to_strides(&n, Layout::FirstOrder);
///
/// let sum = accumulate(2, &n, Strided::new(&a, &w), 0, |acc, &x| acc + x).unwrap();
/// assert_eq!(sum, 21);
///
/// let untouched = accumulate(0, &n, Strided::new(&a, &w), 7, |acc, &x| acc + x).unwrap();
/// assert_eq!(untouched, 7);
/// ```
pub fn accumulate<T, A, F>(p: usize, n: &[usize], src: Strided<'_, T>, init: A, mut op: F) -> Result<A>
where
    F: FnMut(A, &T) -> A,
{
    if p == 0 {
        return Ok(init);
    }
    check_operand("accumulate", "src", p, src.data.len(), n, src.strides)?;

    let a = src.data;
    Ok(fold1(&n[..p], &src.strides[..p], init, &mut |acc, oa| {
        op(acc, &a[oa])
    }))
}

/// Permute the axes of `src` into `dst`.
///
/// `pi` is 0-based: source axis `r` becomes destination axis `pi[r]`, so the
/// destination extents satisfy `nc[pi[r]] == n[r]`. Applying `pi` and then its
/// inverse reproduces the source.
///
/// # Errors
///
/// - `InvalidPermutation` if `pi` is not a permutation of `0..p`
/// - `NullBuffer` / `BufferTooSmall` for malformed operands
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{trans, Strided, StridedMut};
///
/// // 2x3 matrix transposed into 3x2, both first-order
/// let n = [2, 3];
/// let a = [1, 2, 3, 4, 5, 6];
/// let wa = to_strides(&n, Layout::FirstOrder);
/// let wc = to_strides(&[3, 2], Layout::FirstOrder);
/// let mut c = [0; 6];
///
/// trans(2, &n, &[1, 0], StridedMut::new(&mut c, &wc), Strided::new(&a, &wa)).unwrap();
/// assert_eq!(c, [1, 3, 5, 2, 4, 6]);
/// ```
pub fn trans<T: Clone>(
    p: usize,
    n: &[usize],
    pi: &[usize],
    dst: StridedMut<'_, T>,
    src: Strided<'_, T>,
) -> Result<()> {
    permute_with("trans", p, n, pi, dst, src, T::clone)
}

/// Permute axes and conjugate every element.
///
/// Same permutation convention as [`trans`].
pub fn trans_conj<F>(
    p: usize,
    n: &[usize],
    pi: &[usize],
    dst: StridedMut<'_, Complex<F>>,
    src: Strided<'_, Complex<F>>,
) -> Result<()>
where
    F: Clone + Num + Neg<Output = F>,
{
    permute_with("trans_conj", p, n, pi, dst, src, Complex::conj)
}

fn permute_with<T, U, F>(
    operation: &str,
    p: usize,
    n: &[usize],
    pi: &[usize],
    dst: StridedMut<'_, U>,
    src: Strided<'_, T>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&T) -> U,
{
    if p == 0 {
        return Ok(());
    }
    check_permutation(operation, pi, p)?;
    check_operand(operation, "src", p, src.data.len(), n, src.strides)?;
    if n.len() < p || dst.strides.len() < p {
        return Err(TensorError::null_buffer(operation, "dst"));
    }

    let mut nc = Shape::from_elem(0, p);
    for r in 0..p {
        nc[pi[r]] = n[r];
    }
    check_operand(operation, "dst", p, dst.data.len(), &nc, dst.strides)?;

    // destination stride seen from source axis r
    let wc = gather(&dst.strides[..p], pi);
    let c = dst.data;
    let a = src.data;
    walk2(&n[..p], &wc, &src.strides[..p], &mut |oc, oa| {
        c[oc] = f(&a[oa]);
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invert_permutation;
    use tenstride_core::{to_strides, Layout};

    #[test]
    fn test_copy_same_layout() {
        let n = [3, 2];
        let w = to_strides(&n, Layout::FirstOrder);
        let a: Vec<i32> = (0..6).collect();
        let mut c = vec![0; 6];
        copy(2, &n, StridedMut::new(&mut c, &w), Strided::new(&a, &w)).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_copy_rank_zero_is_noop() {
        let mut c = vec![9; 3];
        copy::<i32>(0, &[], StridedMut::new(&mut c, &[]), Strided::new(&[], &[])).unwrap();
        assert_eq!(c, vec![9; 3]);
    }

    #[test]
    fn test_copy_null_buffers() {
        let n = [2, 2];
        let w = [1, 2];
        let a = [1, 2, 3, 4];
        let mut empty: Vec<i32> = Vec::new();
        let err = copy(2, &n, StridedMut::new(&mut empty, &w), Strided::new(&a, &w)).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "dst"));

        let mut c = [0; 4];
        let err = copy(2, &n, StridedMut::new(&mut c, &w), Strided::new(&[], &w)).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "src"));

        let err = copy(2, &n[..1], StridedMut::new(&mut c, &w), Strided::new(&a, &w)).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
    }

    #[test]
    fn test_transform() {
        let n = [2, 2];
        let w = [1, 2];
        let a = [1.0, 2.0, 3.0, 4.0];
        let mut c = [0.0; 4];
        transform(2, &n, StridedMut::new(&mut c, &w), Strided::new(&a, &w), |x| x * 10.0).unwrap();
        assert_eq!(c, [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_transform_rank_zero_and_null() {
        let mut c = [1.5; 2];
        transform::<f64, f64, _>(0, &[], StridedMut::new(&mut c, &[]), Strided::new(&[], &[]), |x| -x)
            .unwrap();
        assert_eq!(c, [1.5; 2]);

        let a = [1.0, 2.0];
        let err = transform(1, &[2], StridedMut::new(&mut c, &[1]), Strided::new(&[], &[1]), |x: &f64| -x)
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "src"));

        let mut empty: [f64; 0] = [];
        let err = transform(1, &[2], StridedMut::new(&mut empty, &[1]), Strided::new(&a, &[1]), |x| -x)
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "dst"));
    }

    #[test]
    fn test_accumulate_triangular_number() {
        let n = [4, 2, 3];
        let w = to_strides(&n, Layout::LastOrder);
        let a: Vec<u64> = (1..=24).collect();
        let sum = accumulate(3, &n, Strided::new(&a, &w), 0u64, |acc, &x| acc + x).unwrap();
        assert_eq!(sum, 24 * 25 / 2);
    }

    #[test]
    fn test_accumulate_null() {
        let err = accumulate::<f64, f64, _>(1, &[3], Strided::new(&[], &[1]), 0.0, |a, b| a + b)
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
    }

    #[test]
    fn test_trans_round_trip_rank3() {
        let n = [2, 3, 4];
        let pi = [2, 0, 1];
        let wa = to_strides(&n, Layout::FirstOrder);
        let a: Vec<i32> = (0..24).collect();

        let nc = [3, 4, 2];
        let wc = to_strides(&nc, Layout::FirstOrder);
        let mut c = vec![0; 24];
        trans(3, &n, &pi, StridedMut::new(&mut c, &wc), Strided::new(&a, &wa)).unwrap();

        // a[i, j, k] lands at c[j, k, i]
        assert_eq!(c[1 + 2 * 3 + 12], a[1 + 2 + 2 * 6]);

        let inv = invert_permutation(&pi).unwrap();
        let mut back = vec![0; 24];
        trans(3, &nc, &inv, StridedMut::new(&mut back, &wa), Strided::new(&c, &wc)).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_trans_rank_one_copies() {
        let a = [1, 2, 3];
        let mut c = [0; 3];
        trans(1, &[3], &[0], StridedMut::new(&mut c, &[1]), Strided::new(&a, &[1])).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_trans_rank_zero_and_null() {
        let mut c = [8; 4];
        trans::<i32>(0, &[], &[], StridedMut::new(&mut c, &[]), Strided::new(&[], &[])).unwrap();
        assert_eq!(c, [8; 4]);

        let a = [1, 2, 3, 4];
        let err = trans(2, &[2, 2], &[1, 0], StridedMut::new(&mut c, &[1, 2]), Strided::new(&[], &[1, 2]))
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "src"));

        let mut empty: [i32; 0] = [];
        let err = trans(2, &[2, 2], &[1, 0], StridedMut::new(&mut empty, &[1, 2]), Strided::new(&a, &[1, 2]))
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "dst"));

        let err = trans(2, &[2, 2], &[1, 0], StridedMut::new(&mut c, &[1]), Strided::new(&a, &[1, 2]))
            .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "dst"));
    }

    #[test]
    fn test_trans_invalid_permutation() {
        let a = [1, 2, 3, 4];
        let mut c = [0; 4];
        let err = trans(2, &[2, 2], &[0, 0], StridedMut::new(&mut c, &[1, 2]), Strided::new(&a, &[1, 2]))
            .unwrap_err();
        assert!(matches!(err, TensorError::InvalidPermutation { .. }));
    }

    #[test]
    fn test_trans_conj() {
        let a = [Complex::new(1.0, 2.0), Complex::new(3.0, -4.0)];
        let mut c = [Complex::new(0.0, 0.0); 2];
        trans_conj(2, &[1, 2], &[1, 0], StridedMut::new(&mut c, &[1, 2]), Strided::new(&a, &[1, 1]))
            .unwrap();
        assert_eq!(c[0], Complex::new(1.0, -2.0));
        assert_eq!(c[1], Complex::new(3.0, 4.0));
    }
}
