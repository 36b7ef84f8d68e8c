//! Generalized inner product over strided operands

use crate::validate::check_operand;
use crate::view::Strided;
use crate::walk::fold2;
use scirs2_core::numeric::Num;
use tenstride_core::Result;

/// Compute `init + Σ a[i] * b[i]` over the shared extents `n`.
///
/// The operands may use different strides, so a first-order tensor can be
/// paired with a last-order one. Rank 0 returns `init`.
///
/// # Errors
///
/// `NullBuffer` or `BufferTooSmall` for malformed operands.
///
/// # Complexity
///
/// Time: O(∏n)
///
/// # Examples
///
/// ```
/// use tenstride_kernels::{inner, Strided};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [1.0, 1.0, 2.0, 2.0];
/// let w = [1, 2];
///
/// let s = inner(2, &[2, 2], Strided::new(&a, &w), Strided::new(&b, &w), 0.0).unwrap();
/// assert_eq!(s, 17.0);
/// ```
pub fn inner<T>(p: usize, n: &[usize], a: Strided<'_, T>, b: Strided<'_, T>, init: T) -> Result<T>
where
    T: Copy + Num,
{
    if p == 0 {
        return Ok(init);
    }
    check_operand("inner", "a", p, a.data.len(), n, a.strides)?;
    check_operand("inner", "b", p, b.data.len(), n, b.strides)?;

    let (da, db) = (a.data, b.data);
    Ok(fold2(
        &n[..p],
        &a.strides[..p],
        &b.strides[..p],
        init,
        &mut |acc, oa, ob| acc + da[oa] * db[ob],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenstride_core::{to_strides, Layout, TensorError};

    #[test]
    fn test_inner_ones() {
        let n = [3, 4, 2];
        let w = to_strides(&n, Layout::FirstOrder);
        let a = vec![2.0; 24];
        let b = vec![3.0; 24];
        let s = inner(3, &n, Strided::new(&a, &w), Strided::new(&b, &w), 1.0).unwrap();
        assert_eq!(s, 1.0 + 24.0 * 6.0);
    }

    #[test]
    fn test_inner_mixed_layouts() {
        let n = [2, 3];
        let wf = to_strides(&n, Layout::FirstOrder);
        let wl = to_strides(&n, Layout::LastOrder);
        // same logical matrix [[1,2,3],[4,5,6]] stored both ways
        let f = [1, 4, 2, 5, 3, 6];
        let l = [1, 2, 3, 4, 5, 6];
        let s = inner(2, &n, Strided::new(&f, &wf), Strided::new(&l, &wl), 0).unwrap();
        assert_eq!(s, 1 + 4 + 9 + 16 + 25 + 36);
    }

    #[test]
    fn test_inner_rank_zero() {
        let s = inner::<i64>(0, &[], Strided::new(&[], &[]), Strided::new(&[], &[]), 5).unwrap();
        assert_eq!(s, 5);
    }

    #[test]
    fn test_inner_null() {
        let a = [1.0, 2.0];
        let err = inner(1, &[2], Strided::new(&a, &[1]), Strided::new(&[], &[1]), 0.0).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
    }
}
