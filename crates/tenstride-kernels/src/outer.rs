//! Outer product of strided tensors
//!
//! For A of rank p and B of rank q the result C has rank p + q and
//! `C[i₁..iₚ, j₁..j_q] = A[i₁..iₚ] × B[j₁..j_q]`.

use crate::validate::check_operand;
use crate::view::{View, ViewMut};
use crate::walk::walk2;
use scirs2_core::numeric::Num;
use tenstride_core::{Result, TensorError};

/// Write the outer product of `a` and `b` into `dst`.
///
/// `dst.extents` must be `a.extents` followed by `b.extents`. If either
/// operand has rank 0 the call is a no-op.
///
/// # Errors
///
/// - `IncompatibleOperands` if the destination extents are not the concatenation
/// - `NullBuffer` / `BufferTooSmall` for malformed operands
///
/// # Complexity
///
/// Time: O(∏na × ∏nb)
///
/// # Examples
///
/// ```
/// use tenstride_kernels::{outer, View, ViewMut};
///
/// let u = [1.0, 2.0, 3.0];
/// let v = [4.0, 5.0];
/// let mut m = [0.0; 6];
///
/// outer(
///     ViewMut::new(&mut m, &[3, 2], &[1, 3]),
///     View::new(&u, &[3], &[1]),
///     View::new(&v, &[2], &[1]),
/// )
/// .unwrap();
/// assert_eq!(m, [4.0, 8.0, 12.0, 5.0, 10.0, 15.0]);
/// ```
pub fn outer<T>(dst: ViewMut<'_, T>, a: View<'_, T>, b: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    let (pa, pb) = (a.rank(), b.rank());
    if pa == 0 || pb == 0 {
        return Ok(());
    }
    let pc = pa + pb;
    if dst.rank() != pc || dst.extents[..pa] != *a.extents || dst.extents[pa..] != *b.extents {
        return Err(TensorError::incompatible_operands(
            "outer",
            a.extents,
            b.extents,
            format!(
                "destination extents {:?} must be their concatenation",
                dst.extents
            ),
        ));
    }
    check_operand("outer", "a", pa, a.data.len(), a.extents, a.strides)?;
    check_operand("outer", "b", pb, b.data.len(), b.extents, b.strides)?;
    check_operand("outer", "dst", pc, dst.data.len(), dst.extents, dst.strides)?;

    let (wc_a, wc_b) = dst.strides[..pc].split_at(pa);
    let (da, db) = (a.data, b.data);
    let c = dst.data;
    walk2(a.extents, wc_a, &a.strides[..pa], &mut |oc_a, oa| {
        let x = da[oa];
        walk2(b.extents, wc_b, &b.strides[..pb], &mut |oc_b, ob| {
            c[oc_a + oc_b] = x * db[ob];
        });
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenstride_core::{to_strides, Layout};

    #[test]
    fn test_outer_rank_2x2() {
        let na = [2, 3];
        let nb = [4, 2];
        let nc = [2, 3, 4, 2];
        let wa = to_strides(&na, Layout::LastOrder);
        let wb = to_strides(&nb, Layout::LastOrder);
        let wc = to_strides(&nc, Layout::LastOrder);
        let a: Vec<f64> = (1..=6).map(|x| x as f64).collect();
        let b: Vec<f64> = (1..=8).map(|x| x as f64).collect();
        let mut c = vec![0.0; 48];

        outer(
            ViewMut::new(&mut c, &nc, &wc),
            View::new(&a, &na, &wa),
            View::new(&b, &nb, &wb),
        )
        .unwrap();

        for i in 0..6 {
            for j in 0..8 {
                assert_eq!(c[i * 8 + j], a[i] * b[j]);
            }
        }
    }

    #[test]
    fn test_outer_shape_mismatch() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let mut c = [0.0; 4];
        let err = outer(
            ViewMut::new(&mut c, &[4], &[1]),
            View::new(&a, &[2], &[1]),
            View::new(&b, &[2], &[1]),
        )
        .unwrap_err();
        assert!(matches!(err, TensorError::IncompatibleOperands { .. }));
    }

    #[test]
    fn test_outer_null_buffer() {
        let a = [1.0, 2.0];
        let mut c = [0.0; 4];
        let err = outer(
            ViewMut::new(&mut c, &[2, 2], &[1, 2]),
            View::new(&a, &[2], &[1]),
            View::new(&[], &[2], &[1]),
        )
        .unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { ref operand, .. } if operand == "b"));
    }

    #[test]
    fn test_outer_rank_zero_noop() {
        let a = [1.0, 2.0];
        let mut c = [7.0; 2];
        outer(
            ViewMut::new(&mut c, &[2], &[1]),
            View::new(&a, &[2], &[1]),
            View::new(&[], &[], &[]),
        )
        .unwrap();
        assert_eq!(c, [7.0; 2]);
    }
}
