//! Tensor-times-tensor contraction over `q` shared modes

use super::{check_destination, check_result_extents};
use crate::validate::{check_operand, check_permutation, gather};
use crate::view::{View, ViewMut};
use crate::walk::{fold2, walk2};
use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use tenstride_core::{Result, Shape, TensorError};

/// Contract the last `q` modes of `a` with the first `q` modes of `b`.
///
/// For `a` of rank p and `b` of rank r the result has rank `p + r - 2q`:
/// the free modes of `a` followed by the free modes of `b`.
///
/// ```text
/// C[i₁..i_{p-q}, j_{q+1}..j_r] = Σ_k A[i₁..i_{p-q}, k₁..k_q] × B[k₁..k_q, j_{q+1}..j_r]
/// ```
///
/// `q == 0` is the outer product, `q == p == r` the inner product (written to
/// a single-element destination). If either operand has rank 0 the call is a
/// no-op.
///
/// # Errors
///
/// - `OutOfRange` if `q` exceeds either rank
/// - `IncompatibleOperands` if the contracted extents or the destination disagree
/// - `NullBuffer` / `BufferTooSmall` for malformed operands
///
/// # Complexity
///
/// Time: O(∏free(a) × ∏free(b) × ∏contracted)
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{ttt, View, ViewMut};
///
/// let na = [2, 3, 4];
/// let nb = [3, 4, 5];
/// let a = vec![1.0; 24];
/// let b = vec![2.0; 60];
/// let nc = [2, 5];
/// let mut c = vec![0.0; 10];
///
/// ttt(
///     2,
///     ViewMut::new(&mut c, &nc, &to_strides(&nc, Layout::FirstOrder)),
///     View::new(&a, &na, &to_strides(&na, Layout::FirstOrder)),
///     View::new(&b, &nb, &to_strides(&nb, Layout::FirstOrder)),
/// )
/// .unwrap();
/// assert!(c.iter().all(|&x| x == 24.0));
/// ```
pub fn ttt<T>(q: usize, dst: ViewMut<'_, T>, a: View<'_, T>, b: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    let (pa, pb) = (a.rank(), b.rank());
    check_depth("ttt", q, pa, pb)?;
    if pa == 0 || pb == 0 {
        return Ok(());
    }
    check_operand("ttt", "a", pa, a.data.len(), a.extents, a.strides)?;
    check_operand("ttt", "b", pb, b.data.len(), b.extents, b.strides)?;
    ttt_core(
        "ttt",
        q,
        dst,
        (a.data, a.extents, &a.strides[..pa]),
        (b.data, b.extents, &b.strides[..pb]),
    )
}

/// [`ttt`] after reordering the axes of both operands.
///
/// `phi_a` and `phi_b` are 0-based permutations: axis `k` of the reordered
/// `a` is axis `phi_a[k]` of `a`, likewise for `b`. Only strides are
/// permuted, so no operand is copied.
///
/// # Errors
///
/// `InvalidPermutation` for malformed permutations, otherwise as [`ttt`].
///
/// # Examples
///
/// ```
/// use tenstride_kernels::{ttt_permuted, View, ViewMut};
///
/// // Aᵀ B for 2x2 matrices: contract the rows of both
/// let a = [1.0, 3.0, 2.0, 4.0]; // [[1, 2], [3, 4]]
/// let b = [1.0, 0.0, 0.0, 1.0];
/// let mut c = [0.0; 4];
///
/// ttt_permuted(
///     1,
///     &[1, 0],
///     &[0, 1],
///     ViewMut::new(&mut c, &[2, 2], &[1, 2]),
///     View::new(&a, &[2, 2], &[1, 2]),
///     View::new(&b, &[2, 2], &[1, 2]),
/// )
/// .unwrap();
/// assert_eq!(c, [1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn ttt_permuted<T>(
    q: usize,
    phi_a: &[usize],
    phi_b: &[usize],
    dst: ViewMut<'_, T>,
    a: View<'_, T>,
    b: View<'_, T>,
) -> Result<()>
where
    T: Copy + Num,
{
    let (pa, pb) = (a.rank(), b.rank());
    check_depth("ttt_permuted", q, pa, pb)?;
    if pa == 0 || pb == 0 {
        return Ok(());
    }
    check_permutation("ttt_permuted", phi_a, pa)?;
    check_permutation("ttt_permuted", phi_b, pb)?;
    check_operand("ttt_permuted", "a", pa, a.data.len(), a.extents, a.strides)?;
    check_operand("ttt_permuted", "b", pb, b.data.len(), b.extents, b.strides)?;

    let (na, wa) = (gather(a.extents, phi_a), gather(a.strides, phi_a));
    let (nb, wb) = (gather(b.extents, phi_b), gather(b.strides, phi_b));
    ttt_core(
        "ttt_permuted",
        q,
        dst,
        (a.data, na.as_slice(), wa.as_slice()),
        (b.data, nb.as_slice(), wb.as_slice()),
    )
}

fn check_depth(operation: &str, q: usize, pa: usize, pb: usize) -> Result<()> {
    let bound = pa.min(pb);
    if q > bound {
        return Err(TensorError::out_of_range(
            operation,
            q,
            bound + 1,
            "contraction depth must not exceed either rank",
        ));
    }
    Ok(())
}

type Parts<'a, T> = (&'a [T], &'a [usize], &'a [usize]);

fn ttt_core<T>(
    operation: &str,
    q: usize,
    dst: ViewMut<'_, T>,
    (da, na, wa): Parts<'_, T>,
    (db, nb, wb): Parts<'_, T>,
) -> Result<()>
where
    T: Copy + Num,
{
    let fa = na.len() - q;
    if na[fa..] != nb[..q] {
        return Err(TensorError::incompatible_operands(
            operation,
            na,
            nb,
            format!("the last {} extents of a must equal the first {} of b", q, q),
        ));
    }

    let expected: Shape = na[..fa].iter().chain(&nb[q..]).copied().collect();
    check_destination(operation, &dst)?;
    check_result_extents(operation, dst.extents, &expected)?;

    log::debug!(
        "{}: contracting {} modes of {:?} and {:?} into {:?}",
        operation,
        q,
        na,
        nb,
        expected
    );

    let wc: SmallVec<[usize; 8]> = dst.strides[..expected.len()].iter().copied().collect();
    let (wc_a, wc_b) = wc.split_at(fa);
    let shared = &na[fa..];
    let (wa_free, wa_shared) = wa.split_at(fa);
    let (wb_shared, wb_free) = wb.split_at(q);
    let c = dst.data;

    walk2(&na[..fa], wc_a, wa_free, &mut |oc_a, oa| {
        walk2(&nb[q..], wc_b, wb_free, &mut |oc_b, ob| {
            c[oc_a + oc_b] = fold2(shared, wa_shared, wb_shared, T::zero(), &mut |s, x, y| {
                s + da[oa + x] * db[ob + y]
            });
        });
    });
    Ok(())
}
