//! Single-mode contractions: tensor-times-vector and tensor-times-matrix

use super::{check_destination, check_result_extents, without};
use crate::validate::{check_mode, check_operand, check_permutation, gather};
use crate::view::{View, ViewMut};
use crate::walk::walk2;
use scirs2_core::numeric::Num;
use tenstride_core::{Result, TensorError};

/// Length and element stride of a vector-shaped operand.
///
/// Accepts rank 1, or any shape with at most one non-unit axis (a column or
/// row stored as a matrix).
fn vector_extent<T>(operation: &str, v: &View<'_, T>) -> Result<(usize, usize)> {
    check_operand(operation, "v", v.rank(), v.data.len(), v.extents, v.strides)?;
    if v.rank() == 0 {
        return Err(TensorError::null_buffer(operation, "v"));
    }
    let mut non_unit = v.extents.iter().enumerate().filter(|&(_, &n)| n > 1);
    match (non_unit.next(), non_unit.next()) {
        (None, _) => Ok((1, v.strides[0])),
        (Some((k, &n)), None) => Ok((n, v.strides[k])),
        _ => Err(TensorError::invalid_shape(
            operation,
            v.extents,
            "vector operand must have a single non-unit axis",
        )),
    }
}

/// Contract mode `mode` of `a` against the vector `v`.
///
/// For `a` of rank p the result holds the remaining p-1 modes in their
/// original order:
/// `C[i₀..i_{m-1}, i_{m+1}..] = Σ_k A[i₀.., k, ..] × v[k]`.
/// A rank-1 `a` produces a single element, a rank-0 `a` is a no-op.
///
/// # Arguments
///
/// * `mode` - Contracted mode of `a` (0-based)
/// * `dst` - Destination with extents `a.extents` minus `mode`
/// * `a` - Tensor operand
/// * `v` - Vector of length `a.extents[mode]`
///
/// # Errors
///
/// - `OutOfRange` if `mode >= rank(a)`
/// - `IncompatibleOperands` if the vector length or destination extents disagree
/// - `NullBuffer` / `BufferTooSmall` for malformed operands
///
/// # Complexity
///
/// Time: O(∏na)
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{ttv, View, ViewMut};
///
/// let na = [3, 4, 2];
/// let wa = to_strides(&na, Layout::FirstOrder);
/// let a = vec![2.0; 24];
/// let v = vec![1.0; 3];
///
/// let nc = [4, 2];
/// let wc = to_strides(&nc, Layout::FirstOrder);
/// let mut c = vec![0.0; 8];
///
/// ttv(0, ViewMut::new(&mut c, &nc, &wc), View::new(&a, &na, &wa), View::new(&v, &[3], &[1])).unwrap();
/// assert!(c.iter().all(|&x| x == 6.0));
/// ```
pub fn ttv<T>(mode: usize, dst: ViewMut<'_, T>, a: View<'_, T>, v: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    contract_vector("ttv", mode, dst, a, v)
}

pub(crate) fn contract_vector<T>(
    operation: &str,
    mode: usize,
    dst: ViewMut<'_, T>,
    a: View<'_, T>,
    v: View<'_, T>,
) -> Result<()>
where
    T: Copy + Num,
{
    let p = a.rank();
    if p == 0 {
        return Ok(());
    }
    check_mode(operation, mode, p)?;
    check_operand(operation, "a", p, a.data.len(), a.extents, a.strides)?;
    check_destination(operation, &dst)?;
    let (len, wv) = vector_extent(operation, &v)?;

    if len != a.extents[mode] {
        return Err(TensorError::incompatible_operands(
            operation,
            a.extents,
            v.extents,
            format!(
                "mode {} has extent {} but the vector has length {}",
                mode, a.extents[mode], len
            ),
        ));
    }

    let free_n = without(a.extents, mode);
    let free_wa = without(&a.strides[..p], mode);
    check_result_extents(operation, dst.extents, &free_n)?;

    log::debug!(
        "{}: contracting mode {} of {:?} with a vector of length {}",
        operation,
        mode,
        a.extents,
        len
    );

    let wm = a.strides[mode];
    let (da, dv) = (a.data, v.data);
    let wc = &dst.strides[..free_n.len()];
    let c = dst.data;
    walk2(&free_n, wc, &free_wa, &mut |oc, oa| {
        let mut s = T::zero();
        for k in 0..len {
            s = s + da[oa + k * wm] * dv[k * wv];
        }
        c[oc] = s;
    });
    Ok(())
}

/// Mode-`mode` product of `a` with the matrix `m`.
///
/// `m` has extents `[J, K]` with `K == a.extents[mode]`; the destination
/// equals `a`'s extents with `mode` replaced by `J`:
/// `C[.., j, ..] = Σ_k A[.., k, ..] × M[j, k]`. A rank-0 `a` is a no-op.
///
/// # Errors
///
/// - `OutOfRange` if `mode >= rank(a)`
/// - `InvalidShape` if `m` is not rank 2
/// - `IncompatibleOperands` if `K` or the destination extents disagree
///
/// # Complexity
///
/// Time: O(∏na × J)
///
/// # Examples
///
/// ```
/// use tenstride_core::{to_strides, Layout};
/// use tenstride_kernels::{ttm, View, ViewMut};
///
/// let na = [3, 4, 5];
/// let a = vec![1.0; 60];
/// let m = vec![1.0; 8]; // 2 x 4
/// let nc = [3, 2, 5];
/// let mut c = vec![0.0; 30];
///
/// ttm(
///     1,
///     ViewMut::new(&mut c, &nc, &to_strides(&nc, Layout::FirstOrder)),
///     View::new(&a, &na, &to_strides(&na, Layout::FirstOrder)),
///     View::new(&m, &[2, 4], &[1, 2]),
/// )
/// .unwrap();
/// assert!(c.iter().all(|&x| x == 4.0));
/// ```
pub fn ttm<T>(mode: usize, dst: ViewMut<'_, T>, a: View<'_, T>, m: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    let p = a.rank();
    if p == 0 {
        return Ok(());
    }
    check_mode("ttm", mode, p)?;
    check_operand("ttm", "a", p, a.data.len(), a.extents, a.strides)?;
    check_operand("ttm", "m", m.rank(), m.data.len(), m.extents, m.strides)?;
    if m.rank() != 2 {
        return Err(TensorError::invalid_shape(
            "ttm",
            m.extents,
            "matrix operand must have rank 2",
        ));
    }
    ttm_core(
        "ttm",
        mode,
        dst,
        (a.data, a.extents, &a.strides[..p]),
        (m.data, m.extents, &m.strides[..2]),
    )
}

/// Mode-`mode` product after reordering the axes of both operands.
///
/// `tau_a` is a 0-based permutation of `a`'s axes: axis `k` of the reordered
/// tensor is axis `tau_a[k]` of `a`. `tau_m` does the same for the two axes of
/// `m` (`[1, 0]` uses `m` transposed). The strides are permuted, nothing is
/// copied.
///
/// # Errors
///
/// `InvalidPermutation` for malformed permutations, otherwise as [`ttm`].
pub fn ttm_permuted<T>(
    mode: usize,
    dst: ViewMut<'_, T>,
    a: View<'_, T>,
    tau_a: &[usize],
    m: View<'_, T>,
    tau_m: &[usize],
) -> Result<()>
where
    T: Copy + Num,
{
    let p = a.rank();
    if p == 0 {
        return Ok(());
    }
    check_mode("ttm_permuted", mode, p)?;
    check_permutation("ttm_permuted", tau_a, p)?;
    check_permutation("ttm_permuted", tau_m, 2)?;
    check_operand("ttm_permuted", "a", p, a.data.len(), a.extents, a.strides)?;
    if m.rank() != 2 {
        return Err(TensorError::invalid_shape(
            "ttm_permuted",
            m.extents,
            "matrix operand must have rank 2",
        ));
    }
    check_operand("ttm_permuted", "m", 2, m.data.len(), m.extents, m.strides)?;

    let na = gather(a.extents, tau_a);
    let wa = gather(a.strides, tau_a);
    let nm = gather(m.extents, tau_m);
    let wm = gather(m.strides, tau_m);
    ttm_core(
        "ttm_permuted",
        mode,
        dst,
        (a.data, na.as_slice(), wa.as_slice()),
        (m.data, nm.as_slice(), wm.as_slice()),
    )
}

type Parts<'a, T> = (&'a [T], &'a [usize], &'a [usize]);

fn ttm_core<T>(
    operation: &str,
    mode: usize,
    dst: ViewMut<'_, T>,
    (da, na, wa): Parts<'_, T>,
    (dm, nm, wm): Parts<'_, T>,
) -> Result<()>
where
    T: Copy + Num,
{
    check_destination(operation, &dst)?;
    let (rows, cols) = (nm[0], nm[1]);
    if cols != na[mode] {
        return Err(TensorError::incompatible_operands(
            operation,
            na,
            nm,
            format!(
                "mode {} has extent {} but the matrix has {} columns",
                mode, na[mode], cols
            ),
        ));
    }
    let mut expected = na.to_vec();
    expected[mode] = rows;
    check_result_extents(operation, dst.extents, &expected)?;

    log::debug!(
        "{}: mode-{} product of {:?} with a {}x{} matrix",
        operation,
        mode,
        na,
        rows,
        cols
    );

    let p = na.len();
    let free_n = without(na, mode);
    let free_wa = without(wa, mode);
    let free_wc = without(&dst.strides[..p], mode);
    let (wa_m, wc_m) = (wa[mode], dst.strides[mode]);
    let (wm_j, wm_k) = (wm[0], wm[1]);
    let c = dst.data;
    walk2(&free_n, &free_wc, &free_wa, &mut |oc, oa| {
        for j in 0..rows {
            let mut s = T::zero();
            for k in 0..cols {
                s = s + da[oa + k * wa_m] * dm[j * wm_j + k * wm_k];
            }
            c[oc + j * wc_m] = s;
        }
    });
    Ok(())
}
