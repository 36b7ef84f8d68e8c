//! Matrix-vector and matrix-matrix products over strided operands

use super::check_destination;
use super::mode::contract_vector;
use crate::validate::check_operand;
use crate::view::{View, ViewMut};
use crate::walk::walk1;
use scirs2_core::numeric::Num;
use std::ops::Range;
use tenstride_core::{Result, TensorError};

/// Largest block edge handled by the innermost `mtm` loop.
///
/// Larger products are split recursively along their longest dimension until
/// every block edge fits.
pub const MTM_BLOCK: usize = 32;

/// Matrix-vector product along `mode` of the matrix `a`.
///
/// `mode == 0` contracts the rows (`c = aᵀ v`), `mode == 1` the columns
/// (`c = a v`). The vector may be rank 1 or a single row/column. A rank-0
/// `a` is a no-op.
///
/// # Errors
///
/// - `InvalidShape` if `a` has a rank other than 0 or 2
/// - otherwise as [`ttv`](crate::ttv)
///
/// # Examples
///
/// ```
/// use tenstride_kernels::{mtv, View, ViewMut};
///
/// // [[1, 2], [3, 4]] first-order
/// let a = [1.0, 3.0, 2.0, 4.0];
/// let v = [1.0, 1.0];
/// let mut c = [0.0; 2];
///
/// mtv(1, ViewMut::new(&mut c, &[2], &[1]), View::new(&a, &[2, 2], &[1, 2]), View::new(&v, &[2], &[1]))
///     .unwrap();
/// assert_eq!(c, [3.0, 7.0]);
/// ```
pub fn mtv<T>(mode: usize, dst: ViewMut<'_, T>, a: View<'_, T>, v: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    match a.rank() {
        0 => return Ok(()),
        2 => {}
        _ => {
            return Err(TensorError::invalid_shape(
                "mtv",
                a.extents,
                "matrix operand must have rank 2",
            ))
        }
    }
    contract_vector("mtv", mode, dst, a, v)
}

/// Matrix-matrix product `C = A × B`.
///
/// `a` is `M×K`, `b` is `K×N` and `dst` is `M×N`. Each operand keeps its own
/// strides, so any mix of layouts works. With the `blocked-mtm` feature the
/// iteration space is tiled by [`MTM_BLOCK`]. If `a` or `b` has rank 0 the
/// call is a no-op.
///
/// # Errors
///
/// - `InvalidShape` if an operand is not rank 2
/// - `IncompatibleOperands` if the inner dimensions or the destination disagree
/// - `NullBuffer` / `BufferTooSmall` for malformed operands
///
/// # Complexity
///
/// Time: O(M × N × K)
///
/// # Examples
///
/// ```
/// use tenstride_kernels::{mtm, View, ViewMut};
///
/// let a = [1.0, 3.0, 2.0, 4.0]; // [[1, 2], [3, 4]]
/// let b = [5.0, 7.0, 6.0, 8.0]; // [[5, 6], [7, 8]]
/// let mut c = [0.0; 4];
///
/// mtm(
///     ViewMut::new(&mut c, &[2, 2], &[1, 2]),
///     View::new(&a, &[2, 2], &[1, 2]),
///     View::new(&b, &[2, 2], &[1, 2]),
/// )
/// .unwrap();
/// assert_eq!(c, [19.0, 43.0, 22.0, 50.0]);
/// ```
pub fn mtm<T>(dst: ViewMut<'_, T>, a: View<'_, T>, b: View<'_, T>) -> Result<()>
where
    T: Copy + Num,
{
    if a.rank() == 0 || b.rank() == 0 {
        return Ok(());
    }
    for (name, extents) in [("a", a.extents), ("b", b.extents), ("dst", dst.extents)] {
        if extents.len() != 2 {
            return Err(TensorError::invalid_shape(
                "mtm",
                extents,
                format!("operand {} must have rank 2", name),
            ));
        }
    }
    check_operand("mtm", "a", 2, a.data.len(), a.extents, a.strides)?;
    check_operand("mtm", "b", 2, b.data.len(), b.extents, b.strides)?;
    check_destination("mtm", &dst)?;

    let (m, k, n) = (a.extents[0], a.extents[1], b.extents[1]);
    if b.extents[0] != k {
        return Err(TensorError::incompatible_operands(
            "mtm",
            a.extents,
            b.extents,
            "inner dimensions differ",
        ));
    }
    if dst.extents[0] != m || dst.extents[1] != n {
        return Err(TensorError::incompatible_operands(
            "mtm",
            dst.extents,
            &[m, n],
            "destination extents differ from the result extents",
        ));
    }

    log::debug!("mtm: {}x{} times {}x{}", m, k, k, n);

    let c = dst.data;
    walk1(&dst.extents[..2], &dst.strides[..2], &mut |o| c[o] = T::zero());

    let mut p = Product {
        c,
        wc: [dst.strides[0], dst.strides[1]],
        a: a.data,
        wa: [a.strides[0], a.strides[1]],
        b: b.data,
        wb: [b.strides[0], b.strides[1]],
    };
    if cfg!(feature = "blocked-mtm") {
        p.blocked(0..m, 0..n, 0..k);
    } else {
        p.tile(0..m, 0..n, 0..k);
    }
    Ok(())
}

struct Product<'a, 'b, T> {
    c: &'a mut [T],
    wc: [usize; 2],
    a: &'b [T],
    wa: [usize; 2],
    b: &'b [T],
    wb: [usize; 2],
}

impl<T: Copy + Num> Product<'_, '_, T> {
    fn blocked(&mut self, rows: Range<usize>, cols: Range<usize>, inner: Range<usize>) {
        let (lm, ln, lk) = (rows.len(), cols.len(), inner.len());
        if lm <= MTM_BLOCK && ln <= MTM_BLOCK && lk <= MTM_BLOCK {
            self.tile(rows, cols, inner);
            return;
        }
        if lm >= ln && lm >= lk {
            let mid = rows.start + lm / 2;
            log::trace!("mtm: split rows {:?} at {}", rows, mid);
            self.blocked(rows.start..mid, cols.clone(), inner.clone());
            self.blocked(mid..rows.end, cols, inner);
        } else if ln >= lk {
            let mid = cols.start + ln / 2;
            log::trace!("mtm: split columns {:?} at {}", cols, mid);
            self.blocked(rows.clone(), cols.start..mid, inner.clone());
            self.blocked(rows, mid..cols.end, inner);
        } else {
            let mid = inner.start + lk / 2;
            log::trace!("mtm: split inner {:?} at {}", inner, mid);
            self.blocked(rows.clone(), cols.clone(), inner.start..mid);
            self.blocked(rows, cols, mid..inner.end);
        }
    }

    fn tile(&mut self, rows: Range<usize>, cols: Range<usize>, inner: Range<usize>) {
        for j in cols {
            for i in rows.clone() {
                let mut s = T::zero();
                for k in inner.clone() {
                    s = s + self.a[i * self.wa[0] + k * self.wa[1]]
                        * self.b[k * self.wb[0] + j * self.wb[1]];
                }
                let o = i * self.wc[0] + j * self.wc[1];
                self.c[o] = self.c[o] + s;
            }
        }
    }
}
