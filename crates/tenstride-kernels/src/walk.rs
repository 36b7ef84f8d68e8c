//! Recursive offset walkers
//!
//! Each walker visits every multi-index of an extents array once, the first
//! axis varying fastest, and hands the matching linear offsets of one or two
//! operands to a callback. Recursion depth equals the rank.
//!
//! Rank 0 visits a single empty multi-index at offset 0, which makes the
//! walkers composable: a contraction with no free modes still produces one
//! output element.

/// Visit the offsets of one operand.
pub(crate) fn walk1<F>(n: &[usize], w: &[usize], f: &mut F)
where
    F: FnMut(usize),
{
    walk1_rec(n.len(), n, w, 0, f);
}

fn walk1_rec<F>(r: usize, n: &[usize], w: &[usize], o: usize, f: &mut F)
where
    F: FnMut(usize),
{
    if r == 0 {
        f(o);
        return;
    }
    let k = r - 1;
    for i in 0..n[k] {
        walk1_rec(k, n, w, o + i * w[k], f);
    }
}

/// Visit the offsets of two operands sharing the extents `n`.
pub(crate) fn walk2<F>(n: &[usize], wa: &[usize], wb: &[usize], f: &mut F)
where
    F: FnMut(usize, usize),
{
    walk2_rec(n.len(), n, wa, 0, wb, 0, f);
}

fn walk2_rec<F>(r: usize, n: &[usize], wa: &[usize], oa: usize, wb: &[usize], ob: usize, f: &mut F)
where
    F: FnMut(usize, usize),
{
    if r == 0 {
        f(oa, ob);
        return;
    }
    let k = r - 1;
    for i in 0..n[k] {
        walk2_rec(k, n, wa, oa + i * wa[k], wb, ob + i * wb[k], f);
    }
}

/// Fold over the offsets of one operand.
pub(crate) fn fold1<A, F>(n: &[usize], w: &[usize], init: A, f: &mut F) -> A
where
    F: FnMut(A, usize) -> A,
{
    fold1_rec(n.len(), n, w, 0, init, f)
}

fn fold1_rec<A, F>(r: usize, n: &[usize], w: &[usize], o: usize, mut acc: A, f: &mut F) -> A
where
    F: FnMut(A, usize) -> A,
{
    if r == 0 {
        return f(acc, o);
    }
    let k = r - 1;
    for i in 0..n[k] {
        acc = fold1_rec(k, n, w, o + i * w[k], acc, f);
    }
    acc
}

/// Fold over the offsets of two operands sharing the extents `n`.
pub(crate) fn fold2<A, F>(n: &[usize], wa: &[usize], wb: &[usize], init: A, f: &mut F) -> A
where
    F: FnMut(A, usize, usize) -> A,
{
    fold2_rec(n.len(), n, wa, 0, wb, 0, init, f)
}

#[allow(clippy::too_many_arguments)]
fn fold2_rec<A, F>(
    r: usize,
    n: &[usize],
    wa: &[usize],
    oa: usize,
    wb: &[usize],
    ob: usize,
    mut acc: A,
    f: &mut F,
) -> A
where
    F: FnMut(A, usize, usize) -> A,
{
    if r == 0 {
        return f(acc, oa, ob);
    }
    let k = r - 1;
    for i in 0..n[k] {
        acc = fold2_rec(k, n, wa, oa + i * wa[k], wb, ob + i * wb[k], acc, f);
    }
    acc
}
