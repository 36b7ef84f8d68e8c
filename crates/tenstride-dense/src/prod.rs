//! Tensor products with vectors, matrices and tensors
//!
//! Every product allocates its result in the layout of the left operand and
//! dispatches to a contraction kernel. Modes are 1-based.
//!
//! | call | kernel | result extents |
//! |------|--------|----------------|
//! | `prod_vector(a, v, m)` | `ttv` | `na` without mode `m` |
//! | `prod_matrix(a, b, m)` | `ttm` | `na` with `na[m] = rows(b)` |
//! | `prod_tensor(a, b, phia, phib)` | `ttt_permuted` | free modes of `a`, then of `b` |
//!
//! A result without free modes has extents `[1]`.

use crate::modes::to_zero_based;
use crate::tensor::Tensor;
use scirs2_core::ndarray_ext::{Array1, Array2};
use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use tenstride_core::{DynExtents, Extents, Result, Shape, TensorError};
use tenstride_kernels::{ttm, ttt_permuted, ttv, View};

fn check_nonempty<T, E: Extents>(operation: &str, operand: &str, t: &Tensor<T, E>) -> Result<()> {
    if t.is_empty() {
        return Err(TensorError::invalid_shape(
            operation,
            t.dims(),
            format!("operand '{}' holds no elements", operand),
        ));
    }
    Ok(())
}

fn result_extents(dims: &[usize]) -> Result<DynExtents> {
    if dims.is_empty() {
        DynExtents::new(&[1])
    } else {
        DynExtents::new(dims)
    }
}

/// Allocate the result and contract mode `m` of `a` against a vector view.
fn vector_product<T, E>(operation: &str, a: &Tensor<T, E>, v: View<'_, T>, m: usize) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
{
    check_nonempty(operation, "a", a)?;
    let axis = to_zero_based(operation, &[m], a.rank())?[0];

    let free: Shape = a
        .dims()
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != axis)
        .map(|(_, &n)| n)
        .collect();
    let mut c = Tensor::with_layout(result_extents(&free)?, a.layout());
    log::debug!(
        "{}: {:?} x vector {:?} along mode {}",
        operation,
        a.dims(),
        v.extents,
        m
    );
    ttv(axis, c.view_mut(), a.view(), v)?;
    Ok(c)
}

/// Contract mode `m` (1-based) of `a` with the vector `v`.
///
/// The result holds the remaining modes of `a` in order. A rank-1 `a` gives a
/// single element with extents `[1]`.
///
/// # Errors
///
/// - `InvalidShape` if `a` is empty
/// - `OutOfRange` if `m` is 0 or exceeds the rank of `a`
/// - `IncompatibleOperands` if `v.len()` differs from extent `m` of `a`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array1;
/// use tenstride_core::{DynExtents, Layout};
/// use tenstride_dense::{prod_vector, Tensor};
///
/// let a = Tensor::from_elem(DynExtents::new(&[3, 4, 2]).unwrap(), Layout::FirstOrder, 2.0);
/// let c = prod_vector(&a, &Array1::ones(3), 1).unwrap();
/// assert_eq!(c.dims(), &[4, 2]);
/// assert!(c.iter().all(|&x| x == 6.0));
/// ```
pub fn prod_vector<T, E>(a: &Tensor<T, E>, v: &Array1<T>, m: usize) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
{
    let owned;
    let data = match v.as_slice() {
        Some(s) => s,
        None => {
            owned = v.to_vec();
            owned.as_slice()
        }
    };
    let n = [data.len()];
    vector_product("prod_vector", a, View::new(data, &n, &[1]), m)
}

/// Mode-`m` product (1-based) of `a` with the matrix `b`.
///
/// `b` has shape `(J, K)` with `K` equal to extent `m` of `a`; the result
/// equals `a`'s extents with extent `m` replaced by `J`.
///
/// # Errors
///
/// - `InvalidShape` if `a` or `b` is empty
/// - `OutOfRange` if `m` is 0 or exceeds the rank of `a`
/// - `IncompatibleOperands` if `K` differs from extent `m` of `a`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use tenstride_dense::{prod_matrix, Tensor};
///
/// let a = Tensor::<f64>::ones(&[3, 4, 5]).unwrap();
/// let c = prod_matrix(&a, &Array2::ones((2, 4)), 2).unwrap();
/// assert_eq!(c.dims(), &[3, 2, 5]);
/// assert!(c.iter().all(|&x| x == 4.0));
/// ```
pub fn prod_matrix<T, E>(a: &Tensor<T, E>, b: &Array2<T>, m: usize) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
{
    check_nonempty("prod_matrix", "a", a)?;
    let axis = to_zero_based("prod_matrix", &[m], a.rank())?[0];
    let (rows, cols) = b.dim();
    if rows == 0 || cols == 0 {
        return Err(TensorError::invalid_shape(
            "prod_matrix",
            &[rows, cols],
            "operand 'b' holds no elements",
        ));
    }

    let b = b.as_standard_layout();
    let data = b
        .as_slice()
        .ok_or_else(|| TensorError::null_buffer("prod_matrix", "b"))?;

    let mut nc = Shape::from_slice(a.dims());
    nc[axis] = rows;
    let mut c = Tensor::with_layout(DynExtents::new(&nc)?, a.layout());
    log::debug!(
        "prod_matrix: {:?} x matrix ({}, {}) along mode {}",
        a.dims(),
        rows,
        cols,
        m
    );
    ttm(
        axis,
        c.view_mut(),
        a.view(),
        View::new(data, &[rows, cols], &[cols, 1]),
    )?;
    Ok(c)
}

/// Contract modes `phia` of `a` with modes `phib` of `b` (both 1-based).
///
/// `phia[k]` is paired with `phib[k]`. The result holds the free modes of `a`
/// in order followed by the free modes of `b` in order. Contracting every mode
/// gives extents `[1]`; empty mode lists give the outer product.
///
/// # Errors
///
/// - `LengthMismatch` if the mode lists differ in length
/// - `InvalidShape` if either operand is empty
/// - `OutOfRange` for more contracted modes than a rank, or a mode 0 or past the rank
/// - `InvalidPermutation` if a list repeats a mode
/// - `IncompatibleOperands` if paired modes differ in extent
///
/// # Examples
///
/// ```
/// use tenstride_dense::{prod_tensor, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2, 3, 4]).unwrap();
/// let b = Tensor::<f64>::ones(&[4, 5, 3]).unwrap();
///
/// // contract a's modes 2 and 3 with b's modes 3 and 1
/// let c = prod_tensor(&a, &b, &[2, 3], &[3, 1]).unwrap();
/// assert_eq!(c.dims(), &[2, 5]);
/// assert!(c.iter().all(|&x| x == 12.0));
/// ```
pub fn prod_tensor<T, E, F>(
    a: &Tensor<T, E>,
    b: &Tensor<T, F>,
    phia: &[usize],
    phib: &[usize],
) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    const OP: &str = "prod_tensor";
    if phia.len() != phib.len() {
        return Err(TensorError::length_mismatch(OP, phia.len(), phib.len()));
    }
    check_nonempty(OP, "a", a)?;
    check_nonempty(OP, "b", b)?;

    let q = phia.len();
    let (pa, pb) = (a.rank(), b.rank());
    if q > pa.min(pb) {
        return Err(TensorError::out_of_range(
            OP,
            q,
            pa.min(pb),
            "cannot contract more modes than either rank",
        ));
    }
    let ca = to_zero_based(OP, phia, pa)?;
    let cb = to_zero_based(OP, phib, pb)?;

    for (&ka, &kb) in ca.iter().zip(cb.iter()) {
        if a.dims()[ka] != b.dims()[kb] {
            return Err(TensorError::incompatible_operands(
                OP,
                a.dims(),
                b.dims(),
                format!(
                    "mode {} of a has extent {} but mode {} of b has extent {}",
                    ka + 1,
                    a.dims()[ka],
                    kb + 1,
                    b.dims()[kb]
                ),
            ));
        }
    }

    // reordered axes: a' = [free a.., contracted a..], b' = [contracted b.., free b..]
    let free_a = free_axes(pa, &ca);
    let free_b = free_axes(pb, &cb);
    let phi_a: Shape = free_a.iter().chain(ca.iter()).copied().collect();
    let phi_b: Shape = cb.iter().chain(free_b.iter()).copied().collect();
    if phi_a.len() != pa {
        return Err(TensorError::invalid_permutation(OP, phia, pa));
    }
    if phi_b.len() != pb {
        return Err(TensorError::invalid_permutation(OP, phib, pb));
    }

    let nc: Shape = free_a
        .iter()
        .map(|&k| a.dims()[k])
        .chain(free_b.iter().map(|&k| b.dims()[k]))
        .collect();
    let mut c = Tensor::with_layout(result_extents(&nc)?, a.layout());
    log::debug!(
        "{}: {:?} x {:?} over {} mode pair(s), result {:?}",
        OP,
        a.dims(),
        b.dims(),
        q,
        c.dims()
    );
    ttt_permuted(q, &phi_a, &phi_b, c.view_mut(), a.view(), b.view())?;
    Ok(c)
}

/// [`prod_tensor`] contracting the same modes `phi` of both operands.
///
/// # Examples
///
/// ```
/// use tenstride_dense::{prod_tensor_same, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2, 3, 4]).unwrap();
/// let b = Tensor::<f64>::ones(&[2, 5, 4]).unwrap();
/// let c = prod_tensor_same(&a, &b, &[1, 3]).unwrap();
/// assert_eq!(c.dims(), &[3, 5]);
/// assert!(c.iter().all(|&x| x == 8.0));
/// ```
pub fn prod_tensor_same<T, E, F>(a: &Tensor<T, E>, b: &Tensor<T, F>, phi: &[usize]) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    prod_tensor(a, b, phi, phi)
}

/// Axes `0..rank` not listed in `contracted`, in order.
fn free_axes(rank: usize, contracted: &[usize]) -> SmallVec<[usize; 6]> {
    (0..rank).filter(|k| !contracted.contains(k)).collect()
}

/// Product of a tensor with a right-hand operand along 1-based modes
///
/// | right-hand side | modes | equivalent |
/// |-----------------|-------|------------|
/// | `&Array1<T>` | `usize` | [`prod_vector`] |
/// | `&Array2<T>` | `usize` | [`prod_matrix`] |
/// | `&Tensor<T, F>` | `usize` | [`prod_vector`] with a vector-shaped tensor |
/// | `&Tensor<T, F>` | `(&[usize], &[usize])` | [`prod_tensor`] |
/// | `&Tensor<T, F>` | `&[usize]` | [`prod_tensor_same`] |
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array1, Array2};
/// use tenstride_dense::{Prod, Tensor};
///
/// let a = Tensor::<f64>::ones(&[3, 4]).unwrap();
/// assert_eq!(a.prod(&Array1::ones(4), 2).unwrap().dims(), &[3]);
/// assert_eq!(a.prod(&Array2::ones((5, 3)), 1).unwrap().dims(), &[5, 4]);
///
/// let b = Tensor::<f64>::ones(&[4, 2]).unwrap();
/// assert_eq!(a.prod(&b, (&[2][..], &[1][..])).unwrap().dims(), &[3, 2]);
/// ```
pub trait Prod<Rhs, M> {
    type Output;

    fn prod(&self, rhs: Rhs, modes: M) -> Result<Self::Output>;
}

impl<T: Copy + Num, E: Extents> Prod<&Array1<T>, usize> for Tensor<T, E> {
    type Output = Tensor<T>;

    fn prod(&self, rhs: &Array1<T>, m: usize) -> Result<Tensor<T>> {
        prod_vector(self, rhs, m)
    }
}

impl<T: Copy + Num, E: Extents> Prod<&Array2<T>, usize> for Tensor<T, E> {
    type Output = Tensor<T>;

    fn prod(&self, rhs: &Array2<T>, m: usize) -> Result<Tensor<T>> {
        prod_matrix(self, rhs, m)
    }
}

impl<T: Copy + Num, E: Extents, F: Extents> Prod<&Tensor<T, F>, usize> for Tensor<T, E> {
    type Output = Tensor<T>;

    fn prod(&self, rhs: &Tensor<T, F>, m: usize) -> Result<Tensor<T>> {
        check_nonempty("prod_vector", "v", rhs)?;
        vector_product("prod_vector", self, rhs.view(), m)
    }
}

impl<T: Copy + Num, E: Extents, F: Extents> Prod<&Tensor<T, F>, (&[usize], &[usize])>
    for Tensor<T, E>
{
    type Output = Tensor<T>;

    fn prod(&self, rhs: &Tensor<T, F>, (phia, phib): (&[usize], &[usize])) -> Result<Tensor<T>> {
        prod_tensor(self, rhs, phia, phib)
    }
}

impl<T: Copy + Num, E: Extents, F: Extents> Prod<&Tensor<T, F>, &[usize]> for Tensor<T, E> {
    type Output = Tensor<T>;

    fn prod(&self, rhs: &Tensor<T, F>, phi: &[usize]) -> Result<Tensor<T>> {
        prod_tensor_same(self, rhs, phi)
    }
}
