//! Free functions over tensors: transposition, inner and outer products,
//! norms, complex parts and reshaping
//!
//! Permutations are 1-based like the modes in [`prod`](crate::prod).

use crate::modes::to_zero_based;
use crate::tensor::Tensor;
use scirs2_core::num_complex::Complex;
use scirs2_core::numeric::{Float, Num};
use std::ops::Neg;
use tenstride_core::{to_strides, DynExtents, Extents, Result, Shape, TensorError};
use tenstride_kernels::{accumulate, inner, invert_permutation, outer, Strided, StridedMut};

fn check_nonempty<T, E: Extents>(operation: &str, t: &Tensor<T, E>) -> Result<()> {
    if t.is_empty() {
        return Err(TensorError::invalid_shape(
            operation,
            t.dims(),
            "tensor holds no elements",
        ));
    }
    Ok(())
}

/// Validate `tau` and return the 0-based permutation with the permuted extents.
fn permutation_of(operation: &str, dims: &[usize], tau: &[usize]) -> Result<(Shape, Shape)> {
    let p = dims.len();
    if tau.len() != p {
        return Err(TensorError::invalid_permutation(operation, tau, p));
    }
    let pi = to_zero_based(operation, tau, p)?;
    let inv = invert_permutation(&pi)
        .map_err(|_| TensorError::invalid_permutation(operation, tau, p))?;
    let nc = inv.iter().map(|&r| dims[r]).collect();
    Ok((pi, nc))
}

fn permute<T, U, E, K>(operation: &str, a: &Tensor<T, E>, tau: &[usize], kernel: K) -> Result<Tensor<U>>
where
    U: Clone + Num,
    E: Extents,
    K: FnOnce(usize, &[usize], &[usize], StridedMut<'_, U>, Strided<'_, T>) -> Result<()>,
{
    let (pi, nc) = permutation_of(operation, a.dims(), tau)?;
    if a.is_empty() {
        return Ok(Tensor::new(DynExtents::empty()));
    }
    let mut c = Tensor::with_layout(DynExtents::new(&nc)?, a.layout());
    kernel(
        a.rank(),
        a.dims(),
        pi.as_slice(),
        StridedMut::new(&mut c.data, &c.strides),
        Strided::new(&a.data, &a.strides),
    )?;
    Ok(c)
}

/// Permute the axes of `a` by the 1-based permutation `tau`.
///
/// Axis `i` of `a` becomes axis `tau[i]` of the result, so
/// `nc[tau[i]] = na[i]`. The result keeps `a`'s layout. A rank-1 tensor is
/// copied.
///
/// # Errors
///
/// - `OutOfRange` if an entry is 0 or exceeds the rank
/// - `InvalidPermutation` for a wrong length or a repeated entry
///
/// # Examples
///
/// ```
/// use tenstride_dense::{trans, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2, 3, 4]).unwrap();
/// let c = trans(&a, &[3, 1, 2]).unwrap();
/// assert_eq!(c.dims(), &[3, 4, 2]);
/// ```
pub fn trans<T: Clone + Num, E: Extents>(a: &Tensor<T, E>, tau: &[usize]) -> Result<Tensor<T>> {
    permute("trans", a, tau, tenstride_kernels::trans)
}

/// [`trans`] with every element conjugated.
pub fn trans_conj<F, E>(a: &Tensor<Complex<F>, E>, tau: &[usize]) -> Result<Tensor<Complex<F>>>
where
    F: Clone + Num + Neg<Output = F>,
    E: Extents,
{
    permute("trans_conj", a, tau, tenstride_kernels::trans_conj)
}

/// Sum of the element-wise products of two tensors of equal extents.
///
/// Layouts may differ; elements are paired by multi-index.
///
/// # Errors
///
/// `InvalidShape` if either tensor is empty or the extents differ.
///
/// # Examples
///
/// ```
/// use tenstride_dense::{inner_prod, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
/// assert_eq!(inner_prod(&a, &a).unwrap(), 6.0);
/// ```
pub fn inner_prod<T, E, F>(a: &Tensor<T, E>, b: &Tensor<T, F>) -> Result<T>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    check_nonempty("inner_prod", a)?;
    check_nonempty("inner_prod", b)?;
    if a.dims() != b.dims() {
        return Err(TensorError::invalid_shape(
            "inner_prod",
            b.dims(),
            format!("extents differ from {:?}", a.dims()),
        ));
    }
    inner(
        a.rank(),
        a.dims(),
        a.view().strided(),
        b.view().strided(),
        T::zero(),
    )
}

/// Outer product: the result has `a`'s extents followed by `b`'s.
///
/// # Errors
///
/// `InvalidShape` if either tensor is empty.
///
/// # Examples
///
/// ```
/// use tenstride_dense::{outer_prod, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2]).unwrap();
/// let b = Tensor::<f64>::ones(&[3, 4]).unwrap();
/// assert_eq!(outer_prod(&a, &b).unwrap().dims(), &[2, 3, 4]);
/// ```
pub fn outer_prod<T, E, F>(a: &Tensor<T, E>, b: &Tensor<T, F>) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    check_nonempty("outer_prod", a)?;
    check_nonempty("outer_prod", b)?;
    let nc: Shape = a.dims().iter().chain(b.dims()).copied().collect();
    let mut c = Tensor::with_layout(DynExtents::new(&nc)?, a.layout());
    outer(c.view_mut(), a.view(), b.view())?;
    Ok(c)
}

/// Frobenius norm, the square root of the sum of squares
///
/// # Errors
///
/// `InvalidShape` for an empty tensor.
///
/// # Examples
///
/// ```
/// use tenstride_core::{DynExtents, Layout};
/// use tenstride_dense::{norm, Tensor};
///
/// let t = Tensor::from_vec(DynExtents::new(&[2]).unwrap(), Layout::FirstOrder, vec![3.0, 4.0]).unwrap();
/// assert_eq!(norm(&t).unwrap(), 5.0);
/// ```
pub fn norm<T: Float, E: Extents>(a: &Tensor<T, E>) -> Result<T> {
    check_nonempty("norm", a)?;
    let s = accumulate(a.rank(), a.dims(), a.view().strided(), T::zero(), |acc, &x| {
        acc + x * x
    })?;
    Ok(s.sqrt())
}

/// Sum of absolute values
pub fn norm_1<T: Float, E: Extents>(a: &Tensor<T, E>) -> Result<T> {
    check_nonempty("norm_1", a)?;
    accumulate(a.rank(), a.dims(), a.view().strided(), T::zero(), |acc, &x| {
        acc + x.abs()
    })
}

/// Alias of [`norm`]
pub fn norm_2<T: Float, E: Extents>(a: &Tensor<T, E>) -> Result<T> {
    norm(a)
}

/// Largest absolute value
pub fn norm_inf<T: Float, E: Extents>(a: &Tensor<T, E>) -> Result<T> {
    check_nonempty("norm_inf", a)?;
    accumulate(a.rank(), a.dims(), a.view().strided(), T::zero(), |acc, &x| {
        acc.max(x.abs())
    })
}

fn map_elements<T, U, E, M>(a: &Tensor<T, E>, f: M) -> Tensor<U, E>
where
    E: Extents,
    M: FnMut(&T) -> U,
{
    Tensor {
        data: a.data.iter().map(f).collect(),
        extents: a.extents.clone(),
        layout: a.layout,
        strides: a.strides.clone(),
    }
}

/// Real parts of a complex tensor
pub fn real<F: Clone, E: Extents>(a: &Tensor<Complex<F>, E>) -> Tensor<F, E> {
    map_elements(a, |z| z.re.clone())
}

/// Imaginary parts of a complex tensor
pub fn imag<F: Clone, E: Extents>(a: &Tensor<Complex<F>, E>) -> Tensor<F, E> {
    map_elements(a, |z| z.im.clone())
}

/// Complex conjugate of every element
///
/// # Examples
///
/// ```
/// use scirs2_core::num_complex::Complex;
/// use tenstride_core::{DynExtents, Layout};
/// use tenstride_dense::{conj, imag, Tensor};
///
/// let e = DynExtents::new(&[2]).unwrap();
/// let z = Tensor::from_elem(e, Layout::FirstOrder, Complex::new(1.0, 2.0));
/// assert_eq!(imag(&conj(&z)).as_slice(), &[-2.0, -2.0]);
/// ```
pub fn conj<F, E>(a: &Tensor<Complex<F>, E>) -> Tensor<Complex<F>, E>
where
    F: Clone + Num + Neg<Output = F>,
    E: Extents,
{
    map_elements(a, Complex::conj)
}

/// Give `a` new extents, keeping its layout.
///
/// Elements are taken over in storage order. If the new extents hold more
/// elements the tail is set to `fill`; if they hold fewer, the excess is
/// dropped.
///
/// # Examples
///
/// ```
/// use tenstride_core::DynExtents;
/// use tenstride_dense::{reshape, Tensor};
///
/// let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
/// let b = reshape(&a, DynExtents::new(&[4, 2]).unwrap(), 0.0);
/// assert_eq!(b.as_slice(), &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
/// ```
pub fn reshape<T, E, F>(a: &Tensor<T, E>, extents: F, fill: T) -> Tensor<T, F>
where
    T: Clone,
    E: Extents,
    F: Extents,
{
    let len = extents.product();
    if len != a.len() {
        log::warn!(
            "reshape: {:?} -> {:?} changes the element count from {} to {}",
            a.dims(),
            extents.dims(),
            a.len(),
            len
        );
    }
    let mut data: Vec<T> = a.data.iter().take(len).cloned().collect();
    data.resize(len, fill);
    Tensor {
        strides: to_strides(extents.dims(), a.layout),
        data,
        extents,
        layout: a.layout,
    }
}
