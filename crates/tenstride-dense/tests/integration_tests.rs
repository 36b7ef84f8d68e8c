//! Integration tests for tenstride-dense
//!
//! These tests exercise the public surface end to end: construction in every
//! extents representation, products with 1-based modes, expressions and
//! conversions to ndarray types.

use anyhow::Result;
use scirs2_core::ndarray_ext::{array, Array1, Array2};
use scirs2_core::num_complex::Complex;
use tenstride_core::{
    for_each_index, static_dims, DynExtents, Extents, Layout, RankExtents, Slice, Span,
    StaticExtents, TensorError,
};
use tenstride_dense::{
    conj, inner_prod, norm, outer_prod, prod_indexed, prod_matrix, prod_tensor, prod_vector, real,
    reshape, to_matrix_rank2, trans, Prod, Tensor,
};

static_dims!(Cube = [2, 2, 2]);

#[test]
fn test_scenario_prod_vector_first_mode() -> Result<()> {
    let a = Tensor::from_elem(DynExtents::new(&[3, 4, 2])?, Layout::FirstOrder, 2.0);
    let c = prod_vector(&a, &Array1::ones(3), 1)?;

    assert_eq!(c.dims(), &[4, 2]);
    assert_eq!(c.len(), 8);
    assert!(c.iter().all(|&x| x == 6.0));
    Ok(())
}

#[test]
fn test_products_agree_across_extents_representations() -> Result<()> {
    let dynamic = Tensor::<f64>::ones(&[2, 2, 2])?;
    let ranked = Tensor::<f64, RankExtents<3>>::ones(&[2, 2, 2])?;
    let fixed = Tensor::<f64, StaticExtents<Cube>>::new(StaticExtents::new());
    assert_eq!(fixed.dims(), &[2, 2, 2]);

    let m = Array2::ones((3, 2));
    let c1 = prod_matrix(&dynamic, &m, 2)?;
    let c2 = prod_matrix(&ranked, &m, 2)?;
    assert_eq!(c1, c2);
    assert_eq!(c1.dims(), &[2, 3, 2]);

    let zero = prod_matrix(&fixed, &m, 2)?;
    assert!(zero.expr().all_eq_scalar(0.0)?);
    Ok(())
}

#[test]
fn test_contraction_chain_matches_direct_product() -> Result<()> {
    // (A x_1 u) x_1 v equals contracting A with u ⊗ v over both modes
    let a = Tensor::from_vec(
        DynExtents::new(&[2, 3])?,
        Layout::LastOrder,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )?;
    let u = array![1.0, -1.0];
    let v = array![2.0, 0.0, 1.0];

    let chained = prod_vector(&prod_vector(&a, &u, 1)?, &v, 1)?;
    let uv = outer_prod(
        &Tensor::<f64>::from_array1(&u)?,
        &Tensor::<f64>::from_array1(&v)?,
    )?;
    let direct = prod_tensor(&a, &uv, &[1, 2], &[1, 2])?;

    assert_eq!(chained.dims(), &[1]);
    assert_eq!(direct.dims(), &[1]);
    assert!((chained[0] - direct[0]).abs() < 1e-10);
    assert!((direct[0] - inner_prod(&a, &uv)?).abs() < 1e-10);
    Ok(())
}

#[test]
fn test_prod_trait_on_matrix_interop() -> Result<()> {
    let m = array![[1.0, 2.0], [3.0, 4.0]];
    let a = Tensor::<f64>::from_array2(&m)?;
    let id = Array2::eye(2);

    let c = a.prod(&id, 2)?;
    assert_eq!(c.to_array2()?, m);

    let row_sums = a.prod(&Array1::ones(2), 2)?;
    assert_eq!(row_sums.to_array1()?, array![3.0, 7.0]);
    assert_eq!(to_matrix_rank2(&row_sums)?.dim(), (2, 1));
    Ok(())
}

#[test]
fn test_transpose_and_layout_interplay() -> Result<()> {
    let mut a = Tensor::<i64>::with_layout(DynExtents::new(&[2, 3, 4])?, Layout::LastOrder);
    let mut k = 0;
    for_each_index(&[2, 3, 4], Layout::FirstOrder, |idx| {
        a[idx] = k;
        k += 1;
    });

    let t = trans(&a, &[2, 3, 1])?;
    assert_eq!(t.dims(), &[4, 2, 3]);
    for_each_index(a.dims(), Layout::FirstOrder, |idx| {
        assert_eq!(t[[idx[2], idx[0], idx[1]]], a[idx]);
    });

    let f = a.to_layout(Layout::FirstOrder)?;
    assert_eq!(f, a);
    assert_eq!(f.as_slice(), (0..24).collect::<Vec<i64>>().as_slice());
    Ok(())
}

#[test]
fn test_expressions_and_comparisons() -> Result<()> {
    let a = Tensor::<f64>::ones(&[3, 2])?;
    let b = Tensor::from_elem(DynExtents::new(&[3, 2])?, Layout::LastOrder, 4.0);

    let mut c = Tensor::<f64>::zeros(&[3, 2])?;
    c.assign(&b / 2.0 + &a)?;
    assert!(c.expr().all_eq_scalar(3.0)?);
    assert!(a.expr().all_lt(&c)?);
    assert!((&c - &a).all_eq(&b * 0.5)?);

    let other = Tensor::<f64>::ones(&[2, 3])?;
    assert!(!a.expr().all_eq(&other)?);
    assert!(matches!(
        a.expr().all_le(&other),
        Err(TensorError::InvalidShape { .. })
    ));
    Ok(())
}

#[test]
fn test_complex_pipeline() -> Result<()> {
    let e = DynExtents::new(&[2, 2])?;
    let z = Tensor::from_elem(e, Layout::FirstOrder, Complex::new(3.0, 4.0));
    let w = Tensor::<Complex<f64>>::from_expr(&z * Complex::new(0.0, 1.0))?;

    assert!(real(&w).expr().all_eq_scalar(-4.0)?);
    assert!(real(&conj(&w)).expr().all_eq_scalar(-4.0)?);
    assert!((norm(&real(&z))? - 6.0).abs() < 1e-10);
    Ok(())
}

#[test]
fn test_reshape_round_trip_with_padding() -> Result<()> {
    let a = Tensor::<f64>::ones(&[2, 3])?;
    let grown = reshape(&a, DynExtents::new(&[2, 4])?, -1.0);
    assert_eq!(grown.iter().filter(|&&x| x == -1.0).count(), 2);

    let shrunk = reshape(&grown, RankExtents::<2>::new([2, 3])?, 0.0);
    assert_eq!(shrunk, a);
    assert_eq!(shrunk.extents().rank(), 2);
    Ok(())
}

#[test]
fn test_labelled_product_matches_prod_tensor() -> Result<()> {
    let a = Tensor::from_vec(
        DynExtents::new(&[2, 3, 4])?,
        Layout::LastOrder,
        (0..24).map(f64::from).collect(),
    )?;
    let b = Tensor::from_vec(
        DynExtents::new(&[4, 3])?,
        Layout::LastOrder,
        (0..12).map(|x| f64::from(x) - 5.0).collect(),
    )?;

    let by_label = (a.indexed("_jk")? * b.indexed("kj")?)?;
    let by_mode = prod_tensor(&a, &b, &[2, 3], &[2, 1])?;
    assert_eq!(by_label, by_mode);
    assert_eq!(by_label.dims(), &[2]);
    assert_eq!(prod_indexed(&a, "_jk", &b, "kj")?, by_mode);
    Ok(())
}

#[test]
fn test_subtensor_writes_feed_products() -> Result<()> {
    let mut t = Tensor::<f64>::zeros(&[4, 4])?;
    // ones on the lower-right 2x2 block, twos on the last column of that block
    t.slice_mut(&[Slice::new(-2, -1, 1)?, Slice::new(2, 3, 1)?])?.fill(1.0);
    t.subtensor_mut(&[Span::range(2, 3)?, Span::at(3)])?.fill(2.0);

    let block = t.subtensor(&[Span::range(2, 3)?, Span::range(2, 3)?])?;
    assert_eq!(block.to_tensor()?.as_slice(), &[1.0, 1.0, 2.0, 2.0]);

    let v = prod_vector(&t, &Array1::ones(4), 2)?;
    assert_eq!(v.as_slice(), &[0.0, 0.0, 3.0, 3.0]);

    let dense = block.to_tensor()?;
    let doubled = (block.expr() * 2.0).eval()?;
    assert!(doubled.expr().all_eq(&dense * 2.0)?);
    Ok(())
}

#[test]
fn test_error_kinds_surface() -> Result<()> {
    let a = Tensor::<f64>::ones(&[2, 3])?;
    assert!(matches!(
        a.get(&[0]),
        Err(TensorError::InvalidArgumentCount {
            expected: 2,
            actual: 1
        })
    ));
    assert!(matches!(a.at(&[2, 0]), Err(TensorError::OutOfRange { .. })));
    assert!(matches!(
        prod_vector(&a, &Array1::ones(2), 0),
        Err(TensorError::OutOfRange { .. })
    ));
    assert!(matches!(
        Tensor::<f64>::from_dims(&[2, 0]),
        Err(TensorError::InvalidShape { .. })
    ));
    assert!(matches!(
        Tensor::<f64, RankExtents<2>>::from_dims(&[2]),
        Err(TensorError::LengthMismatch { .. })
    ));
    Ok(())
}
