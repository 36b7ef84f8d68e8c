//! # tenstride-dense
//!
//! Owning strided tensors and the operations built on them.
//!
//! This crate provides:
//!
//! - **[`Tensor`]** - a dense container generic over the element type and the
//!   extents representation, stored in first-order or last-order layout
//! - **Expressions** ([`Expr`]) - lazy element-wise arithmetic with a single
//!   allocation per evaluation, plus whole-tensor comparisons
//! - **Products** - [`prod_vector`], [`prod_matrix`], [`prod_tensor`] and the
//!   [`Prod`] trait
//! - **Functions** - [`trans`], [`inner_prod`], [`outer_prod`], norms, complex
//!   parts and [`reshape`]
//! - **Interop** - conversions to and from `Array1` / `Array2`
//! - **Views** - [`Subtensor`] and [`SubtensorMut`] select strided regions by
//!   span or slice
//! - **Labelled products** - [`Tensor::indexed`] and [`prod_indexed`] contract
//!   modes by label
//!
//! ## Modes are 1-based
//!
//! Modes and permutations passed to [`prod`] and [`functions`] count from 1.
//! The kernels in `tenstride-kernels` count from 0; [`modes::to_zero_based`]
//! is the only place the two meet.
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::Array1;
//! use tenstride_core::{DynExtents, Layout};
//! use tenstride_dense::{prod_vector, Tensor};
//!
//! // 3x4x2 tensor of twos times a ones vector along mode 1
//! let a = Tensor::from_elem(DynExtents::new(&[3, 4, 2]).unwrap(), Layout::FirstOrder, 2.0);
//! let c = prod_vector(&a, &Array1::ones(3), 1).unwrap();
//! assert_eq!(c.dims(), &[4, 2]);
//! assert!(c.iter().all(|&x| x == 6.0));
//!
//! // element-wise expressions evaluate lazily
//! let d = Tensor::<f64>::from_expr(&c * 2.0 - 1.0).unwrap();
//! assert!(d.expr().all_eq_scalar(11.0).unwrap());
//! ```
//!
//! ## Results without free modes
//!
//! A product that contracts every mode returns a tensor with extents `[1]`.
//! [`interop::to_matrix_rank2`] views any result of rank at most 2 as a
//! matrix.

#![deny(warnings)]

pub mod einstein;
pub mod expression;
pub mod functions;
pub mod interop;
pub mod modes;
pub mod prod;
pub mod tensor;


// Re-exports
pub use einstein::{prod_indexed, Indexed};
pub use expression::{BinaryOp, Expr, IntoExpr, Operand, UnaryOp};
pub use functions::*;
pub use interop::to_matrix_rank2;
pub use prod::{prod_matrix, prod_tensor, prod_tensor_same, prod_vector, Prod};
pub use tensor::{Subtensor, SubtensorMut, Tensor};

pub use tenstride_core::{Result, TensorError};
