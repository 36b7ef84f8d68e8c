//! # tenstride - Strided N-dimensional tensors
//!
//! Extents, strides and layouts; rank-agnostic strided kernels; and an owning
//! tensor with lazy expressions and generalized contractions.
//!
//! This is the **meta crate** that re-exports all tenstride components.
//!
//! ## Quick Start
//!
//! ```
//! use tenstride::prelude::*;
//!
//! let a = Tensor::from_elem(DynExtents::new(&[3, 4, 2])?, Layout::FirstOrder, 2.0);
//! let b = Tensor::<f64>::ones(&[4, 2, 5])?;
//!
//! // contract modes 2 and 3 of `a` with modes 1 and 2 of `b`
//! let c = prod_tensor(&a, &b, &[2, 3], &[1, 2])?;
//! assert_eq!(c.dims(), &[3, 5]);
//! assert!(c.expr().all_eq_scalar(16.0)?);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Indexing ([`core`])
//!
//! Extents in three representations (runtime rank, const-generic rank,
//! compile-time sizes), first-order and last-order strides, and conversions
//! between multi-indices and storage offsets.
//!
//! ```
//! use tenstride::core::{compute_multi_index, compute_single_index, to_strides, Layout};
//!
//! let w = to_strides(&[4, 2, 3], Layout::FirstOrder);
//! assert_eq!(w.as_slice(), &[1, 4, 8]);
//! assert_eq!(compute_single_index(&[1, 1, 2], &w), 21);
//! assert_eq!(compute_multi_index(21, &w, Layout::FirstOrder).as_slice(), &[1, 1, 2]);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! copy, transform, accumulate, trans, inner, outer, mtv, mtm, ttv, ttm and
//! ttt over borrowed strided buffers. Modes are 0-based at this level.
//!
//! ### Tensors ([`dense`])
//!
//! The `Tensor` container, expressions, products with 1-based modes, norms
//! and ndarray interop. Spans and slices select strided subtensors, and
//! labelled products contract modes by name.
//!
//! ```
//! use tenstride::prelude::*;
//!
//! let a = Tensor::<f64>::ones(&[4, 6])?;
//! let s = a.subtensor(&[Span::range(1, 2)?, Span::new(0, 2, 5)?])?;
//! assert_eq!(s.dims(), &[2, 3]);
//!
//! let b = s.to_tensor()?;
//! let c = (b.indexed("_k")? * b.indexed("_k")?)?;
//! assert_eq!(c.dims(), &[2, 2]);
//! assert!(c.iter().all(|&x| x == 3.0));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Features
//!
//! - `blocked-mtm` (default): recursive blocked matrix-matrix product
//! - `serde`: serialization of layouts, extents and tensors

#![deny(warnings)]

// Re-export all components
pub use tenstride_core as core;
pub use tenstride_dense as dense;
pub use tenstride_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenstride::prelude::*;
    //!
    //! let t = Tensor::<f64>::zeros(&[2, 3]).unwrap();
    //! assert_eq!(t.strides(), &[1, 2]);
    //! ```

    // Indexing
    pub use crate::core::{
        DynExtents, Extents, Layout, RankExtents, Slice, Span, StaticExtents, TensorError,
    };

    // Tensors and expressions
    pub use crate::dense::{Expr, Indexed, IntoExpr, Prod, Subtensor, SubtensorMut, Tensor};

    // Products and functions
    pub use crate::dense::{
        inner_prod, norm, outer_prod, prod_indexed, prod_matrix, prod_tensor, prod_tensor_same,
        prod_vector, reshape, trans,
    };
}
