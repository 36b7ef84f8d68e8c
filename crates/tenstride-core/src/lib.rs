//! # tenstride-core
//!
//! Shape, layout and indexing primitives for strided N-dimensional arrays.
//!
//! This crate provides the leaf layer of the tenstride stack:
//!
//! - **Extents** in three representations sharing the [`Extents`] trait:
//!   [`DynExtents`] (runtime rank), [`RankExtents`] (const-generic rank) and
//!   [`StaticExtents`] (compile-time sizes, zero-sized)
//! - **Layouts** ([`Layout::FirstOrder`], [`Layout::LastOrder`])
//! - **Strides** derived from extents and layout ([`to_strides`])
//! - **Index transforms** between multi-indices and linear offsets
//! - **Spans and slices** selecting strided regions ([`Span`], [`Slice`],
//!   [`select`])
//! - The shared error taxonomy ([`TensorError`])
//!
//! ## Quick Start
//!
//! ```
//! use tenstride_core::{
//!     compute_multi_index, compute_single_index, to_strides, DynExtents, Extents, Layout,
//! };
//!
//! let e = DynExtents::new(&[4, 2, 3]).unwrap();
//! assert_eq!(e.product(), 24);
//!
//! let w = to_strides(e.dims(), Layout::FirstOrder);
//! assert_eq!(w.as_slice(), &[1, 4, 8]);
//!
//! let j = compute_single_index(&[1, 1, 2], &w);
//! assert_eq!(j, 21);
//! assert_eq!(compute_multi_index(j, &w, Layout::FirstOrder).as_slice(), &[1, 1, 2]);
//! ```
//!
//! ## Extents conventions
//!
//! - A zero size is rejected at construction
//! - Rank-0 extents have product 0
//! - Equality is rank-sensitive: `{1} != {1, 1}`

#![deny(warnings)]

pub mod error;
pub mod extents;
pub mod index;
pub mod layout;
pub mod span;
pub mod strides;
pub mod types;


pub use error::{Result, TensorError};
pub use extents::{validate_dims, DynExtents, Extents, RankExtents, StaticDims, StaticExtents};
pub use index::{
    compute_multi_index, compute_multi_index_into, compute_single_index,
    compute_single_index_checked, for_each_index,
};
pub use layout::Layout;
pub use span::{select, Region, Slice, Span};
pub use strides::{is_dense, to_strides};
pub use types::{Axis, Rank, Shape, Strides};
