//! # tenstride-kernels
//!
//! Strided tensor kernels for tenstride.
//!
//! ## Overview
//!
//! Every kernel operates on borrowed memory described by extents and strides,
//! so the same routine serves first-order, last-order and permuted layouts
//! without copying. Kernels never allocate their result; the caller supplies
//! a destination view.
//!
//! **Key Features:**
//! - ✅ **copy / transform** - Element-wise mapping between any two layouts
//! - ✅ **accumulate** - Fold over all elements
//! - ✅ **trans / trans_conj** - Axis permutation (with complex conjugation)
//! - ✅ **inner / outer** - Generalized inner and outer products
//! - ✅ **mtv / mtm** - Matrix-vector and blocked matrix-matrix products
//! - ✅ **ttv / ttm** - Single-mode contractions with vectors and matrices
//! - ✅ **ttt** - Contraction over `q` shared modes, optionally permuted
//!
//! All modes and permutations at this level are 0-based.
//!
//! ## Quick Start
//!
//! ```rust
//! use tenstride_core::{to_strides, Layout};
//! use tenstride_kernels::{ttv, View, ViewMut};
//!
//! // Contract mode 0 of a 3x4x2 tensor of twos with a vector of ones
//! let na = [3, 4, 2];
//! let wa = to_strides(&na, Layout::FirstOrder);
//! let a = vec![2.0; 24];
//! let v = vec![1.0; 3];
//!
//! let nc = [4, 2];
//! let wc = to_strides(&nc, Layout::FirstOrder);
//! let mut c = vec![0.0; 8];
//!
//! ttv(
//!     0,
//!     ViewMut::new(&mut c, &nc, &wc),
//!     View::new(&a, &na, &wa),
//!     View::new(&v, &[3], &[1]),
//! )
//! .unwrap();
//! assert!(c.iter().all(|&x| x == 6.0));
//! ```
//!
//! ## Validation
//!
//! Operands are checked before any element is written. An empty data slice
//! for an operand of positive rank is a `NullBuffer` error; a slice too short
//! for its extents and strides is `BufferTooSmall`.
//!
//! ## Features
//!
//! - `blocked-mtm` (default) - Tile `mtm` by [`MTM_BLOCK`]

#![deny(warnings)]

pub mod algorithms;
pub mod contraction;
pub mod inner;
pub mod outer;
pub mod validate;
pub mod view;

mod walk;


// Re-exports
pub use algorithms::*;
pub use contraction::*;
pub use inner::*;
pub use outer::*;
pub use validate::invert_permutation;
pub use view::*;

pub use tenstride_core::{Result, TensorError};
