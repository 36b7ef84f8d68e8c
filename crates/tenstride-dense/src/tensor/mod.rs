//! Owning strided tensor
//!
//! The container is split the same way as its operations:
//!
//! - `types` - the struct, constructors and accessors
//! - `indexing` - checked access and layout conversion
//! - `tensor_traits` - `Index`, `PartialEq` and `Debug`
//! - `subtensor` - strided views selected by spans and slices

pub mod types;

mod indexing;
mod subtensor;
mod tensor_traits;

pub use subtensor::{Subtensor, SubtensorMut};
pub use types::Tensor;
