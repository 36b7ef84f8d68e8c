//! Storage layout tags

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis ordering of a tensor's storage
///
/// `FirstOrder` lets the first index vary fastest (column-major for matrices).
/// `LastOrder` lets the last index vary fastest (row-major for matrices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    #[default]
    FirstOrder,
    LastOrder,
}

impl Layout {
    /// The other layout
    pub fn flipped(self) -> Self {
        match self {
            Layout::FirstOrder => Layout::LastOrder,
            Layout::LastOrder => Layout::FirstOrder,
        }
    }

    /// Whether the first axis has unit stride
    pub fn is_first_order(self) -> bool {
        matches!(self, Layout::FirstOrder)
    }
}
