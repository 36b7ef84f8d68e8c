//! Error types for extents, strided algorithms and contractions
//!
//! Every failure in the workspace is a programming-contract violation that is
//! reported eagerly at the offending call. The variants below keep the kinds
//! distinguishable so callers can match on them.

use thiserror::Error;

/// Error type shared by all tenstride crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// Extents containing a zero size, or operands whose shapes must agree but don't
    #[error("{operation}: invalid shape {dims:?}: {reason}")]
    InvalidShape {
        operation: String,
        dims: Vec<usize>,
        reason: String,
    },

    /// Sequence length differs from a rank fixed at compile time
    #[error("{operation}: expected {expected} extents, got {actual}")]
    LengthMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// Index, axis or mode beyond its bound
    #[error("{operation}: index {index} out of range (bound {bound}). {context}")]
    OutOfRange {
        operation: String,
        index: usize,
        bound: usize,
        context: String,
    },

    /// Wrong number of indices passed to a multi-index accessor
    #[error("invalid number of indices: tensor has rank {expected}, got {actual}")]
    InvalidArgumentCount { expected: usize, actual: usize },

    /// Missing data, extents or strides for a non-zero rank
    #[error("{operation}: operand '{operand}' has no buffer")]
    NullBuffer { operation: String, operand: String },

    /// Buffer does not cover the largest strided offset
    #[error("{operation}: operand '{operand}' needs {required} elements, buffer holds {actual}")]
    BufferTooSmall {
        operation: String,
        operand: String,
        required: usize,
        actual: usize,
    },

    /// Operand extents disagree on contracted or free modes
    #[error("{operation}: incompatible operands {shape_a:?} and {shape_b:?}: {reason}")]
    IncompatibleOperands {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: String,
    },

    /// Permutation with wrong length, duplicates or entries out of range
    #[error("{operation}: {permutation:?} is not a permutation of {rank} axes")]
    InvalidPermutation {
        operation: String,
        permutation: Vec<usize>,
        rank: usize,
    },

    /// Span or slice with a zero step, or a first index past its last
    #[error("{operation}: invalid span {span}: {reason}")]
    InvalidSpan {
        operation: String,
        span: String,
        reason: String,
    },

    /// Mode labels of an index-notation product that cannot be paired
    #[error("{operation}: invalid labels {labels:?}: {reason}")]
    InvalidLabels {
        operation: String,
        labels: String,
        reason: String,
    },
}

/// Result type for tenstride operations
pub type Result<T> = std::result::Result<T, TensorError>;

impl TensorError {
    /// Create an invalid shape error
    pub fn invalid_shape(
        operation: impl Into<String>,
        dims: &[usize],
        reason: impl Into<String>,
    ) -> Self {
        TensorError::InvalidShape {
            operation: operation.into(),
            dims: dims.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create a length mismatch error
    pub fn length_mismatch(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        TensorError::LengthMismatch {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(
        operation: impl Into<String>,
        index: usize,
        bound: usize,
        context: impl Into<String>,
    ) -> Self {
        TensorError::OutOfRange {
            operation: operation.into(),
            index,
            bound,
            context: context.into(),
        }
    }

    /// Create an invalid argument count error
    pub fn invalid_argument_count(expected: usize, actual: usize) -> Self {
        TensorError::InvalidArgumentCount { expected, actual }
    }

    /// Create a null buffer error
    pub fn null_buffer(operation: impl Into<String>, operand: impl Into<String>) -> Self {
        TensorError::NullBuffer {
            operation: operation.into(),
            operand: operand.into(),
        }
    }

    /// Create a buffer-too-small error
    pub fn buffer_too_small(
        operation: impl Into<String>,
        operand: impl Into<String>,
        required: usize,
        actual: usize,
    ) -> Self {
        TensorError::BufferTooSmall {
            operation: operation.into(),
            operand: operand.into(),
            required,
            actual,
        }
    }

    /// Create an incompatible operands error
    pub fn incompatible_operands(
        operation: impl Into<String>,
        shape_a: &[usize],
        shape_b: &[usize],
        reason: impl Into<String>,
    ) -> Self {
        TensorError::IncompatibleOperands {
            operation: operation.into(),
            shape_a: shape_a.to_vec(),
            shape_b: shape_b.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create an invalid permutation error
    pub fn invalid_permutation(
        operation: impl Into<String>,
        permutation: &[usize],
        rank: usize,
    ) -> Self {
        TensorError::InvalidPermutation {
            operation: operation.into(),
            permutation: permutation.to_vec(),
            rank,
        }
    }

    /// Create an invalid span error
    pub fn invalid_span(
        operation: impl Into<String>,
        span: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TensorError::InvalidSpan {
            operation: operation.into(),
            span: span.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid labels error
    pub fn invalid_labels(
        operation: impl Into<String>,
        labels: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TensorError::InvalidLabels {
            operation: operation.into(),
            labels: labels.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_display() {
        let err = TensorError::invalid_shape("extents", &[3, 0, 2], "sizes must be positive");
        let msg = format!("{}", err);
        assert!(msg.contains("extents"));
        assert!(msg.contains("[3, 0, 2]"));
        assert!(msg.contains("sizes must be positive"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = TensorError::out_of_range("ttv", 3, 3, "mode must be < rank");
        let msg = format!("{}", err);
        assert!(msg.contains("ttv"));
        assert!(msg.contains("index 3"));
        assert!(msg.contains("bound 3"));
    }

    #[test]
    fn test_invalid_argument_count_display() {
        let err = TensorError::invalid_argument_count(3, 2);
        let msg = format!("{}", err);
        assert!(msg.contains("rank 3"));
        assert!(msg.contains("got 2"));
    }

    #[test]
    fn test_null_buffer_display() {
        let err = TensorError::null_buffer("copy", "src");
        let msg = format!("{}", err);
        assert!(msg.contains("copy"));
        assert!(msg.contains("'src'"));
    }

    #[test]
    fn test_incompatible_operands_display() {
        let err = TensorError::incompatible_operands("ttm", &[3, 4], &[5, 2], "mode size differs");
        let msg = format!("{}", err);
        assert!(msg.contains("[3, 4]"));
        assert!(msg.contains("[5, 2]"));
        assert!(msg.contains("mode size differs"));
    }

    #[test]
    fn test_permutation_display() {
        let err = TensorError::invalid_permutation("trans", &[0, 0, 2], 3);
        let msg = format!("{}", err);
        assert!(msg.contains("[0, 0, 2]"));
        assert!(msg.contains("3 axes"));
    }

    #[test]
    fn test_error_equality() {
        let a = TensorError::length_mismatch("RankExtents", 3, 2);
        let b = TensorError::length_mismatch("RankExtents", 3, 2);
        assert_eq!(a, b);
        assert!(matches!(a, TensorError::LengthMismatch { expected: 3, .. }));
    }
}
