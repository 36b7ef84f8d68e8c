//! 1-based modes of the public function surface
//!
//! Functions in [`prod`](crate::prod) and [`functions`](crate::functions) take
//! modes and permutations counted from 1. They are shifted here, once, before
//! reaching the 0-based kernels.

use tenstride_core::{Result, Shape, TensorError};

/// Convert 1-based modes of a rank-`rank` tensor to 0-based axes.
///
/// # Errors
///
/// `OutOfRange` if any mode is 0 or greater than `rank`.
///
/// # Examples
///
/// ```
/// use tenstride_dense::modes::to_zero_based;
///
/// let axes = to_zero_based("prod", &[3, 1], 3).unwrap();
/// assert_eq!(axes.as_slice(), &[2, 0]);
/// assert!(to_zero_based("prod", &[0], 3).is_err());
/// ```
pub fn to_zero_based(operation: &str, modes: &[usize], rank: usize) -> Result<Shape> {
    modes
        .iter()
        .map(|&m| to_axis(operation, m, rank))
        .collect()
}

/// Convert a single 1-based mode.
pub fn to_axis(operation: &str, mode: usize, rank: usize) -> Result<usize> {
    if mode == 0 || mode > rank {
        return Err(TensorError::out_of_range(
            operation,
            mode,
            rank,
            "modes are 1-based and must not exceed the rank",
        ));
    }
    Ok(mode - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift() {
        assert_eq!(to_zero_based("op", &[1, 2, 3], 3).unwrap().as_slice(), &[0, 1, 2]);
        assert!(to_zero_based("op", &[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_bounds() {
        assert!(matches!(
            to_axis("op", 0, 2),
            Err(TensorError::OutOfRange { index: 0, bound: 2, .. })
        ));
        assert!(to_axis("op", 3, 2).is_err());
        assert_eq!(to_axis("op", 2, 2).unwrap(), 1);
    }
}
