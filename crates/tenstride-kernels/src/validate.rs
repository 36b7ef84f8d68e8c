//! Operand checks shared by all kernels
//!
//! Every kernel validates its operands up front so a malformed call fails
//! before any element is written.

use smallvec::SmallVec;
use tenstride_core::{Result, Shape, TensorError};

/// Check one operand of rank `p`.
///
/// Rank 0 always passes. Otherwise the data slice must be non-empty, the
/// extents and strides must cover `p` axes, every extent must be positive and
/// the slice must hold the largest strided offset. An offset that overflows
/// `usize` is reported as `BufferTooSmall` with `required == usize::MAX`.
pub(crate) fn check_operand(
    operation: &str,
    operand: &str,
    p: usize,
    len: usize,
    extents: &[usize],
    strides: &[usize],
) -> Result<()> {
    if p == 0 {
        return Ok(());
    }
    if len == 0 || extents.len() < p || strides.len() < p {
        return Err(TensorError::null_buffer(operation, operand));
    }
    let mut last = 0usize;
    for k in 0..p {
        if extents[k] == 0 {
            return Err(TensorError::invalid_shape(
                operation,
                &extents[..p],
                "every extent must be at least 1",
            ));
        }
        last = match (extents[k] - 1)
            .checked_mul(strides[k])
            .and_then(|step| last.checked_add(step))
        {
            Some(next) => next,
            None => {
                return Err(TensorError::buffer_too_small(
                    operation,
                    operand,
                    usize::MAX,
                    len,
                ))
            }
        };
    }
    if last >= len {
        return Err(TensorError::buffer_too_small(
            operation,
            operand,
            last.saturating_add(1),
            len,
        ));
    }
    Ok(())
}

/// Check that `mode < rank`.
pub(crate) fn check_mode(operation: &str, mode: usize, rank: usize) -> Result<()> {
    if mode >= rank {
        return Err(TensorError::out_of_range(
            operation,
            mode,
            rank,
            "mode must be < rank",
        ));
    }
    Ok(())
}

/// Check that `pi` is a permutation of `0..rank`.
pub(crate) fn check_permutation(operation: &str, pi: &[usize], rank: usize) -> Result<()> {
    if pi.len() != rank {
        return Err(TensorError::invalid_permutation(operation, pi, rank));
    }
    let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, rank);
    for &k in pi {
        if k >= rank || seen[k] {
            return Err(TensorError::invalid_permutation(operation, pi, rank));
        }
        seen[k] = true;
    }
    Ok(())
}

/// Inverse of a 0-based permutation.
///
/// # Errors
///
/// `InvalidPermutation` if `pi` is not a permutation of `0..pi.len()`.
///
/// # Examples
///
/// ```
/// use tenstride_kernels::invert_permutation;
///
/// let inv = invert_permutation(&[2, 0, 1]).unwrap();
/// assert_eq!(inv.as_slice(), &[1, 2, 0]);
/// ```
pub fn invert_permutation(pi: &[usize]) -> Result<Shape> {
    check_permutation("invert_permutation", pi, pi.len())?;
    let mut inv = Shape::from_elem(0, pi.len());
    for (r, &k) in pi.iter().enumerate() {
        inv[k] = r;
    }
    Ok(inv)
}

/// Reorder `values` so that position `k` holds `values[pi[k]]`.
pub(crate) fn gather(values: &[usize], pi: &[usize]) -> Shape {
    pi.iter().map(|&k| values[k]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_operand_rank_zero() {
        assert!(check_operand("op", "a", 0, 0, &[], &[]).is_ok());
    }

    #[test]
    fn test_check_operand_null() {
        let err = check_operand("op", "a", 2, 0, &[2, 2], &[1, 2]).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
        let err = check_operand("op", "a", 2, 4, &[2], &[1, 2]).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
        let err = check_operand("op", "a", 2, 4, &[2, 2], &[1]).unwrap_err();
        assert!(matches!(err, TensorError::NullBuffer { .. }));
    }

    #[test]
    fn test_check_operand_too_small() {
        let err = check_operand("op", "a", 2, 3, &[2, 2], &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::BufferTooSmall {
                required: 4,
                actual: 3,
                ..
            }
        ));
        assert!(check_operand("op", "a", 2, 4, &[2, 2], &[1, 2]).is_ok());
    }

    #[test]
    fn test_check_operand_offset_overflow() {
        let err = check_operand("op", "a", 2, 8, &[3, 2], &[usize::MAX / 2 + 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::BufferTooSmall {
                required: usize::MAX,
                actual: 8,
                ..
            }
        ));

        // no single step overflows, their sum does
        let err = check_operand("op", "a", 2, 8, &[2, 2], &[usize::MAX, 1]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::BufferTooSmall {
                required: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_check_permutation() {
        assert!(check_permutation("op", &[1, 0, 2], 3).is_ok());
        assert!(check_permutation("op", &[1, 1, 2], 3).is_err());
        assert!(check_permutation("op", &[0, 1], 3).is_err());
        assert!(check_permutation("op", &[0, 3, 1], 3).is_err());
    }

    #[test]
    fn test_invert_permutation() {
        let pi = [3, 1, 0, 2];
        let inv = invert_permutation(&pi).unwrap();
        for (r, &k) in pi.iter().enumerate() {
            assert_eq!(inv[k], r);
        }
        assert!(invert_permutation(&[0, 0]).is_err());
    }

    #[test]
    fn test_gather() {
        assert_eq!(gather(&[4, 2, 3], &[2, 0, 1]).as_slice(), &[3, 4, 2]);
    }
}
