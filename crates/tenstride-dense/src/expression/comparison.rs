//! Whole-tensor comparisons of expressions
//!
//! Each method answers whether a predicate holds for every element pair.
//! Equality-type predicates treat extents that differ as "not equal"; ordering
//! predicates reject them with `InvalidShape`. A scalar on either side is
//! compared against every element.

use super::{Expr, IntoExpr};
use scirs2_core::numeric::Num;
use tenstride_core::{for_each_index, Layout, Result, TensorError};

impl<'a, T: Copy + Num> Expr<'a, T> {
    fn compare_with<R, P>(self, other: R, operation: &str, equality: bool, pred: P) -> Result<bool>
    where
        R: IntoExpr<'a, T>,
        P: Fn(T, T) -> bool,
    {
        let other = other.into_expr();
        let (dl, dr) = (self.dims(), other.dims());
        if let Some(d) = dl {
            self.check_operands(operation, d)?;
        }
        if let Some(d) = dr {
            other.check_operands(operation, d)?;
        }

        let dims = match (dl, dr) {
            (Some(l), Some(r)) if l != r => {
                if equality {
                    return Ok(false);
                }
                return Err(TensorError::invalid_shape(
                    operation,
                    r,
                    format!("cannot order against extents {:?}", l),
                ));
            }
            (Some(d), _) | (None, Some(d)) => d,
            (None, None) => return Ok(pred(self.eval_at(&[]), other.eval_at(&[]))),
        };

        let layout = self.layout().or_else(|| other.layout()).unwrap_or(Layout::FirstOrder);
        let mut holds = true;
        for_each_index(dims, layout, |idx| {
            if holds {
                holds = pred(self.eval_at(idx), other.eval_at(idx));
            }
        });
        Ok(holds)
    }

    /// Every element equals its counterpart
    ///
    /// Differing extents give `Ok(false)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_dense::Tensor;
    ///
    /// let a = Tensor::<f64>::ones(&[2, 2]).unwrap();
    /// let b = Tensor::<f64>::ones(&[2, 2]).unwrap();
    /// assert!((&a + &b).all_eq(&a * 2.0).unwrap());
    /// assert!(!a.expr().all_eq(&Tensor::<f64>::ones(&[4]).unwrap()).unwrap());
    /// ```
    pub fn all_eq<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_eq", true, |l, r| l == r)
    }

    /// Every element differs from its counterpart
    ///
    /// Differing extents give `Ok(false)`.
    pub fn all_ne<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_ne", true, |l, r| l != r)
    }

    /// Every element equals `value`
    pub fn all_eq_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_eq_scalar", true, |l, r| l == r)
    }

    /// Every element differs from `value`
    pub fn all_ne_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_ne_scalar", true, |l, r| l != r)
    }
}

impl<'a, T: Copy + Num + PartialOrd> Expr<'a, T> {
    /// Every element is less than its counterpart
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the extents differ.
    pub fn all_lt<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_lt", false, |l, r| l < r)
    }

    /// Every element is at most its counterpart
    pub fn all_le<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_le", false, |l, r| l <= r)
    }

    /// Every element is greater than its counterpart
    pub fn all_gt<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_gt", false, |l, r| l > r)
    }

    /// Every element is at least its counterpart
    pub fn all_ge<R: IntoExpr<'a, T>>(self, other: R) -> Result<bool> {
        self.compare_with(other, "Expr::all_ge", false, |l, r| l >= r)
    }

    /// Every element is less than `value`
    pub fn all_lt_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_lt_scalar", false, |l, r| l < r)
    }

    /// Every element is at most `value`
    pub fn all_le_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_le_scalar", false, |l, r| l <= r)
    }

    /// Every element is greater than `value`
    pub fn all_gt_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_gt_scalar", false, |l, r| l > r)
    }

    /// Every element is at least `value`
    pub fn all_ge_scalar(self, value: T) -> Result<bool> {
        self.compare_with(Expr::Scalar(value), "Expr::all_ge_scalar", false, |l, r| l >= r)
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor;
    use tenstride_core::{DynExtents, Layout, TensorError};

    fn filled(dims: &[usize], value: f64) -> Tensor<f64> {
        Tensor::from_elem(DynExtents::new(dims).unwrap(), Layout::FirstOrder, value)
    }

    #[test]
    fn test_equality_and_inequality() {
        let a = filled(&[2, 3], 1.0);
        let b = filled(&[2, 3], 2.0);
        assert!(a.expr().all_eq(&a).unwrap());
        assert!(!a.expr().all_eq(&b).unwrap());
        assert!(a.expr().all_ne(&b).unwrap());
        assert!((&a * 2.0).all_eq(&b).unwrap());
    }

    #[test]
    fn test_all_ne_requires_every_element() {
        let a = Tensor::from_vec(DynExtents::new(&[3]).unwrap(), Layout::FirstOrder, vec![1.0, 2.0, 3.0])
            .unwrap();
        let b = Tensor::from_vec(DynExtents::new(&[3]).unwrap(), Layout::FirstOrder, vec![1.0, 0.0, 0.0])
            .unwrap();
        assert!(!a.expr().all_ne(&b).unwrap());
        assert!(!a.expr().all_eq(&b).unwrap());
    }

    #[test]
    fn test_equality_with_mismatched_extents_is_false() {
        let a = filled(&[2, 3], 1.0);
        let b = filled(&[3, 2], 1.0);
        assert!(!a.expr().all_eq(&b).unwrap());
        assert!(!a.expr().all_ne(&b).unwrap());
    }

    #[test]
    fn test_ordering_with_mismatched_extents_fails() {
        let a = filled(&[2, 3], 1.0);
        let b = filled(&[6], 2.0);
        let err = a.expr().all_lt(&b).unwrap_err();
        assert!(matches!(err, TensorError::InvalidShape { .. }));
    }

    #[test]
    fn test_ordering() {
        let a = filled(&[2, 2], 1.0);
        let b = filled(&[2, 2], 2.0);
        assert!(a.expr().all_lt(&b).unwrap());
        assert!(a.expr().all_le(&b).unwrap());
        assert!(a.expr().all_le(&a).unwrap());
        assert!(!a.expr().all_gt(&b).unwrap());
        assert!(b.expr().all_ge(&a).unwrap());
    }

    #[test]
    fn test_scalar_comparisons() {
        let a = filled(&[2, 2], 3.0);
        assert!(a.expr().all_eq_scalar(3.0).unwrap());
        assert!(a.expr().all_ne_scalar(4.0).unwrap());
        assert!(a.expr().all_lt_scalar(4.0).unwrap());
        assert!(a.expr().all_le_scalar(3.0).unwrap());
        assert!(a.expr().all_gt_scalar(2.0).unwrap());
        assert!(!a.expr().all_ge_scalar(3.5).unwrap());
    }

    #[test]
    fn test_layout_does_not_matter() {
        let e = DynExtents::new(&[2, 2]).unwrap();
        let f = Tensor::from_vec(e.clone(), Layout::FirstOrder, vec![1.0, 3.0, 2.0, 4.0]).unwrap();
        let l = Tensor::from_vec(e, Layout::LastOrder, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(f.expr().all_eq(&l).unwrap());
    }

    #[test]
    fn test_inconsistent_operands_fail() {
        let a = filled(&[2], 1.0);
        let b = filled(&[3], 1.0);
        let err = (&a + &b).all_eq(&a).unwrap_err();
        assert!(matches!(err, TensorError::InvalidShape { .. }));
    }
}
