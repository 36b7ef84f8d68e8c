//! Lazy element-wise expressions over tensors
//!
//! Arithmetic on tensor references builds an [`Expr`] tree instead of a new
//! tensor. The tree is evaluated element by element when it is assigned to a
//! tensor, so `&a + &b * 2.0` allocates a single result.
//!
//! ```
//! use tenstride_dense::Tensor;
//!
//! let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
//! let b = Tensor::<f64>::ones(&[2, 3]).unwrap();
//!
//! let c = Tensor::<f64>::from_expr(&a + &b * 2.0).unwrap();
//! assert!(c.iter().all(|&x| x == 3.0));
//! ```
//!
//! Every tensor operand must have the same extents; operands stored in a
//! different layout are read through their own strides.

mod comparison;
mod ops;

pub use ops::IntoExpr;

use crate::tensor::Tensor;
use scirs2_core::numeric::Num;
use std::fmt;
use tenstride_core::{
    compute_single_index, for_each_index, DynExtents, Extents, Layout, Result, TensorError,
};

/// Borrowed tensor operand of an expression
pub struct Operand<'a, T> {
    data: &'a [T],
    dims: &'a [usize],
    strides: &'a [usize],
    layout: Layout,
}

impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<'a, T> Operand<'a, T> {
    pub(crate) fn new(
        data: &'a [T],
        dims: &'a [usize],
        strides: &'a [usize],
        layout: Layout,
    ) -> Self {
        Self {
            data,
            dims,
            strides,
            layout,
        }
    }

    /// Per-axis sizes of the operand
    pub fn dims(&self) -> &'a [usize] {
        self.dims
    }

    /// Storage order of the operand
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

/// Unary node operation
pub enum UnaryOp<'a, T> {
    /// Additive inverse, computed as `0 - x`
    Neg,
    /// Arbitrary element-wise function
    Map(Box<dyn Fn(T) -> T + 'a>),
}

/// Binary node operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply<T: Num>(self, l: T, r: T) -> T {
        match self {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => l / r,
        }
    }
}

/// Element-wise expression tree
///
/// Nodes borrow their tensor operands for `'a`. An expression is consumed by
/// one evaluation.
pub enum Expr<'a, T> {
    Leaf(Operand<'a, T>),
    Scalar(T),
    Unary(UnaryOp<'a, T>, Box<Expr<'a, T>>),
    Binary(BinaryOp, Box<Expr<'a, T>>, Box<Expr<'a, T>>),
}

impl<T, E: Extents> Tensor<T, E> {
    /// Leaf expression borrowing this tensor
    pub fn expr(&self) -> Expr<'_, T> {
        Expr::Leaf(Operand {
            data: &self.data,
            dims: self.extents.dims(),
            strides: &self.strides,
            layout: self.layout,
        })
    }
}

impl<'a, T> Expr<'a, T> {
    pub(crate) fn binary(op: BinaryOp, l: Expr<'a, T>, r: Expr<'a, T>) -> Self {
        Expr::Binary(op, Box::new(l), Box::new(r))
    }

    /// Apply `f` to every element of this expression
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_dense::Tensor;
    ///
    /// let a = Tensor::<f64>::from_elem(
    ///     tenstride_core::DynExtents::new(&[3]).unwrap(),
    ///     tenstride_core::Layout::FirstOrder,
    ///     4.0,
    /// );
    /// let r = a.expr().map(f64::sqrt).eval().unwrap();
    /// assert_eq!(r.as_slice(), &[2.0; 3]);
    /// ```
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T + 'a,
    {
        Expr::Unary(UnaryOp::Map(Box::new(f)), Box::new(self))
    }

    /// Extents of the leftmost tensor operand, `None` for a scalar-only tree
    pub fn dims(&self) -> Option<&'a [usize]> {
        self.leftmost().map(|op| op.dims)
    }

    /// Layout of the leftmost tensor operand
    pub fn layout(&self) -> Option<Layout> {
        self.leftmost().map(|op| op.layout)
    }

    fn leftmost(&self) -> Option<&Operand<'a, T>> {
        match self {
            Expr::Leaf(op) => Some(op),
            Expr::Scalar(_) => None,
            Expr::Unary(_, e) => e.leftmost(),
            Expr::Binary(_, l, r) => l.leftmost().or_else(|| r.leftmost()),
        }
    }

    /// Check that every tensor operand has extents `dims`
    pub(crate) fn check_operands(&self, operation: &str, dims: &[usize]) -> Result<()> {
        match self {
            Expr::Leaf(op) if op.dims != dims => Err(TensorError::invalid_shape(
                operation,
                op.dims,
                format!("operand extents differ from {:?}", dims),
            )),
            Expr::Leaf(_) | Expr::Scalar(_) => Ok(()),
            Expr::Unary(_, e) => e.check_operands(operation, dims),
            Expr::Binary(_, l, r) => {
                l.check_operands(operation, dims)?;
                r.check_operands(operation, dims)
            }
        }
    }

    /// True when every operand is stored with `strides`
    fn shares_strides(&self, strides: &[usize]) -> bool {
        match self {
            Expr::Leaf(op) => op.strides == strides,
            Expr::Scalar(_) => true,
            Expr::Unary(_, e) => e.shares_strides(strides),
            Expr::Binary(_, l, r) => l.shares_strides(strides) && r.shares_strides(strides),
        }
    }
}

impl<T: Copy + Num> Expr<'_, T> {
    /// Value at a multi-index
    pub(crate) fn eval_at(&self, idx: &[usize]) -> T {
        match self {
            Expr::Leaf(op) => op.data[compute_single_index(idx, op.strides)],
            Expr::Scalar(s) => *s,
            Expr::Unary(UnaryOp::Neg, e) => T::zero() - e.eval_at(idx),
            Expr::Unary(UnaryOp::Map(f), e) => f(e.eval_at(idx)),
            Expr::Binary(op, l, r) => op.apply(l.eval_at(idx), r.eval_at(idx)),
        }
    }

    /// Value at a storage offset shared by every operand
    fn eval_linear(&self, j: usize) -> T {
        match self {
            Expr::Leaf(op) => op.data[j],
            Expr::Scalar(s) => *s,
            Expr::Unary(UnaryOp::Neg, e) => T::zero() - e.eval_linear(j),
            Expr::Unary(UnaryOp::Map(f), e) => f(e.eval_linear(j)),
            Expr::Binary(op, l, r) => op.apply(l.eval_linear(j), r.eval_linear(j)),
        }
    }

    /// Evaluate into storage for `dims` in `layout` order
    pub(crate) fn evaluate(&self, operation: &str, dims: &[usize], layout: Layout) -> Result<Vec<T>> {
        self.check_operands(operation, dims)?;
        let len = tenstride_core::extents::product(dims);
        let strides = tenstride_core::to_strides(dims, layout);
        if self.shares_strides(&strides) {
            return Ok((0..len).map(|j| self.eval_linear(j)).collect());
        }
        let mut data = Vec::with_capacity(len);
        for_each_index(dims, layout, |idx| data.push(self.eval_at(idx)));
        Ok(data)
    }

    /// Evaluate into a new tensor with the leftmost operand's extents and layout
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the expression has no tensor operand or its operands
    /// disagree on extents.
    pub fn eval(&self) -> Result<Tensor<T, DynExtents>> {
        Tensor::from_expr_ref(self)
    }
}

impl<T: Copy + Num, E: Extents> Tensor<T, E> {
    /// Evaluate an expression into a new tensor
    ///
    /// The result takes the extents and layout of the leftmost tensor operand.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the expression has no tensor operand or its operands
    /// disagree on extents. `E::from_dims` errors propagate when the result
    /// representation cannot hold the extents.
    pub fn from_expr(expr: Expr<'_, T>) -> Result<Self> {
        Self::from_expr_ref(&expr)
    }

    fn from_expr_ref(expr: &Expr<'_, T>) -> Result<Self> {
        let (dims, layout) = match expr.leftmost() {
            Some(op) => (op.dims, op.layout),
            None => {
                return Err(TensorError::invalid_shape(
                    "Tensor::from_expr",
                    &[],
                    "expression has no tensor operand",
                ))
            }
        };
        let extents = E::from_dims(dims)?;
        let data = expr.evaluate("Tensor::from_expr", dims, layout)?;
        Self::from_vec(extents, layout, data)
    }

    /// Evaluate `expr` and replace this tensor's elements with the result
    ///
    /// The result is computed into a temporary and swapped in, so on error the
    /// tensor is left unchanged.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if any tensor operand's extents differ from this
    /// tensor's.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_dense::Tensor;
    ///
    /// let a = Tensor::<f64>::ones(&[2, 2]).unwrap();
    /// let mut c = Tensor::<f64>::zeros(&[2, 2]).unwrap();
    /// c.assign(-(&a * 3.0)).unwrap();
    /// assert!(c.iter().all(|&x| x == -3.0));
    /// ```
    pub fn assign(&mut self, expr: Expr<'_, T>) -> Result<()> {
        let mut data = expr.evaluate("Tensor::assign", self.extents.dims(), self.layout)?;
        std::mem::swap(&mut self.data, &mut data);
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Expr<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(op) => write!(f, "Leaf({:?})", op.dims),
            Expr::Scalar(s) => write!(f, "Scalar({:?})", s),
            Expr::Unary(UnaryOp::Neg, e) => write!(f, "Neg({:?})", e),
            Expr::Unary(UnaryOp::Map(_), e) => write!(f, "Map({:?})", e),
            Expr::Binary(op, l, r) => write!(f, "{:?}({:?}, {:?})", op, l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(dims: &[usize], layout: Layout) -> Tensor<f64> {
        let e = DynExtents::new(dims).unwrap();
        let mut t = Tensor::with_layout(e, layout);
        let mut v = 0.0;
        for_each_index(dims, Layout::FirstOrder, |idx| {
            v += 1.0;
            t[idx] = v;
        });
        t
    }

    #[test]
    fn test_from_expr_arithmetic() {
        let a = seq(&[2, 3], Layout::FirstOrder);
        let b = Tensor::<f64>::ones(&[2, 3]).unwrap();
        let c = Tensor::<f64>::from_expr((&a + &b) * 2.0 - &a).unwrap();
        for j in 0..6 {
            assert_eq!(c[j], a[j] + 2.0);
        }
    }

    #[test]
    fn test_mixed_layouts_read_by_index() {
        let f = seq(&[2, 3, 2], Layout::FirstOrder);
        let l = f.to_layout(Layout::LastOrder).unwrap();
        let d = Tensor::<f64>::from_expr(&f - &l).unwrap();
        assert!(d.iter().all(|&x| x == 0.0));

        let s = Tensor::<f64>::from_expr(&l + &f).unwrap();
        assert_eq!(s.layout(), Layout::LastOrder);
        for_each_index(&[2, 3, 2], Layout::FirstOrder, |idx| {
            assert_eq!(s[idx], 2.0 * f[idx]);
        });
    }

    #[test]
    fn test_mismatched_extents_rejected() {
        let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
        let b = Tensor::<f64>::ones(&[3, 2]).unwrap();
        let err = Tensor::<f64>::from_expr(&a + &b).unwrap_err();
        assert!(matches!(err, TensorError::InvalidShape { .. }));
    }

    #[test]
    fn test_scalar_only_expression_rejected() {
        let e: Expr<'_, f64> = Expr::Scalar(1.0);
        assert!(Tensor::<f64>::from_expr(e + 2.0).is_err());
    }

    #[test]
    fn test_assign_keeps_target_layout() {
        let a = seq(&[3, 2], Layout::FirstOrder);
        let mut c = Tensor::<f64>::with_layout(DynExtents::new(&[3, 2]).unwrap(), Layout::LastOrder);
        c.assign(a.expr()).unwrap();
        assert_eq!(c.layout(), Layout::LastOrder);
        assert_eq!(c, a);
    }

    #[test]
    fn test_assign_error_leaves_target_untouched() {
        let a = Tensor::<f64>::ones(&[4]).unwrap();
        let mut c = Tensor::<f64>::from_elem(DynExtents::new(&[3]).unwrap(), Layout::FirstOrder, 5.0);
        assert!(c.assign(a.expr() + 1.0).is_err());
        assert_eq!(c.as_slice(), &[5.0; 3]);
    }

    #[test]
    fn test_dims_of_leftmost_operand() {
        let a = Tensor::<f64>::ones(&[2, 2]).unwrap();
        let e = 2.0 * &a;
        assert_eq!(e.dims(), Some(&[2usize, 2][..]));
        let s: Expr<'_, f64> = Expr::Scalar(1.0);
        assert_eq!(s.dims(), None);
    }

    #[test]
    fn test_neg_and_map() {
        let a = seq(&[4], Layout::FirstOrder);
        let r = (-&a).map(|x| x * x).eval().unwrap();
        assert_eq!(r.as_slice(), &[1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn test_integer_expression() {
        let a = Tensor::<i64>::ones(&[2, 2]).unwrap();
        let r = Tensor::<i64>::from_expr(&a * 7 / 2).unwrap();
        assert!(r.iter().all(|&x| x == 3));
    }

    #[test]
    fn test_debug_format() {
        let a = Tensor::<f64>::ones(&[2]).unwrap();
        let s = format!("{:?}", &a + 1.0);
        assert_eq!(s, "Add(Leaf([2]), Scalar(1.0))");
    }
}
