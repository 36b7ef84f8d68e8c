//! Operator overloads building expression nodes
//!
//! `+ - * /` accept any mix of tensor references, expressions and scalars on
//! the right. Scalars on the left are supported for the primitive numeric
//! types.

use super::{BinaryOp, Expr, UnaryOp};
use crate::tensor::Tensor;
use scirs2_core::num_complex::Complex;
use std::ops::{Add, Div, Mul, Neg, Sub};
use tenstride_core::Extents;

/// Conversion into an expression node
pub trait IntoExpr<'a, T> {
    fn into_expr(self) -> Expr<'a, T>;
}

impl<'a, T> IntoExpr<'a, T> for Expr<'a, T> {
    fn into_expr(self) -> Expr<'a, T> {
        self
    }
}

impl<'a, T, E: Extents> IntoExpr<'a, T> for &'a Tensor<T, E> {
    fn into_expr(self) -> Expr<'a, T> {
        self.expr()
    }
}

impl<'a, F> IntoExpr<'a, Complex<F>> for Complex<F> {
    fn into_expr(self) -> Expr<'a, Complex<F>> {
        Expr::Scalar(self)
    }
}

macro_rules! impl_scalar_into_expr {
    ($($s:ty),*) => {
        $(
            impl<'a> IntoExpr<'a, $s> for $s {
                fn into_expr(self) -> Expr<'a, $s> {
                    Expr::Scalar(self)
                }
            }
        )*
    };
}

impl_scalar_into_expr!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'a, T, R: IntoExpr<'a, T>> $trait<R> for Expr<'a, T> {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary($op, self, rhs.into_expr())
            }
        }

        impl<'a, T, E: Extents, R: IntoExpr<'a, T>> $trait<R> for &'a Tensor<T, E> {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary($op, self.expr(), rhs.into_expr())
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

macro_rules! impl_scalar_lhs {
    (@op $s:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<'a> $trait<Expr<'a, $s>> for $s {
            type Output = Expr<'a, $s>;

            fn $method(self, rhs: Expr<'a, $s>) -> Expr<'a, $s> {
                Expr::binary($op, Expr::Scalar(self), rhs)
            }
        }

        impl<'a, E: Extents> $trait<&'a Tensor<$s, E>> for $s {
            type Output = Expr<'a, $s>;

            fn $method(self, rhs: &'a Tensor<$s, E>) -> Expr<'a, $s> {
                Expr::binary($op, Expr::Scalar(self), rhs.expr())
            }
        }
    };
    ($($s:ty),*) => {
        $(
            impl_scalar_lhs!(@op $s, Add, add, BinaryOp::Add);
            impl_scalar_lhs!(@op $s, Sub, sub, BinaryOp::Sub);
            impl_scalar_lhs!(@op $s, Mul, mul, BinaryOp::Mul);
            impl_scalar_lhs!(@op $s, Div, div, BinaryOp::Div);
        )*
    };
}

impl_scalar_lhs!(f32, f64, i32, i64);

impl<'a, T> Neg for Expr<'a, T> {
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        Expr::Unary(UnaryOp::Neg, Box::new(self))
    }
}

impl<'a, T, E: Extents> Neg for &'a Tensor<T, E> {
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        -self.expr()
    }
}
