//! Strided views selecting part of a tensor
//!
//! A subtensor borrows its parent's storage from the first selected element
//! on. Its strides are the parent's strides scaled by the span steps, so the
//! kernels and expressions read it like any other strided operand.

use super::types::Tensor;
use crate::expression::{Expr, IntoExpr, Operand};
use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use tenstride_core::{
    compute_single_index, compute_single_index_checked, for_each_index, select, DynExtents,
    Extents, Layout, Region, Result, Shape, Slice, Span, Strides, TensorError,
};
use tenstride_kernels::{copy, Strided, StridedMut, View, ViewMut};

/// Read-only strided view of part of a tensor
///
/// # Examples
///
/// ```
/// use tenstride_core::{DynExtents, Layout, Span};
/// use tenstride_dense::Tensor;
///
/// let e = DynExtents::new(&[3, 4]).unwrap();
/// let t = Tensor::from_vec(e, Layout::FirstOrder, (0..12).collect()).unwrap();
/// let s = t.subtensor(&[Span::range(1, 2).unwrap(), Span::new(0, 2, 3).unwrap()]).unwrap();
/// assert_eq!(s.dims(), &[2, 2]);
/// assert_eq!(s.strides(), &[1, 6]);
/// assert_eq!(*s.get(&[1, 1]).unwrap(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Subtensor<'a, T> {
    data: &'a [T],
    extents: Shape,
    strides: Strides,
    layout: Layout,
}

/// Mutable strided view of part of a tensor
#[derive(Debug)]
pub struct SubtensorMut<'a, T> {
    data: &'a mut [T],
    extents: Shape,
    strides: Strides,
    layout: Layout,
}

fn spans_of(operation: &str, dims: &[usize], slices: &[Slice]) -> Result<SmallVec<[Span; 6]>> {
    if slices.len() != dims.len() {
        return Err(TensorError::invalid_argument_count(dims.len(), slices.len()));
    }
    slices
        .iter()
        .zip(dims)
        .map(|(s, &n)| s.to_span(n))
        .collect::<Result<_>>()
        .map_err(|e| {
            log::debug!("{}: slice rejected: {}", operation, e);
            e
        })
}

fn region_data<'a, T>(operation: &str, data: &'a [T], region: &Region) -> Result<&'a [T]> {
    data.get(region.offset..)
        .ok_or_else(|| TensorError::buffer_too_small(operation, "data", region.offset + 1, data.len()))
}

fn region_data_mut<'a, T>(operation: &str, data: &'a mut [T], region: &Region) -> Result<&'a mut [T]> {
    let len = data.len();
    data.get_mut(region.offset..)
        .ok_or_else(|| TensorError::buffer_too_small(operation, "data", region.offset + 1, len))
}

impl<T, E: Extents> Tensor<T, E> {
    /// View of the elements picked by one span per mode
    ///
    /// # Errors
    ///
    /// - `InvalidArgumentCount` if `spans.len() != rank`
    /// - `OutOfRange` if a span reaches past its mode
    pub fn subtensor(&self, spans: &[Span]) -> Result<Subtensor<'_, T>> {
        let region = select(self.extents.dims(), &self.strides, spans)?;
        Ok(Subtensor {
            data: region_data("Tensor::subtensor", &self.data, &region)?,
            extents: region.extents,
            strides: region.strides,
            layout: self.layout,
        })
    }

    /// Mutable view of the elements picked by one span per mode
    ///
    /// Errors as [`subtensor`](Self::subtensor).
    pub fn subtensor_mut(&mut self, spans: &[Span]) -> Result<SubtensorMut<'_, T>> {
        let region = select(self.extents.dims(), &self.strides, spans)?;
        Ok(SubtensorMut {
            data: region_data_mut("Tensor::subtensor_mut", &mut self.data, &region)?,
            extents: region.extents,
            strides: region.strides,
            layout: self.layout,
        })
    }

    /// View of the elements picked by one slice per mode
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::Slice;
    /// use tenstride_dense::Tensor;
    ///
    /// let t = Tensor::<i32>::zeros(&[4, 5]).unwrap();
    /// let s = t.slice(&[Slice::new(1, -1, 1).unwrap(), Slice::at(-2)]).unwrap();
    /// assert_eq!(s.dims(), &[3, 1]);
    /// ```
    pub fn slice(&self, slices: &[Slice]) -> Result<Subtensor<'_, T>> {
        let spans = spans_of("Tensor::slice", self.extents.dims(), slices)?;
        self.subtensor(&spans)
    }

    /// Mutable view of the elements picked by one slice per mode
    pub fn slice_mut(&mut self, slices: &[Slice]) -> Result<SubtensorMut<'_, T>> {
        let spans = spans_of("Tensor::slice_mut", self.extents.dims(), slices)?;
        self.subtensor_mut(&spans)
    }

    /// View of the whole tensor
    pub fn as_subtensor(&self) -> Subtensor<'_, T> {
        Subtensor {
            data: &self.data,
            extents: Shape::from_slice(self.extents.dims()),
            strides: self.strides.clone(),
            layout: self.layout,
        }
    }
}

impl<'a, T> Subtensor<'a, T> {
    /// Per-mode sizes
    pub fn dims(&self) -> &[usize] {
        &self.extents
    }

    /// Per-mode steps through the parent's storage
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Layout of the parent tensor
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Number of selected elements
    pub fn len(&self) -> usize {
        if self.extents.is_empty() {
            0
        } else {
            self.extents.iter().product()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at a multi-index of the view
    ///
    /// # Errors
    ///
    /// - `InvalidArgumentCount` if `idx.len() != rank`
    /// - `OutOfRange` if any index reaches its mode size
    pub fn get(&self, idx: &[usize]) -> Result<&'a T> {
        let j = compute_single_index_checked(idx, &self.extents, &self.strides)?;
        let data: &'a [T] = self.data;
        data.get(j)
            .ok_or_else(|| TensorError::out_of_range("Subtensor::get", j, data.len(), "empty view"))
    }

    /// Select part of this view, spans counting in the view's own indices
    pub fn subtensor(&self, spans: &[Span]) -> Result<Subtensor<'a, T>> {
        let region = select(&self.extents, &self.strides, spans)?;
        Ok(Subtensor {
            data: region_data("Subtensor::subtensor", self.data, &region)?,
            extents: region.extents,
            strides: region.strides,
            layout: self.layout,
        })
    }

    /// Select part of this view with one slice per mode
    pub fn slice(&self, slices: &[Slice]) -> Result<Subtensor<'a, T>> {
        let spans = spans_of("Subtensor::slice", &self.extents, slices)?;
        self.subtensor(&spans)
    }

    /// Kernel operand over the view
    pub fn view(&self) -> View<'_, T> {
        View::new(self.data, &self.extents, &self.strides)
    }

    /// Expression leaf reading through the view's strides
    pub fn expr(&self) -> Expr<'_, T> {
        Expr::Leaf(Operand::new(self.data, &self.extents, &self.strides, self.layout))
    }

    /// Copy the selected elements into a dense tensor in the view's layout
    pub fn to_tensor(&self) -> Result<Tensor<T>>
    where
        T: Clone,
    {
        let extents = DynExtents::new(&self.extents)?;
        let first = match self.data.first() {
            Some(x) if self.rank() > 0 => x.clone(),
            _ => return Tensor::from_vec(extents, self.layout, Vec::new()),
        };
        let mut out = Tensor::from_elem(extents, self.layout, first);
        copy(
            self.rank(),
            &self.extents,
            StridedMut::new(&mut out.data, &out.strides),
            Strided::new(self.data, &self.strides),
        )?;
        Ok(out)
    }
}

impl<'a, 'b: 'a, T> IntoExpr<'a, T> for &'a Subtensor<'b, T> {
    fn into_expr(self) -> Expr<'a, T> {
        self.expr()
    }
}

impl<'a, T> SubtensorMut<'a, T> {
    pub fn dims(&self) -> &[usize] {
        &self.extents
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Read-only view of the same elements
    pub fn as_subtensor(&self) -> Subtensor<'_, T> {
        Subtensor {
            data: self.data,
            extents: self.extents.clone(),
            strides: self.strides.clone(),
            layout: self.layout,
        }
    }

    /// Mutable element at a multi-index of the view
    ///
    /// Errors as [`Subtensor::get`].
    pub fn get_mut(&mut self, idx: &[usize]) -> Result<&mut T> {
        let j = compute_single_index_checked(idx, &self.extents, &self.strides)?;
        let len = self.data.len();
        self.data
            .get_mut(j)
            .ok_or_else(|| TensorError::out_of_range("SubtensorMut::get_mut", j, len, "empty view"))
    }

    /// Select part of this view for writing
    pub fn subtensor_mut(&mut self, spans: &[Span]) -> Result<SubtensorMut<'_, T>> {
        let region = select(&self.extents, &self.strides, spans)?;
        Ok(SubtensorMut {
            data: region_data_mut("SubtensorMut::subtensor_mut", &mut *self.data, &region)?,
            extents: region.extents,
            strides: region.strides,
            layout: self.layout,
        })
    }

    /// Kernel operand over the view
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut::new(&mut *self.data, &self.extents, &self.strides)
    }

    /// Set every selected element to `value`
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        let data = &mut *self.data;
        let strides = &self.strides;
        for_each_index(&self.extents, self.layout, |idx| {
            data[compute_single_index(idx, strides)] = value.clone();
        });
    }

    /// Copy `src` element-wise into the selected elements
    ///
    /// # Errors
    ///
    /// `IncompatibleOperands` if the two views differ in extents.
    pub fn copy_from(&mut self, src: &Subtensor<'_, T>) -> Result<()>
    where
        T: Clone,
    {
        if src.dims() != self.dims() {
            return Err(TensorError::incompatible_operands(
                "SubtensorMut::copy_from",
                self.dims(),
                src.dims(),
                "extents differ",
            ));
        }
        copy(
            self.rank(),
            &self.extents,
            StridedMut::new(&mut *self.data, &self.strides),
            Strided::new(src.data, &src.strides),
        )
    }

    /// Evaluate `expr` into the selected elements
    ///
    /// Operands are checked before anything is written.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if any tensor operand's extents differ from the view's.
    pub fn assign(&mut self, expr: Expr<'_, T>) -> Result<()>
    where
        T: Copy + Num,
    {
        expr.check_operands("SubtensorMut::assign", &self.extents)?;
        let data = &mut *self.data;
        let strides = &self.strides;
        for_each_index(&self.extents, self.layout, |idx| {
            data[compute_single_index(idx, strides)] = expr.eval_at(idx);
        });
        Ok(())
    }
}
