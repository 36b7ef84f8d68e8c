//! Conversions between tensors and `ndarray` vectors and matrices
//!
//! The classical 2-D types are [`Array1`] and [`Array2`] from
//! `scirs2_core::ndarray_ext`. A matrix becomes a last-order tensor so its
//! row-major elements are taken over without reordering.

use crate::tensor::Tensor;
use scirs2_core::ndarray_ext::{Array1, Array2};
use tenstride_core::{compute_single_index, for_each_index, Extents, Layout, Result, TensorError};

impl<T: Clone, E: Extents> Tensor<T, E> {
    /// Rank-1 first-order tensor holding the elements of `v`
    ///
    /// # Errors
    ///
    /// `InvalidShape` for an empty vector. `E::from_dims` errors propagate
    /// when `E` cannot hold rank 1.
    pub fn from_array1(v: &Array1<T>) -> Result<Self> {
        let extents = E::from_dims(&[v.len()])?;
        Self::from_vec(extents, Layout::FirstOrder, v.iter().cloned().collect())
    }

    /// Rank-2 last-order tensor holding the elements of `m`
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::array;
    /// use tenstride_core::Layout;
    /// use tenstride_dense::Tensor;
    ///
    /// let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    /// let t = Tensor::<f64>::from_array2(&m).unwrap();
    /// assert_eq!(t.dims(), &[2, 3]);
    /// assert_eq!(t.layout(), Layout::LastOrder);
    /// assert_eq!(t[[1, 0]], 4.0);
    /// ```
    pub fn from_array2(m: &Array2<T>) -> Result<Self> {
        let extents = E::from_dims(&[m.nrows(), m.ncols()])?;
        Self::from_vec(extents, Layout::LastOrder, m.iter().cloned().collect())
    }

    /// Copy into an [`Array1`]
    ///
    /// Accepts rank 1, or rank 2 with one unit axis.
    ///
    /// # Errors
    ///
    /// `InvalidShape` for any other extents.
    pub fn to_array1(&self) -> Result<Array1<T>> {
        let dims = self.dims();
        let is_vector = match dims.len() {
            1 => true,
            2 => dims[0] == 1 || dims[1] == 1,
            _ => false,
        };
        if !is_vector {
            return Err(TensorError::invalid_shape(
                "Tensor::to_array1",
                dims,
                "expected rank 1 or a single row or column",
            ));
        }
        Ok(Array1::from(self.logical_elements(Layout::FirstOrder)))
    }

    /// Copy into an [`Array2`]
    ///
    /// # Errors
    ///
    /// `InvalidShape` unless the tensor has rank 2.
    pub fn to_array2(&self) -> Result<Array2<T>> {
        let dims = self.dims();
        if dims.len() != 2 {
            return Err(TensorError::invalid_shape(
                "Tensor::to_array2",
                dims,
                "expected rank 2",
            ));
        }
        matrix_from_rows(
            "Tensor::to_array2",
            dims[0],
            dims[1],
            self.logical_elements(Layout::LastOrder),
        )
    }

    /// Elements visited in `order`, independent of the storage layout
    fn logical_elements(&self, order: Layout) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        for_each_index(self.dims(), order, |idx| {
            out.push(self.data[compute_single_index(idx, &self.strides)].clone());
        });
        out
    }
}

fn matrix_from_rows<T>(operation: &str, rows: usize, cols: usize, data: Vec<T>) -> Result<Array2<T>> {
    Array2::from_shape_vec((rows, cols), data).map_err(|e| {
        TensorError::invalid_shape(operation, &[rows, cols], e.to_string())
    })
}

/// View a result of rank at most 2 as a matrix.
///
/// A rank-1 tensor of extent `n` becomes an `n x 1` column, a rank-2 tensor
/// converts directly, and higher ranks are accepted when every axis past the
/// second is a unit axis.
///
/// # Errors
///
/// `InvalidShape` for a rank-0 tensor or a non-unit axis past the second.
///
/// # Examples
///
/// ```
/// use tenstride_dense::{interop::to_matrix_rank2, Tensor};
///
/// let v = Tensor::<f64>::ones(&[3]).unwrap();
/// let m = to_matrix_rank2(&v).unwrap();
/// assert_eq!(m.dim(), (3, 1));
/// ```
pub fn to_matrix_rank2<T: Clone, E: Extents>(t: &Tensor<T, E>) -> Result<Array2<T>> {
    let dims = t.dims();
    let (rows, cols) = match dims.len() {
        0 => {
            return Err(TensorError::invalid_shape(
                "to_matrix_rank2",
                dims,
                "a rank-0 tensor holds no elements",
            ))
        }
        1 => (dims[0], 1),
        _ if dims[2..].iter().all(|&n| n == 1) => (dims[0], dims[1]),
        _ => {
            return Err(TensorError::invalid_shape(
                "to_matrix_rank2",
                dims,
                "axes past the second must have extent 1",
            ))
        }
    };
    matrix_from_rows("to_matrix_rank2", rows, cols, t.logical_elements(Layout::LastOrder))
}
