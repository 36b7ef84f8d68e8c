//! Index-labelled tensor products
//!
//! Each mode of an operand gets a one-character label. `_` marks a free mode.
//! Modes carrying the same label in both operands are contracted, paired in
//! the order they appear on the left. The result holds the free modes of the
//! left operand followed by those of the right one, as [`prod_tensor`] does.
//!
//! ```
//! use tenstride_dense::Tensor;
//!
//! let a = Tensor::<f64>::ones(&[5, 3]).unwrap();
//! let b = Tensor::<f64>::ones(&[3, 4]).unwrap();
//! let c = (a.indexed("_e").unwrap() * b.indexed("e_").unwrap()).unwrap();
//! assert_eq!(c.dims(), &[5, 4]);
//! assert!(c.iter().all(|&x| x == 3.0));
//! ```

use crate::prod::prod_tensor;
use crate::tensor::Tensor;
use scirs2_core::numeric::Num;
use smallvec::SmallVec;
use std::ops::Mul;
use tenstride_core::{DynExtents, Extents, Result, TensorError};

/// Label of a mode that is never contracted
pub const FREE: char = '_';

type Labels = SmallVec<[char; 6]>;

/// A tensor with one label per mode
#[derive(Debug)]
pub struct Indexed<'a, T, E: Extents = DynExtents> {
    tensor: &'a Tensor<T, E>,
    labels: Labels,
}

impl<T, E: Extents> Clone for Indexed<'_, T, E> {
    fn clone(&self) -> Self {
        Self {
            tensor: self.tensor,
            labels: self.labels.clone(),
        }
    }
}

impl<T, E: Extents> Tensor<T, E> {
    /// Attach one label per mode for an index-labelled product
    ///
    /// # Errors
    ///
    /// - `InvalidArgumentCount` if the label count differs from the rank
    /// - `InvalidLabels` if a label other than `_` appears twice
    pub fn indexed(&self, labels: &str) -> Result<Indexed<'_, T, E>> {
        let labels: Labels = labels.chars().collect();
        if labels.len() != self.rank() {
            return Err(TensorError::invalid_argument_count(self.rank(), labels.len()));
        }
        for (k, &l) in labels.iter().enumerate() {
            if l != FREE && labels[k + 1..].contains(&l) {
                return Err(TensorError::invalid_labels(
                    "Tensor::indexed",
                    labels.iter().collect::<String>(),
                    format!("label '{}' names more than one mode", l),
                ));
            }
        }
        Ok(Indexed {
            tensor: self,
            labels,
        })
    }
}

impl<'a, T, E: Extents> Indexed<'a, T, E> {
    pub fn tensor(&self) -> &'a Tensor<T, E> {
        self.tensor
    }

    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    /// 1-based mode pairs contracted against `other`, in this operand's order
    pub fn contracted_modes<F: Extents>(&self, other: &Indexed<'_, T, F>) -> (Vec<usize>, Vec<usize>) {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l != FREE)
            .filter_map(|(ka, l)| {
                other
                    .labels
                    .iter()
                    .position(|m| m == l)
                    .map(|kb| (ka + 1, kb + 1))
            })
            .unzip()
    }

    /// Contract every label shared with `other`
    ///
    /// Labels found in only one operand stay free. Without shared labels the
    /// result is the outer product.
    ///
    /// # Errors
    ///
    /// Those of [`prod_tensor`], notably `IncompatibleOperands` when paired
    /// modes differ in extent.
    pub fn contract<F: Extents>(&self, other: &Indexed<'_, T, F>) -> Result<Tensor<T>>
    where
        T: Copy + Num,
    {
        let (phia, phib) = self.contracted_modes(other);
        log::debug!(
            "indexed product: {:?}({}) x {:?}({}) over modes {:?} / {:?}",
            self.tensor.dims(),
            self.labels.iter().collect::<String>(),
            other.tensor.dims(),
            other.labels.iter().collect::<String>(),
            phia,
            phib
        );
        prod_tensor(self.tensor, other.tensor, &phia, &phib)
    }
}

impl<'a, 'b, T, E, F> Mul<Indexed<'b, T, F>> for Indexed<'a, T, E>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    type Output = Result<Tensor<T>>;

    fn mul(self, rhs: Indexed<'b, T, F>) -> Self::Output {
        self.contract(&rhs)
    }
}

/// Index-labelled product of `a` and `b`
///
/// Shorthand for `a.indexed(la)?.contract(&b.indexed(lb)?)`.
///
/// # Examples
///
/// ```
/// use tenstride_dense::{prod_indexed, Tensor};
///
/// let a = Tensor::<f64>::ones(&[4, 3]).unwrap();
/// let b = Tensor::<f64>::ones(&[3, 4, 2]).unwrap();
/// let c = prod_indexed(&a, "df", &b, "fd_").unwrap();
/// assert_eq!(c.dims(), &[2]);
/// assert!(c.iter().all(|&x| x == 12.0));
/// ```
pub fn prod_indexed<T, E, F>(a: &Tensor<T, E>, la: &str, b: &Tensor<T, F>, lb: &str) -> Result<Tensor<T>>
where
    T: Copy + Num,
    E: Extents,
    F: Extents,
{
    a.indexed(la)?.contract(&b.indexed(lb)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenstride_core::{for_each_index, Layout};

    /// Tensor whose element at `idx` is `idx[0] + 1`
    fn first_index_plus_one(dims: &[usize], layout: Layout) -> Tensor<f64> {
        let mut t = Tensor::with_layout(DynExtents::new(dims).unwrap(), layout);
        let owned = t.dims().to_vec();
        for_each_index(&owned, layout, |idx| {
            *t.get_mut(idx).unwrap() = (idx[0] + 1) as f64;
        });
        t
    }

    #[test]
    fn test_matrix_product_by_labels() {
        for layout in [Layout::FirstOrder, Layout::LastOrder] {
            let a = first_index_plus_one(&[5, 3], layout);
            let b = first_index_plus_one(&[3, 4], layout);
            let ab = (a.indexed("_e").unwrap() * b.indexed("e_").unwrap()).unwrap();
            assert_eq!(ab.dims(), &[5, 4]);
            // sum of 1..=3 over the shared mode
            for i in 0..5 {
                for j in 0..4 {
                    assert_eq!(ab[[i, j]], a[[i, 0]] * 6.0);
                }
            }
        }
    }

    #[test]
    fn test_two_labels_rank_three() {
        for layout in [Layout::FirstOrder, Layout::LastOrder] {
            let a = first_index_plus_one(&[4, 5, 3], layout);
            let b = first_index_plus_one(&[3, 4, 2], layout);
            let ab = (a.indexed("d_f").unwrap() * b.indexed("fd_").unwrap()).unwrap();
            assert_eq!(ab.dims(), &[5, 2]);
            // (1 + .. + 3) * (1 + .. + 4)
            assert!(ab.iter().all(|&x| x == 60.0));
        }
    }

    #[test]
    fn test_labels_leaving_one_free_mode() {
        let a = first_index_plus_one(&[4, 3], Layout::FirstOrder);
        let b = first_index_plus_one(&[3, 4, 2], Layout::FirstOrder);
        let ab = prod_indexed(&a, "df", &b, "fd_").unwrap();
        assert_eq!(ab.dims(), &[2]);
        assert!(ab.iter().all(|&x| x == 60.0));
    }

    #[test]
    fn test_pairs_follow_left_order() {
        let a = Tensor::<f64>::ones(&[2, 3, 4]).unwrap();
        let b = Tensor::<f64>::ones(&[4, 5, 2]).unwrap();
        let ia = a.indexed("i_k").unwrap();
        let ib = b.indexed("k_i").unwrap();
        assert_eq!(ia.contracted_modes(&ib), (vec![1, 3], vec![3, 1]));
        let c = ia.contract(&ib).unwrap();
        assert_eq!(c.dims(), &[3, 5]);
        assert!(c.iter().all(|&x| x == 8.0));
    }

    #[test]
    fn test_no_shared_label_is_outer_product() {
        let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
        let b = Tensor::<f64>::ones(&[4]).unwrap();
        let c = prod_indexed(&a, "ij", &b, "k").unwrap();
        assert_eq!(c.dims(), &[2, 3, 4]);
        assert!(c.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_full_contraction_gives_single_element() {
        let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
        let b = Tensor::<f64>::ones(&[3, 2]).unwrap();
        let c = prod_indexed(&a, "ij", &b, "ji").unwrap();
        assert_eq!(c.dims(), &[1]);
        assert_eq!(c[0], 6.0);
    }

    #[test]
    fn test_label_errors() {
        let a = Tensor::<f64>::ones(&[2, 3]).unwrap();
        assert!(matches!(
            a.indexed("i"),
            Err(TensorError::InvalidArgumentCount { .. })
        ));
        assert!(matches!(
            a.indexed("ii"),
            Err(TensorError::InvalidLabels { .. })
        ));
        assert!(a.indexed("__").is_ok());

        let b = Tensor::<f64>::ones(&[4, 2]).unwrap();
        assert!(matches!(
            prod_indexed(&a, "_j", &b, "j_"),
            Err(TensorError::IncompatibleOperands { .. })
        ));
    }
}
