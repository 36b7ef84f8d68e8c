//! Index ranges selecting part of each mode
//!
//! A [`Span`] picks a strided, inclusive range `first, first + step, ..,
//! last` of one mode. A [`Slice`] does the same with signed bounds counted
//! from the end of the mode when negative. [`select`] turns one selector per
//! mode into the storage geometry of the selected region: an offset into the
//! parent buffer plus the extents and strides of the region.
//!
//! ```
//! use tenstride_core::{select, to_strides, Layout, Span};
//!
//! let w = to_strides(&[4, 3, 5], Layout::FirstOrder);
//! let r = select(&[4, 3, 5], &w, &[Span::all(), Span::at(1), Span::new(0, 2, 4).unwrap()]).unwrap();
//! assert_eq!(r.offset, 4);
//! assert_eq!(r.extents.as_slice(), &[4, 1, 3]);
//! assert_eq!(r.strides.as_slice(), &[1, 4, 24]);
//! ```

use std::fmt;

use crate::error::{Result, TensorError};
use crate::types::{Shape, Strides};

/// Strided inclusive range of one mode, 0-based.
///
/// `last` is `None` for a span that runs to the last index of the mode it is
/// applied to. A bounded span is normalized on construction so `last` is the
/// final index actually reached: `Span::new(0, 3, 10)` ends at 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    first: usize,
    step: usize,
    last: Option<usize>,
}

impl Span {
    /// Every index of the mode
    pub const fn all() -> Self {
        Self {
            first: 0,
            step: 1,
            last: None,
        }
    }

    /// The single index `i`
    pub const fn at(i: usize) -> Self {
        Self {
            first: i,
            step: 1,
            last: Some(i),
        }
    }

    /// Indices `first..=last` with unit step
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if `first > last`.
    pub fn range(first: usize, last: usize) -> Result<Self> {
        Self::new(first, 1, last)
    }

    /// Indices `first, first + step, ..` up to and including `last`
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if `first > last`, or if `step == 0` with `first != last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::Span;
    ///
    /// let s = Span::new(2, 3, 10).unwrap();
    /// assert_eq!(s.last(), Some(8));
    /// assert_eq!(s.size(), Some(3));
    ///
    /// assert!(Span::new(4, 1, 2).is_err());
    /// assert!(Span::new(0, 0, 2).is_err());
    /// ```
    pub fn new(first: usize, step: usize, last: usize) -> Result<Self> {
        if first == last {
            return Ok(Self::at(first));
        }
        if step == 0 {
            return Err(TensorError::invalid_span(
                "Span::new",
                format!("[{}:{}:{}]", first, step, last),
                "step must be positive",
            ));
        }
        if first > last {
            return Err(TensorError::invalid_span(
                "Span::new",
                format!("[{}:{}:{}]", first, step, last),
                "first index is past the last",
            ));
        }
        Ok(Self {
            first,
            step,
            last: Some(last - (last - first) % step),
        })
    }

    /// Indices `first, first + step, ..` up to the end of the mode
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if `step == 0`.
    pub fn to_end(first: usize, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(TensorError::invalid_span(
                "Span::to_end",
                format!("[{}:{}:end]", first, step),
                "step must be positive",
            ));
        }
        Ok(Self {
            first,
            step,
            last: None,
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Last index reached, `None` when the span runs to the end of its mode
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Number of indices, `None` when the span runs to the end of its mode
    pub fn size(&self) -> Option<usize> {
        self.last.map(|l| (l - self.first) / self.step + 1)
    }

    /// Index reached after `k` steps
    pub fn index(&self, k: usize) -> usize {
        self.first + k * self.step
    }

    /// Bind an open span to a mode of size `extent`
    ///
    /// The result is bounded.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the span does not fit inside `0..extent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenstride_core::Span;
    ///
    /// let s = Span::to_end(1, 2).unwrap().resolve(6).unwrap();
    /// assert_eq!((s.first(), s.last()), (1, Some(5)));
    /// assert!(Span::at(6).resolve(6).is_err());
    /// ```
    pub fn resolve(&self, extent: usize) -> Result<Self> {
        if extent == 0 || self.first >= extent {
            return Err(TensorError::out_of_range(
                "Span::resolve",
                self.first,
                extent,
                format!("span {} starts outside the mode", self),
            ));
        }
        let last = match self.last {
            Some(l) if l >= extent => {
                return Err(TensorError::out_of_range(
                    "Span::resolve",
                    l,
                    extent,
                    format!("span {} ends outside the mode", self),
                ))
            }
            Some(l) => l,
            None => {
                let end = extent - 1;
                end - (end - self.first) % self.step
            }
        };
        Ok(Self {
            first: self.first,
            step: self.step,
            last: Some(last),
        })
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::all()
    }
}

impl From<usize> for Span {
    fn from(i: usize) -> Self {
        Self::at(i)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(l) => write!(f, "[{}:{}:{}]", self.first, self.step, l),
            None => write!(f, "[{}:{}:end]", self.first, self.step),
        }
    }
}

/// Inclusive range with signed bounds.
///
/// A negative bound counts from the end of the mode, `-1` being its last
/// index. Converted to a [`Span`] once the extent is known.
///
/// ```
/// use tenstride_core::Slice;
///
/// let s = Slice::new(1, -1, 2).unwrap().to_span(6).unwrap();
/// assert_eq!((s.first(), s.step(), s.last()), (1, 2, Some(5)));
/// assert_eq!(Slice::at(-2).to_span(4).unwrap().first(), 2);
/// assert!(Slice::at(-5).to_span(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    first: isize,
    last: isize,
    step: usize,
}

impl Slice {
    /// Every index of the mode
    pub const fn all() -> Self {
        Self {
            first: 0,
            last: -1,
            step: 1,
        }
    }

    /// The single index `i`
    pub const fn at(i: isize) -> Self {
        Self {
            first: i,
            last: i,
            step: 1,
        }
    }

    /// Indices from `first` through `last` every `step`
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if `step == 0` while `first != last`.
    pub fn new(first: isize, last: isize, step: usize) -> Result<Self> {
        if step == 0 && first != last {
            return Err(TensorError::invalid_span(
                "Slice::new",
                format!("[{}:{}:{}]", first, step, last),
                "step must be positive",
            ));
        }
        Ok(Self {
            first,
            last,
            step: step.max(1),
        })
    }

    /// Bounded span of a mode with `extent` indices
    ///
    /// # Errors
    ///
    /// `OutOfRange` if a bound falls outside the mode once normalized,
    /// `InvalidSpan` if the normalized first index is past the last.
    pub fn to_span(&self, extent: usize) -> Result<Span> {
        let first = normalize(self.first, extent)?;
        let last = normalize(self.last, extent)?;
        Span::new(first, self.step, last)?.resolve(extent)
    }
}

fn normalize(value: isize, extent: usize) -> Result<usize> {
    let index = if value < 0 {
        extent.checked_sub(value.unsigned_abs())
    } else {
        Some(value.unsigned_abs())
    };
    match index {
        Some(i) if i < extent => Ok(i),
        _ => Err(TensorError::out_of_range(
            "Slice::to_span",
            value.unsigned_abs(),
            extent,
            format!("slice bound {} falls outside the mode", value),
        )),
    }
}

/// Storage geometry of a selected region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Offset of the region's first element in the parent buffer
    pub offset: usize,
    /// Number of selected indices per mode
    pub extents: Shape,
    /// Parent stride times span step, per mode
    pub strides: Strides,
}

/// Select one span per mode of an array with `extents` and `strides`.
///
/// # Errors
///
/// - `InvalidArgumentCount` if `spans.len()` differs from the rank
/// - `OutOfRange` if a span does not fit its mode
pub fn select(extents: &[usize], strides: &[usize], spans: &[Span]) -> Result<Region> {
    let p = extents.len();
    if spans.len() != p {
        return Err(TensorError::invalid_argument_count(p, spans.len()));
    }
    let mut region = Region {
        offset: 0,
        extents: Shape::with_capacity(p),
        strides: Strides::with_capacity(p),
    };
    for ((span, &n), &w) in spans.iter().zip(extents).zip(strides) {
        let span = span.resolve(n)?;
        region.offset += span.first * w;
        region.extents.push(span.size().unwrap_or(1));
        region.strides.push(span.step * w);
    }
    Ok(region)
}
