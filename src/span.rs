//! Borrowed views into ordered sequences.
//!
//! A [`Span`] is the container abstraction that every pattern is matched
//! against. It is a window `[start, end)` onto a base slice, and all spans cut
//! out of the same base share its indices: a match found in a subspan is
//! directly valid in the span it was cut from.
//!
//! Spans also come in two orientations. A [`Orientation::Backward`] span views
//! the base slice in reverse, so that a pattern run forward over it searches
//! the base backwards. For a base of length `n`, the reversed index `r` refers
//! to the base element `n - 1 - r`, and a forward range `a..b` corresponds to
//! the reversed range `n - b..n - a`.

use std::{
    fmt::{self, Debug},
    iter::Rev,
    ops::Range,
    slice::Iter,
};

use derive_more::Display;
use derive_where::derive_where;
use itertools::Either;

/// The direction in which a [`Span`] views its base slice.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Indices increase from the start of the base slice.
    #[default]
    #[display(fmt = "forward")]
    Forward,
    /// Indices increase from the end of the base slice.
    #[display(fmt = "backward")]
    Backward,
}

impl Orientation {
    /// The opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
        }
    }
}

/// A view of the elements `start..end` of a base slice.
#[derive_where(Clone, Copy)]
pub struct Span<'a, T> {
    base: &'a [T],
    start: usize,
    end: usize,
    orientation: Orientation,
}

impl<'a, T> Span<'a, T> {
    /// A forward view of the whole of `base`.
    pub fn new(base: &'a [T]) -> Self {
        Self {
            base,
            start: 0,
            end: base.len(),
            orientation: Orientation::Forward,
        }
    }

    /// The first index of the view.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The index one past the last element of the view.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The indices of the view.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The number of elements in the view.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The orientation of the index space.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The length of the underlying base slice.
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    /// Whether `index` is a valid boundary of the view, i.e. lies in
    /// `start..=end`.
    pub fn contains_boundary(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// The element at `index`, if it lies within the view.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.start || index >= self.end {
            return None;
        }
        match self.orientation {
            Orientation::Forward => self.base.get(index),
            Orientation::Backward => self.base.get(self.base.len() - 1 - index),
        }
    }

    /// Narrow the view to `range`, keeping the same indices.
    ///
    /// # Panics
    ///
    /// Panics if `range` does not lie within the view.
    pub fn subspan(&self, range: Range<usize>) -> Self {
        assert!(
            self.start <= range.start && range.start <= range.end && range.end <= self.end,
            "subspan {range:?} out of the bounds {:?} of the span",
            self.range()
        );
        Self {
            start: range.start,
            end: range.end,
            ..*self
        }
    }

    /// The same elements viewed in the opposite orientation.
    pub fn reversed(&self) -> Self {
        let range = self.map_range_reversed(self.range());
        Self {
            base: self.base,
            start: range.start,
            end: range.end,
            orientation: self.orientation.flipped(),
        }
    }

    /// Map a range of this span's index space to the equivalent range in the
    /// opposite orientation.
    pub fn map_range_reversed(&self, range: Range<usize>) -> Range<usize> {
        let n = self.base.len();
        n - range.end..n - range.start
    }

    /// Iterate over the elements of the view, in orientation order.
    pub fn iter(&self) -> Either<Iter<'a, T>, Rev<Iter<'a, T>>> {
        match self.orientation {
            Orientation::Forward => Either::Left(self.base[self.start..self.end].iter()),
            Orientation::Backward => {
                let Range { start, end } = self.map_range_reversed(self.range());
                Either::Right(self.base[start..end].iter().rev())
            }
        }
    }

    /// Copy the elements of the view, in orientation order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Whether both views hold equal elements in the same order.
    pub fn elements_eq(&self, other: &Span<'_, T>) -> bool
    where
        T: PartialEq,
    {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    fn from(base: &'a [T]) -> Self {
        Self::new(base)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    fn from(base: &'a Vec<T>) -> Self {
        Self::new(base)
    }
}

impl<'a, T> IntoIterator for Span<'a, T> {
    type Item = &'a T;
    type IntoIter = Either<Iter<'a, T>, Rev<Iter<'a, T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Span<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Debug> Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@", self.range())?;
        if self.orientation == Orientation::Backward {
            write!(f, "rev")?;
        }
        f.debug_list().entries(self.iter()).finish()
    }
}
