use std::ops::Range;

use delegate::delegate;
use derive_where::derive_where;

use super::PatternMatch;
use crate::Span;

/// A match of a contiguous range, without further structure.
#[derive_where(Clone, Copy)]
#[derive(Debug)]
pub struct AtomicMatch<'a, T> {
    contents: Span<'a, T>,
}

impl<'a, T> AtomicMatch<'a, T> {
    /// A match covering the whole of `contents`.
    pub fn new(contents: Span<'a, T>) -> Self {
        Self { contents }
    }

    /// The matched elements.
    pub fn contents(&self) -> Span<'a, T> {
        self.contents
    }

    delegate! {
        to self.contents {
            /// The host indices covered by the match.
            pub fn range(&self) -> Range<usize>;
            /// The number of matched elements.
            pub fn len(&self) -> usize;
            /// Whether the match is zero-width.
            pub fn is_empty(&self) -> bool;
        }
    }

    /// The same match, seen from the opposite orientation of the host.
    ///
    /// This turns a match found by a reversed pattern in a reversed host into
    /// the equivalent forward match.
    pub fn reversed(&self) -> Self {
        Self::new(self.contents.reversed())
    }

    /// The match over the same range of another, index-compatible host.
    ///
    /// Spans cut from the same base share their indices, so a match found in a
    /// subspan can be rebased onto the span it was cut from, or onto an equal
    /// copy of it.
    ///
    /// # Panics
    ///
    /// Panics if the range of the match is not within `host`.
    pub fn rebased<'b>(&self, host: Span<'b, T>) -> AtomicMatch<'b, T> {
        AtomicMatch::new(host.subspan(self.range()))
    }
}

impl<'a, T> PatternMatch<'a, T> for AtomicMatch<'a, T> {
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }

    fn to_atomic(&self) -> AtomicMatch<'a, T> {
        *self
    }
}
