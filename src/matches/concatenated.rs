use derive_where::derive_where;

use super::PatternMatch;
use crate::Span;

/// A match of two patterns, one after the other.
#[derive_where(Clone; L, R)]
#[derive(Debug)]
pub struct ConcatenatedMatch<'a, T, L, R> {
    first: L,
    second: R,
    contents: Span<'a, T>,
}

impl<'a, T, L, R> ConcatenatedMatch<'a, T, L, R>
where
    L: PatternMatch<'a, T>,
    R: PatternMatch<'a, T>,
{
    /// Join two adjacent matches in `host`.
    pub fn new(host: Span<'a, T>, first: L, second: R) -> Self {
        let contents = host.subspan(first.range().start..second.range().end);
        Self {
            first,
            second,
            contents,
        }
    }

    /// The match of the first pattern.
    pub fn first(&self) -> &L {
        &self.first
    }

    /// The match of the second pattern.
    pub fn second(&self) -> &R {
        &self.second
    }

    /// Split into the matches of both patterns.
    pub fn into_parts(self) -> (L, R) {
        (self.first, self.second)
    }
}

impl<'a, T, L, R> PatternMatch<'a, T> for ConcatenatedMatch<'a, T, L, R>
where
    L: PatternMatch<'a, T>,
    R: PatternMatch<'a, T>,
{
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }
}

/// A match of any number of patterns, one after the other.
///
/// A concatenation of zero patterns matches the empty range at the location
/// where it was tried.
#[derive_where(Clone; M)]
#[derive(Debug)]
pub struct NaryConcatenatedMatch<'a, T, M> {
    components: Vec<M>,
    contents: Span<'a, T>,
}

impl<'a, T, M: PatternMatch<'a, T>> NaryConcatenatedMatch<'a, T, M> {
    /// Join adjacent `components` that start at `at` in `host`.
    pub fn new(host: Span<'a, T>, at: usize, components: Vec<M>) -> Self {
        let end = components.last().map_or(at, |m| m.range().end);
        Self {
            contents: host.subspan(at..end),
            components,
        }
    }

    /// The matches of the concatenated patterns, in order.
    pub fn components(&self) -> &[M] {
        &self.components
    }

    /// Take the matches of the concatenated patterns.
    pub fn into_components(self) -> Vec<M> {
        self.components
    }
}

impl<'a, T, M: PatternMatch<'a, T>> PatternMatch<'a, T> for NaryConcatenatedMatch<'a, T, M> {
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }
}
