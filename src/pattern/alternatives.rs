use std::fmt::{self, Display};

use itertools::{Either, Itertools};

use super::{AnyPattern, Pattern, ReversiblePattern};
use crate::Span;

/// A pattern matching either of two patterns.
///
/// All matches of the first pattern are preferred over all matches of the
/// second.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alternatives<A, B> {
    first: A,
    second: B,
}

impl<A, B> Alternatives<A, B> {
    /// Match `first`, or else `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T, A: Pattern<T>, B: Pattern<T>> Pattern<T> for Alternatives<A, B> {
    type Match<'a> = Either<A::Match<'a>, B::Match<'a>> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        let first = self.first.matches(host, at).into_iter().map(Either::Left);
        let second = self.second.matches(host, at).into_iter().map(Either::Right);
        first.chain(second).collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.first
            .primary_match(host, at)
            .map(Either::Left)
            .or_else(|| self.second.primary_match(host, at).map(Either::Right))
    }
}

impl<T, A, B> ReversiblePattern<T> for Alternatives<A, B>
where
    T: 'static,
    A: ReversiblePattern<T>,
    B: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Alternatives::new(
            self.first.reversed(),
            self.second.reversed(),
        ))
    }
}

impl<A: Display, B: Display> Display for Alternatives<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} | {})", self.first, self.second)
    }
}

/// A pattern matching any of a list of patterns.
///
/// Alternatives are tried in order: all matches of an alternative are
/// preferred over the matches of the alternatives after it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NaryAlternatives<P> {
    alternatives: Vec<P>,
}

impl<P> NaryAlternatives<P> {
    /// Match any of `alternatives`, earlier ones preferred.
    pub fn new(alternatives: impl IntoIterator<Item = P>) -> Self {
        Self {
            alternatives: alternatives.into_iter().collect(),
        }
    }

    /// The alternatives, in order of preference.
    pub fn alternatives(&self) -> &[P] {
        &self.alternatives
    }
}

impl<P> FromIterator<P> for NaryAlternatives<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T, P: Pattern<T>> Pattern<T> for NaryAlternatives<P> {
    type Match<'a> = P::Match<'a> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.alternatives
            .iter()
            .flat_map(|alternative| alternative.matches(host, at))
            .collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.alternatives
            .iter()
            .find_map(|alternative| alternative.primary_match(host, at))
    }
}

impl<T, P> ReversiblePattern<T> for NaryAlternatives<P>
where
    T: 'static,
    P: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(NaryAlternatives::new(
            self.alternatives.iter().map(|alternative| alternative.reversed()),
        ))
    }
}

impl<P: Display> Display for NaryAlternatives<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.alternatives.iter().format(" | "))
    }
}
