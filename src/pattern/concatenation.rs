use std::fmt::{self, Display};

use itertools::Itertools;

use super::{
    trails::{advance_frontier, Tip, Trails},
    AnyPattern, Pattern, ReversiblePattern,
};
use crate::{
    matches::{ConcatenatedMatch, NaryConcatenatedMatch, PatternMatch},
    Span,
};

/// A pattern matching two patterns, one right after the other.
///
/// Matches are ordered lexicographically: for each match of the first pattern,
/// in order, come all the matches of the second pattern after it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Concatenation<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concatenation<A, B> {
    /// Match `first` followed by `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T, A: Pattern<T>, B: Pattern<T>> Pattern<T> for Concatenation<A, B> {
    type Match<'a> = ConcatenatedMatch<'a, T, A::Match<'a>, B::Match<'a>> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.first
            .matches(host, at)
            .into_iter()
            .flat_map(|first| {
                self.second
                    .matches(host, first.range().end)
                    .into_iter()
                    .map(move |second| ConcatenatedMatch::new(host, first.clone(), second))
            })
            .collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.first.matches(host, at).into_iter().find_map(|first| {
            let second = self.second.primary_match(host, first.range().end)?;
            Some(ConcatenatedMatch::new(host, first, second))
        })
    }
}

impl<T, A, B> ReversiblePattern<T> for Concatenation<A, B>
where
    T: 'static,
    A: ReversiblePattern<T>,
    B: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Concatenation::new(
            self.second.reversed(),
            self.first.reversed(),
        ))
    }
}

impl<A: Display, B: Display> Display for Concatenation<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.first, self.second)
    }
}

/// A pattern matching a list of patterns, one after the other.
///
/// The empty concatenation matches the empty range anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NaryConcatenation<P> {
    components: Vec<P>,
}

impl<P> NaryConcatenation<P> {
    /// Match each of `components` in turn.
    pub fn new(components: impl IntoIterator<Item = P>) -> Self {
        Self {
            components: components.into_iter().collect(),
        }
    }

    /// The concatenated patterns, in order.
    pub fn components(&self) -> &[P] {
        &self.components
    }
}

impl<P> FromIterator<P> for NaryConcatenation<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<P> NaryConcatenation<P> {
    /// The frontier of paths matching every component, in lexicographic order.
    ///
    /// With `distinct_ends`, only the first path reaching each index is kept
    /// at each step. This preserves the first path of the final frontier.
    fn frontier<'a, T>(
        &self,
        host: Span<'a, T>,
        at: usize,
        trails: &mut Trails<P::Match<'a>>,
        distinct_ends: bool,
    ) -> Vec<Tip>
    where
        P: Pattern<T>,
    {
        if !host.contains_boundary(at) {
            return Vec::new();
        }
        let mut frontier = vec![None];
        for component in &self.components {
            frontier = advance_frontier(trails, component, host, at, &frontier);
            if distinct_ends {
                frontier = trails.distinct_ends(frontier, at);
            }
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }
}

impl<T, P: Pattern<T>> Pattern<T> for NaryConcatenation<P> {
    type Match<'a> = NaryConcatenatedMatch<'a, T, P::Match<'a>> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        let mut trails = Trails::new();
        self.frontier(host, at, &mut trails, false)
            .into_iter()
            .map(|tip| NaryConcatenatedMatch::new(host, at, trails.path(tip)))
            .collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        let mut trails = Trails::new();
        let tip = *self.frontier(host, at, &mut trails, true).first()?;
        Some(NaryConcatenatedMatch::new(host, at, trails.path(tip)))
    }
}

impl<T, P> ReversiblePattern<T> for NaryConcatenation<P>
where
    T: 'static,
    P: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(NaryConcatenation::new(
            self.components.iter().rev().map(|component| component.reversed()),
        ))
    }
}

impl<P: Display> Display for NaryConcatenation<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.components.iter().format(" "))
    }
}
