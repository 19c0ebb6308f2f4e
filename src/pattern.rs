//! Patterns and their combinators.
//!
//! A [`Pattern`] describes a set of element sequences. Given a host [`Span`]
//! and a location in it, a pattern lists every way it can match starting
//! exactly at that location, most preferred first.
//!
//! Patterns are built bottom-up from the leaf matchers [`Literal`] and
//! [`Conditional`] using the combinators [`Negated`], [`Alternatives`],
//! [`Concatenation`], [`Repetition`] and [`Nesting`] (or their n-ary
//! variants). [`AnyPattern`] erases the type of a pattern tree.
//!
//! Patterns never change while matching, so a pattern can be reused for many
//! searches and shared between threads.

mod alternatives;
mod any;
mod concatenation;
mod conditional;
mod literal;
mod negated;
mod nesting;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest;
mod repetition;
mod trails;

use std::ops::RangeBounds;

use crate::{matches::PatternMatch, Span};

pub use alternatives::{Alternatives, NaryAlternatives};
pub use any::AnyPattern;
pub use concatenation::{Concatenation, NaryConcatenation};
pub use conditional::Conditional;
pub use literal::Literal;
pub use negated::Negated;
pub use nesting::Nesting;
pub use repetition::{Consumption, Repetition};

/// A pattern that can be matched at a location of a host span.
///
/// Implementations must uphold that [`Pattern::primary_match`] equals the
/// first element of [`Pattern::matches`]. Both return nothing, rather than
/// failing, when the pattern does not match.
pub trait Pattern<T> {
    /// The match type returned by the pattern.
    type Match<'a>: PatternMatch<'a, T>
    where
        T: 'a;

    /// All matches starting at `at` in `host`, most preferred first.
    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>>;

    /// The most preferred match starting at `at` in `host`.
    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.matches(host, at).into_iter().next()
    }
}

/// A pattern that can also be searched for backwards.
///
/// The reversed pattern, run over the reversed host, matches exactly the
/// ranges the original pattern would match, viewed from the end.
pub trait ReversiblePattern<T>: Pattern<T> {
    /// The pattern that matches the reverse of what `self` matches.
    fn reversed(&self) -> AnyPattern<T>;
}

impl<T, P: Pattern<T> + ?Sized> Pattern<T> for Box<P> {
    type Match<'a> = P::Match<'a> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.as_ref().matches(host, at)
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.as_ref().primary_match(host, at)
    }
}

impl<T, P: ReversiblePattern<T> + ?Sized> ReversiblePattern<T> for Box<P> {
    fn reversed(&self) -> AnyPattern<T> {
        self.as_ref().reversed()
    }
}

/// Builder methods to compose patterns.
pub trait PatternExt<T>: Pattern<T> + Sized {
    /// Match `self`, then `next` right after it.
    fn followed_by<B: Pattern<T>>(self, next: B) -> Concatenation<Self, B> {
        Concatenation::new(self, next)
    }

    /// Match `self`, or else `other`.
    fn or<B: Pattern<T>>(self, other: B) -> Alternatives<Self, B> {
        Alternatives::new(self, other)
    }

    /// Match `self` repeatedly, a number of times within `count`.
    fn repeated(self, count: impl RangeBounds<usize>, consumption: Consumption) -> Repetition<Self> {
        Repetition::new(self, count, consumption)
    }

    /// Match any single element where `self` does not match.
    fn negated(self) -> Negated<Self> {
        Negated::new(self)
    }

    /// Erase the type of the pattern.
    fn boxed(self) -> AnyPattern<T>
    where
        Self: ReversiblePattern<T> + Send + Sync + 'static,
    {
        AnyPattern::new(self)
    }
}

impl<T, P: Pattern<T>> PatternExt<T> for P {}

#[cfg(test)]
pub(crate) mod tests {
    use std::ops::Range;

    use insta::assert_snapshot;
    use itertools::Itertools;

    use super::*;

    /// The ranges of all matches of `pattern` at `at`.
    pub(crate) fn match_ranges<T, P: Pattern<T>>(pattern: &P, host: &[T], at: usize) -> Vec<Range<usize>> {
        pattern
            .matches(Span::new(host), at)
            .iter()
            .map(PatternMatch::range)
            .collect_vec()
    }

    /// Check the primary match is the first of all matches, at every location.
    pub(crate) fn assert_primary_is_first<T, P: Pattern<T>>(pattern: &P, host: &[T]) {
        let span = Span::new(host);
        for at in 0..=host.len() {
            let primary = pattern.primary_match(span, at).map(|m| m.range());
            let first = pattern.matches(span, at).first().map(PatternMatch::range);
            assert_eq!(primary, first, "primary match differs at {at}");
        }
    }

    #[test]
    fn test_boxed_pattern() {
        let pattern: Box<Literal<u8>> = Box::new(Literal::new([1, 2]));
        assert_eq!(match_ranges(&pattern, &[1, 2, 3], 0), vec![0..2]);
        assert_eq!(match_ranges(&pattern.reversed(), &[2, 1, 3], 0), vec![0..2]);
    }

    #[test]
    fn test_display_tree() {
        let digit = Conditional::named("digit", |c: &char| c.is_ascii_digit());
        let pattern = Literal::from("ab")
            .followed_by(digit.repeated(1.., Consumption::Lazy))
            .or(Nesting::new(Literal::from("("), Literal::from(")")).negated());
        assert_snapshot!(pattern, @"((['a', 'b'] <digit>{1,}?) | !nest(['('], [')']))");
    }

    #[test]
    fn test_builder_methods() {
        let pattern = Literal::new([1])
            .followed_by(Literal::new([2]).or(Literal::new([3])))
            .repeated(1.., Consumption::Greedy);
        assert_eq!(match_ranges(&pattern, &[1, 2, 1, 3, 1, 4], 0), vec![0..4, 0..2]);
        assert_primary_is_first(&pattern, &[1, 2, 1, 3, 1, 4]);
    }
}
