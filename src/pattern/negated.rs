use std::fmt::{self, Display};

use super::{AnyPattern, Pattern, ReversiblePattern};
use crate::{matches::AtomicMatch, Span};

/// A pattern matching a single element wherever its base pattern does not
/// match.
///
/// The negation only looks at whether the base pattern has a match at the
/// location, not at how wide that match would be: a negated pattern always
/// matches exactly one element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Negated<P> {
    base: P,
}

impl<P> Negated<P> {
    /// Negate `base`.
    pub fn new(base: P) -> Self {
        Self { base }
    }

    /// The negated pattern.
    pub fn base(&self) -> &P {
        &self.base
    }
}

impl<T, P: Pattern<T>> Pattern<T> for Negated<P> {
    type Match<'a> = AtomicMatch<'a, T> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.primary_match(host, at).into_iter().collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        host.get(at)?;
        if self.base.primary_match(host, at).is_some() {
            return None;
        }
        Some(AtomicMatch::new(host.subspan(at..at + 1)))
    }
}

impl<T, P> ReversiblePattern<T> for Negated<P>
where
    T: 'static,
    P: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Negated::new(self.base.reversed()))
    }
}

impl<P: Display> Display for Negated<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.base)
    }
}
