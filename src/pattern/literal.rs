use std::fmt::{self, Debug, Display};

use smallvec::SmallVec;

use super::{AnyPattern, Pattern, ReversiblePattern};
use crate::{matches::AtomicMatch, Span};

/// A pattern matching a fixed sequence of elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal<T> {
    elements: SmallVec<[T; 4]>,
}

impl<T> Literal<T> {
    /// A pattern matching exactly `elements`.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// The elements to match.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}

impl<T> FromIterator<T> for Literal<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> From<Vec<T>> for Literal<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl From<&str> for Literal<char> {
    fn from(s: &str) -> Self {
        Self::new(s.chars())
    }
}

impl<T: PartialEq> Pattern<T> for Literal<T> {
    type Match<'a> = AtomicMatch<'a, T> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.primary_match(host, at).into_iter().collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        if !host.contains_boundary(at) {
            return None;
        }
        let mut index = at;
        for element in &self.elements {
            if host.get(index)? != element {
                return None;
            }
            index += 1;
        }
        Some(AtomicMatch::new(host.subspan(at..index)))
    }
}

impl<T> ReversiblePattern<T> for Literal<T>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Self::new(self.elements.iter().rev().cloned()))
    }
}

impl<T: Debug> Display for Literal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.elements.as_slice())
    }
}
