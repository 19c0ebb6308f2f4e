use std::fmt::{self, Display};

use smallvec::SmallVec;

use super::{AnyPattern, Pattern, ReversiblePattern};
use crate::{
    matches::{AtomicMatch, NestingMatch, NestingSegment, PatternMatch},
    Span,
};

/// A pattern matching balanced pairs of delimiters.
///
/// The pattern matches where `opening` matches, and extends up to the
/// `closing` match that balances it: every opening delimiter in between must be
/// closed first. At each location, the closing delimiter is tried before the
/// opening one, so identical delimiters pair up with their next occurrence.
///
/// Delimiters matched in the interior must not be empty, or depth tracking
/// would never progress.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nesting<O, C> {
    opening: O,
    closing: C,
}

/// An open delimiter pair while scanning for its closing delimiter.
struct Level<'a, T, O, C> {
    opening: O,
    segments: Vec<NestingSegment<'a, T, O, C>>,
    cursor: usize,
}

impl<'a, T, O, C> Level<'a, T, O, C>
where
    O: PatternMatch<'a, T>,
    C: PatternMatch<'a, T>,
{
    fn new(opening: O) -> Self {
        let cursor = opening.range().end;
        Self {
            opening,
            segments: Vec::new(),
            cursor,
        }
    }

    /// Record the plain content between the cursor and `until`.
    fn flush(&mut self, host: Span<'a, T>, until: usize) {
        if self.cursor < until {
            let content = AtomicMatch::new(host.subspan(self.cursor..until));
            self.segments.push(NestingSegment::Content(content));
        }
        self.cursor = until;
    }

    fn push_nested(&mut self, host: Span<'a, T>, nested: NestingMatch<'a, T, O, C>) {
        self.flush(host, nested.range().start);
        self.cursor = nested.range().end;
        self.segments.push(NestingSegment::Nested(nested));
    }

    fn close(mut self, host: Span<'a, T>, closing: C) -> NestingMatch<'a, T, O, C> {
        self.flush(host, closing.range().start);
        NestingMatch::new(host, self.opening, closing, self.segments)
    }
}

impl<O, C> Nesting<O, C> {
    /// Match from `opening` to the `closing` delimiter that balances it.
    pub fn new(opening: O, closing: C) -> Self {
        Self { opening, closing }
    }

    /// The opening delimiter.
    pub fn opening(&self) -> &O {
        &self.opening
    }

    /// The closing delimiter.
    pub fn closing(&self) -> &C {
        &self.closing
    }
}

impl<T, O: Pattern<T>, C: Pattern<T>> Pattern<T> for Nesting<O, C> {
    type Match<'a> = NestingMatch<'a, T, O::Match<'a>, C::Match<'a>> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.primary_match(host, at).into_iter().collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        let opening = self.opening.primary_match(host, at)?;
        let mut index = opening.range().end;
        let mut levels: SmallVec<[Level<'a, T, O::Match<'a>, C::Match<'a>>; 4]> = SmallVec::new();
        levels.push(Level::new(opening));

        loop {
            if let Some(closing) = self.closing.primary_match(host, index) {
                index = closing.range().end;
                let level = levels.pop()?;
                let nested = level.close(host, closing);
                match levels.last_mut() {
                    Some(parent) => parent.push_nested(host, nested),
                    None => return Some(nested),
                }
            } else if let Some(opening) = self.opening.primary_match(host, index) {
                assert!(
                    !opening.range().is_empty(),
                    "nested opening delimiter matched the empty range at {index}"
                );
                index = opening.range().end;
                levels.push(Level::new(opening));
            } else if index < host.end() {
                index += 1;
            } else {
                return None;
            }
        }
    }
}

impl<T, O, C> ReversiblePattern<T> for Nesting<O, C>
where
    T: 'static,
    O: ReversiblePattern<T>,
    C: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Nesting::new(self.closing.reversed(), self.opening.reversed()))
    }
}

impl<O: Display, C: Display> Display for Nesting<O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nest({}, {})", self.opening, self.closing)
    }
}
