//! The results of pattern matching.
//!
//! Every match knows the [`Span`] of the host it covers. Composite patterns
//! return composite matches that additionally keep the matches of their
//! sub-patterns, so that callers can inspect the structure of what matched.

mod atomic;
mod concatenated;
mod nesting;
mod repetition;
mod separated;

use std::ops::Range;

use itertools::Either;

use crate::Span;

pub use atomic::AtomicMatch;
pub use concatenated::{ConcatenatedMatch, NaryConcatenatedMatch};
pub use nesting::{NestingMatch, NestingSegment};
pub use repetition::RepetitionMatch;
pub use separated::SeparatedMatch;

/// A match of a pattern in a host span.
pub trait PatternMatch<'a, T: 'a>: Clone {
    /// The part of the host covered by the match.
    fn contents(&self) -> Span<'a, T>;

    /// The host indices covered by the match.
    fn range(&self) -> Range<usize> {
        self.contents().range()
    }

    /// Forget the structure of the match.
    fn to_atomic(&self) -> AtomicMatch<'a, T> {
        AtomicMatch::new(self.contents())
    }
}

impl<'a, T: 'a, L, R> PatternMatch<'a, T> for Either<L, R>
where
    L: PatternMatch<'a, T>,
    R: PatternMatch<'a, T>,
{
    fn contents(&self) -> Span<'a, T> {
        match self {
            Either::Left(m) => m.contents(),
            Either::Right(m) => m.contents(),
        }
    }
}
