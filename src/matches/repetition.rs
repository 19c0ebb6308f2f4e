use derive_where::derive_where;

use super::PatternMatch;
use crate::Span;

/// A match of a pattern repeated a number of times.
#[derive_where(Clone; M)]
#[derive(Debug)]
pub struct RepetitionMatch<'a, T, M> {
    repetitions: Vec<M>,
    contents: Span<'a, T>,
}

impl<'a, T, M: PatternMatch<'a, T>> RepetitionMatch<'a, T, M> {
    /// Join adjacent `repetitions` that start at `at` in `host`.
    pub fn new(host: Span<'a, T>, at: usize, repetitions: Vec<M>) -> Self {
        let end = repetitions.last().map_or(at, |m| m.range().end);
        Self {
            contents: host.subspan(at..end),
            repetitions,
        }
    }

    /// The match of each repetition, in order.
    pub fn repetitions(&self) -> &[M] {
        &self.repetitions
    }

    /// The number of repetitions.
    pub fn count(&self) -> usize {
        self.repetitions.len()
    }
}

impl<'a, T, M: PatternMatch<'a, T>> PatternMatch<'a, T> for RepetitionMatch<'a, T, M> {
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }
}
