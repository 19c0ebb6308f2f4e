use std::{
    fmt::{self, Display},
    mem,
    ops::{Bound, RangeBounds},
};

use super::{
    trails::{advance_frontier, Tip, Trails},
    AnyPattern, Pattern, ReversiblePattern,
};
use crate::{matches::RepetitionMatch, Span};

/// Whether a repetition prefers more or fewer repetitions.
#[derive(Clone, Copy, Debug, derive_more::Display, PartialEq, Eq, Hash, Default)]
pub enum Consumption {
    /// Prefer as many repetitions as possible.
    #[default]
    #[display(fmt = "greedy")]
    Greedy,
    /// Prefer as few repetitions as possible.
    #[display(fmt = "lazy")]
    Lazy,
}

/// A pattern matching another pattern repeated a number of times.
///
/// The count of repetitions lies in `min..max`, where an absent `max` means
/// there is no upper limit.
///
/// Once `min` repetitions are reached, further repetitions must advance
/// through the host: a repetition of the base pattern that matches the empty
/// range is only accepted towards `min`. This ensures that repetitions of
/// patterns that may match the empty range always terminate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Repetition<P> {
    pattern: P,
    min: usize,
    max: Option<usize>,
    consumption: Consumption,
}

impl<P> Repetition<P> {
    /// Repeat `pattern` a number of times within `count`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is empty.
    pub fn new(pattern: P, count: impl RangeBounds<usize>, consumption: Consumption) -> Self {
        let min = match count.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let max = match count.end_bound() {
            Bound::Included(&n) => Some(n + 1),
            Bound::Excluded(&n) => Some(n),
            Bound::Unbounded => None,
        };
        assert!(
            max.map_or(true, |max| min < max),
            "empty repetition count range"
        );
        Self {
            pattern,
            min,
            max,
            consumption,
        }
    }

    /// The repeated pattern.
    pub fn pattern(&self) -> &P {
        &self.pattern
    }

    /// The minimum number of repetitions.
    pub fn min(&self) -> usize {
        self.min
    }

    /// One more than the maximum number of repetitions, if bounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether longer or shorter matches are preferred.
    pub fn consumption(&self) -> Consumption {
        self.consumption
    }

    fn allows(&self, count: usize) -> bool {
        self.max.map_or(true, |max| count < max)
    }

    /// The frontiers of paths with an allowed number of repetitions, fewest
    /// repetitions first. Every returned frontier is non-empty.
    ///
    /// With `distinct_ends`, only the first path reaching each index is kept
    /// at each step. This preserves the first path of every frontier.
    fn frontiers<'a, T>(
        &self,
        host: Span<'a, T>,
        at: usize,
        trails: &mut Trails<P::Match<'a>>,
        distinct_ends: bool,
    ) -> Vec<Vec<Tip>>
    where
        P: Pattern<T>,
    {
        if !host.contains_boundary(at) {
            return Vec::new();
        }
        let mut frontier = vec![None];
        let mut count = 0;
        let mut frontiers = Vec::new();
        loop {
            let next = if self.allows(count + 1) {
                self.advance(host, at, trails, &frontier, count >= self.min, distinct_ends)
            } else {
                Vec::new()
            };
            if next.is_empty() {
                if count >= self.min {
                    frontiers.push(frontier);
                }
                return frontiers;
            }
            if count >= self.min {
                frontiers.push(mem::replace(&mut frontier, next));
            } else {
                frontier = next;
            }
            count += 1;
        }
    }

    fn advance<'a, T>(
        &self,
        host: Span<'a, T>,
        at: usize,
        trails: &mut Trails<P::Match<'a>>,
        frontier: &[Tip],
        optional: bool,
        distinct_ends: bool,
    ) -> Vec<Tip>
    where
        P: Pattern<T>,
    {
        let mut next = advance_frontier(trails, &self.pattern, host, at, frontier);
        if optional {
            next.retain(|&tip| trails.advanced(tip, at));
        }
        if distinct_ends {
            next = trails.distinct_ends(next, at);
        }
        next
    }
}

impl<T, P: Pattern<T>> Pattern<T> for Repetition<P> {
    type Match<'a> = RepetitionMatch<'a, T, P::Match<'a>> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        let mut trails = Trails::new();
        let mut frontiers = self.frontiers(host, at, &mut trails, false);
        if self.consumption == Consumption::Greedy {
            frontiers.reverse();
        }
        frontiers
            .into_iter()
            .flatten()
            .map(|tip| RepetitionMatch::new(host, at, trails.path(tip)))
            .collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        let mut trails = Trails::new();
        let tip = match self.consumption {
            Consumption::Greedy => *self.frontiers(host, at, &mut trails, true).last()?.first()?,
            Consumption::Lazy => {
                // The fewest allowed repetitions win, no need to look further
                if !host.contains_boundary(at) {
                    return None;
                }
                let mut frontier = vec![None];
                for _ in 0..self.min {
                    frontier = self.advance(host, at, &mut trails, &frontier, false, true);
                    if frontier.is_empty() {
                        return None;
                    }
                }
                frontier[0]
            }
        };
        Some(RepetitionMatch::new(host, at, trails.path(tip)))
    }
}

impl<T, P> ReversiblePattern<T> for Repetition<P>
where
    T: 'static,
    P: ReversiblePattern<T>,
{
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(Repetition {
            pattern: self.pattern.reversed(),
            min: self.min,
            max: self.max,
            consumption: self.consumption,
        })
    }
}

impl<P: Display> Display for Repetition<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{},", self.pattern, self.min)?;
        if let Some(max) = self.max {
            write!(f, "{}", max - 1)?;
        }
        write!(f, "}}")?;
        if self.consumption == Consumption::Lazy {
            write!(f, "?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use rstest::rstest;

    use super::*;
    use crate::{
        matches::PatternMatch,
        pattern::{
            tests::{assert_primary_is_first, match_ranges},
            Alternatives, Literal, PatternExt,
        },
    };

    #[test]
    fn test_greedy_prefers_more() {
        let pattern = Repetition::new(Literal::new([5, 4]), 0..=2, Consumption::Greedy);
        let host = [5, 4, 5, 4];
        assert_eq!(match_ranges(&pattern, &host, 0), vec![0..4, 0..2, 0..0]);
        assert_primary_is_first(&pattern, &host);
    }

    #[rstest]
    #[case(Consumption::Lazy, vec![3..5, 3..7])]
    #[case(Consumption::Greedy, vec![3..7, 3..5])]
    fn test_consumption(#[case] consumption: Consumption, #[case] expected: Vec<Range<usize>>) {
        let pattern = Repetition::new(Literal::new([4, 5]), 1.., consumption);
        let host = [1, 2, 3, 4, 5, 4, 5, 6];
        assert_eq!(match_ranges(&pattern, &host, 3), expected);
        assert_primary_is_first(&pattern, &host);
    }

    #[test]
    fn test_zero_repetitions() {
        let pattern = Repetition::new(Literal::new([1]), 0..1, Consumption::Greedy);
        let host = [1, 1, 2];
        for at in 0..=host.len() {
            assert_eq!(match_ranges(&pattern, &host, at), vec![at..at]);
        }
    }

    #[rstest]
    #[case(0, vec![0..0])]
    #[case(1, vec![0..1])]
    #[case(3, vec![0..3])]
    #[case(4, vec![])]
    fn test_fixed_count(#[case] n: usize, #[case] expected: Vec<Range<usize>>) {
        let host = [7, 7, 7, 8];
        for consumption in [Consumption::Greedy, Consumption::Lazy] {
            let pattern = Repetition::new(Literal::new([7]), n..=n, consumption);
            assert_eq!(match_ranges(&pattern, &host, 0), expected);
            assert_primary_is_first(&pattern, &host);
        }
    }

    #[test]
    fn test_too_few_repetitions() {
        let pattern = Repetition::new(Literal::new([1]), 3.., Consumption::Lazy);
        assert_eq!(match_ranges(&pattern, &[1, 1], 0), vec![]);
        assert!(pattern.primary_match(Span::new(&[1, 1][..]), 0).is_none());
    }

    #[test]
    fn test_empty_matching_pattern_terminates() {
        let maybe_one = Literal::new([1]).or(Literal::new([]));
        let pattern = Repetition::new(maybe_one, .., Consumption::Greedy);
        let host = [1, 1, 2];

        let ranges = match_ranges(&pattern, &host, 0);
        assert_eq!(ranges.first(), Some(&(0..2)));
        assert!(ranges.iter().all(|r| r.start == 0 && r.end <= 2));
        assert_primary_is_first(&pattern, &host);
    }

    #[test]
    fn test_mandatory_empty_repetitions() {
        let pattern = Repetition::new(Literal::<u8>::new([]), 3..=3, Consumption::Greedy);
        let m = pattern.primary_match(Span::new(&[1][..]), 1).unwrap();
        assert_eq!(m.range(), 1..1);
        assert_eq!(m.count(), 3);
    }

    #[test]
    fn test_repetitions_are_kept() {
        let pattern = Alternatives::new(Literal::new([1]), Literal::new([2])).repeated(.., Consumption::Greedy);
        let host = [1, 2, 2, 3];
        let m = pattern.primary_match(Span::new(&host[..]), 0).unwrap();
        assert_eq!(m.range(), 0..3);
        assert_eq!(m.count(), 3);
        assert!(m.repetitions()[0].is_left());
        assert!(m.repetitions()[2].is_right());
    }

    #[test]
    fn test_long_greedy_run() {
        let host = vec![1u8; 20_000];
        let pattern = Literal::new([1]).repeated(.., Consumption::Greedy);
        let m = pattern.primary_match(Span::new(&host), 0).unwrap();
        assert_eq!(m.range(), 0..host.len());
        assert_eq!(m.count(), host.len());
    }

    #[test]
    fn test_ambiguous_primary_match() {
        // Exponentially many paths, only one of which is built
        let host = vec![1u8; 90];
        let span = Span::new(&host);
        let one_or_two = Literal::new([1]).or(Literal::new([1, 1]));

        let greedy = one_or_two.clone().repeated(.., Consumption::Greedy);
        let m = greedy.primary_match(span, 0).unwrap();
        assert_eq!(m.range(), 0..90);
        assert!(m.repetitions().iter().all(|r| r.is_left()));

        let lazy = one_or_two.repeated(45.., Consumption::Lazy);
        let m = lazy.primary_match(span, 0).unwrap();
        assert_eq!(m.range(), 0..45);
        assert_eq!(m.count(), 45);
    }

    #[rstest]
    #[case(Consumption::Greedy)]
    #[case(Consumption::Lazy)]
    fn test_primary_with_shared_ends(#[case] consumption: Consumption) {
        let one_or_two = Literal::new([1]).or(Literal::new([1, 1]));
        let host = [1, 1, 1, 1, 2, 1];
        for count in [0..2, 1..3, 2..5] {
            let pattern = one_or_two.clone().repeated(count, consumption);
            assert_primary_is_first(&pattern, &host);
        }
        let maybe_one = Literal::new([1]).or(Literal::new([]));
        assert_primary_is_first(&maybe_one.repeated(2.., consumption), &host);
    }

    #[test]
    #[should_panic(expected = "empty repetition count range")]
    fn test_empty_count() {
        Repetition::new(Literal::new([1]), 2..2, Consumption::Greedy);
    }

    #[test]
    fn test_reversed_repetition() {
        let pattern = Repetition::new(Literal::new([4, 5]), 1.., Consumption::Lazy);
        let host = [1, 2, 3, 4, 5, 4, 5, 6];
        let span = Span::new(&host[..]).reversed();
        // `6` is at reversed index 0, so the repetitions start at 1
        let m = pattern.reversed().primary_match(span, 1).unwrap();
        assert_eq!(m.reversed().range(), 5..7);
    }

    #[test]
    fn test_display() {
        let greedy = Repetition::new(Literal::new([1]), 2.., Consumption::Greedy);
        assert_eq!(greedy.to_string(), "[1]{2,}");
        let lazy = Repetition::new(Literal::new([1]), 0..=3, Consumption::Lazy);
        assert_eq!(lazy.to_string(), "[1]{0,3}?");
    }
}
