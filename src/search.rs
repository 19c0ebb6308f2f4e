//! Searching sequences for patterns.
//!
//! [`Search`] scans a sequence location by location for matches of a
//! [`Pattern`], and builds on this to split, test and edit the sequence.
//! [`SearchMut`] performs the edits in place.
//!
//! Scans for all matches report non-overlapping matches: after a match, the
//! scan resumes at its end, or one element further for an empty match.
//! Backward searches run the reversed pattern over the reversed sequence.

mod in_place;

use std::ops::Range;

use crate::{
    matches::{AtomicMatch, PatternMatch, SeparatedMatch},
    pattern::{Pattern, ReversiblePattern},
    Span,
};

pub use in_place::SearchMut;

/// Search a sequence for matches of patterns.
///
/// All methods are provided in terms of [`Search::as_span`]. Locations and
/// ranges are in the index space of that span.
pub trait Search<T> {
    /// View the sequence as a span.
    fn as_span(&self) -> Span<'_, T>;

    /// The first match of `pattern` in the sequence.
    fn first_match<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Option<P::Match<'a>>
    where
        T: 'a,
    {
        let span = self.as_span();
        self.first_match_in(pattern, span.range())
    }

    /// The first match of `pattern` within `range`.
    ///
    /// Matches may not extend beyond `range`.
    fn first_match_in<'a, P: Pattern<T>>(
        &'a self,
        pattern: &P,
        range: Range<usize>,
    ) -> Option<P::Match<'a>>
    where
        T: 'a,
    {
        let host = self.as_span().subspan(range);
        (host.start()..=host.end()).find_map(|at| pattern.primary_match(host, at))
    }

    /// The last match of `pattern` in the sequence.
    ///
    /// This is the first match of the reversed pattern in the reversed
    /// sequence, i.e. the preferred match ending the latest.
    fn last_match<'a, P: ReversiblePattern<T>>(&'a self, pattern: &P) -> Option<AtomicMatch<'a, T>>
    where
        T: 'a,
    {
        let span = self.as_span();
        self.last_match_in(pattern, span.range())
    }

    /// The last match of `pattern` within `range`.
    fn last_match_in<'a, P: ReversiblePattern<T>>(
        &'a self,
        pattern: &P,
        range: Range<usize>,
    ) -> Option<AtomicMatch<'a, T>>
    where
        T: 'a,
    {
        let host = self.as_span().subspan(range).reversed();
        let reversed = pattern.reversed();
        (host.start()..=host.end())
            .find_map(|at| reversed.primary_match(host, at))
            .map(|m| m.reversed())
    }

    /// All non-overlapping matches of `pattern`, from first to last.
    fn all_matches<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Vec<P::Match<'a>>
    where
        T: 'a,
    {
        let span = self.as_span();
        self.all_matches_in(pattern, span.range())
    }

    /// All non-overlapping matches of `pattern` within `range`.
    fn all_matches_in<'a, P: Pattern<T>>(&'a self, pattern: &P, range: Range<usize>) -> Vec<P::Match<'a>>
    where
        T: 'a,
    {
        let host = self.as_span().subspan(range);
        let mut matches = Vec::new();
        let mut at = host.start();
        while at <= host.end() {
            match pattern.primary_match(host, at) {
                Some(m) => {
                    let Range { start, end } = m.range();
                    at = if start == end { end + 1 } else { end };
                    matches.push(m);
                }
                None => at += 1,
            }
        }
        matches
    }

    /// The part of the sequence before the first match of `pattern`.
    fn prefix_up_to<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Option<Span<'a, T>>
    where
        T: 'a,
    {
        let span = self.as_span();
        let m = self.first_match(pattern)?;
        Some(span.subspan(span.start()..m.range().start))
    }

    /// The part of the sequence up to the end of the first match of `pattern`.
    fn prefix_through<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Option<Span<'a, T>>
    where
        T: 'a,
    {
        let span = self.as_span();
        let m = self.first_match(pattern)?;
        Some(span.subspan(span.start()..m.range().end))
    }

    /// The part of the sequence from the start of the first match of `pattern`.
    fn suffix_from<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Option<Span<'a, T>>
    where
        T: 'a,
    {
        let span = self.as_span();
        let m = self.first_match(pattern)?;
        Some(span.subspan(m.range().start..span.end()))
    }

    /// The part of the sequence after the first match of `pattern`.
    fn suffix_after<'a, P: Pattern<T>>(&'a self, pattern: &P) -> Option<Span<'a, T>>
    where
        T: 'a,
    {
        let span = self.as_span();
        let m = self.first_match(pattern)?;
        Some(span.subspan(m.range().end..span.end()))
    }

    /// Split the sequence at the non-overlapping matches of `separator`.
    ///
    /// There is always one more component than separators: components are
    /// empty between adjacent separators, and at either end of the sequence
    /// when it starts or ends with a separator.
    fn components_separated_by<'a, P: Pattern<T>>(
        &'a self,
        separator: &P,
    ) -> Vec<SeparatedMatch<'a, T, P::Match<'a>>>
    where
        T: 'a,
    {
        let span = self.as_span();
        let mut components = Vec::new();
        let mut start = span.start();
        for m in self.all_matches(separator) {
            let Range { start: sep_start, end: sep_end } = m.range();
            let component = AtomicMatch::new(span.subspan(start..sep_start));
            components.push(SeparatedMatch::new(span, component, Some(m)));
            start = sep_end;
        }
        let last = AtomicMatch::new(span.subspan(start..span.end()));
        components.push(SeparatedMatch::new(span, last, None));
        components
    }

    /// Whether `pattern` matches anywhere in the sequence.
    fn contains_match<P: Pattern<T>>(&self, pattern: &P) -> bool {
        self.first_match(pattern).is_some()
    }

    /// Whether `pattern` matches at the start of the sequence.
    fn has_prefix<P: Pattern<T>>(&self, pattern: &P) -> bool {
        let span = self.as_span();
        pattern.primary_match(span, span.start()).is_some()
    }

    /// Whether `pattern` matches at the end of the sequence.
    fn has_suffix<P: ReversiblePattern<T>>(&self, pattern: &P) -> bool {
        let span = self.as_span().reversed();
        pattern.reversed().primary_match(span, span.start()).is_some()
    }

    /// Whether `pattern` matches the sequence as a whole.
    ///
    /// Any of the matches at the start may cover the sequence, not only the
    /// preferred one.
    fn is_match<P: Pattern<T>>(&self, pattern: &P) -> bool {
        let span = self.as_span();
        pattern
            .matches(span, span.start())
            .iter()
            .any(|m| m.range().end == span.end())
    }

    /// The longest run at the start of the sequence that `other` starts with
    /// too.
    fn common_prefix<'a, S: Search<T> + ?Sized>(&'a self, other: &S) -> AtomicMatch<'a, T>
    where
        T: PartialEq + 'a,
    {
        let span = self.as_span();
        let len = common_len(span, other.as_span());
        AtomicMatch::new(span.subspan(span.start()..span.start() + len))
    }

    /// The longest run at the end of the sequence that `other` ends with too.
    fn common_suffix<'a, S: Search<T> + ?Sized>(&'a self, other: &S) -> AtomicMatch<'a, T>
    where
        T: PartialEq + 'a,
    {
        let span = self.as_span();
        let len = common_len(span.reversed(), other.as_span().reversed());
        AtomicMatch::new(span.subspan(span.end() - len..span.end()))
    }

    /// A copy of the sequence with every match of `pattern` replaced by
    /// `replacement`.
    fn replacing_matches<P: Pattern<T>>(&self, pattern: &P, replacement: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.mutating_matches(pattern, |_| replacement.to_vec())
    }

    /// A copy of the sequence with the first match of `pattern` replaced by
    /// `replacement`.
    fn replacing_first_match<P: Pattern<T>>(&self, pattern: &P, replacement: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let span = self.as_span();
        let edits = self
            .first_match(pattern)
            .map(|m| (m.range(), replacement.to_vec()));
        splice(span, edits)
    }

    /// A copy of the sequence with every match of `pattern` replaced by the
    /// result of `f` on the match.
    fn mutating_matches<'a, P, F, R>(&'a self, pattern: &P, mut f: F) -> Vec<T>
    where
        T: Clone + 'a,
        P: Pattern<T>,
        F: FnMut(P::Match<'a>) -> R,
        R: IntoIterator<Item = T>,
    {
        let span = self.as_span();
        let edits = self
            .all_matches(pattern)
            .into_iter()
            .map(|m| (m.range(), f(m)));
        splice(span, edits)
    }

    /// A copy of the sequence up to the start of the first match of
    /// `pattern`, or all of it if there is no match.
    fn truncated_before<P: Pattern<T>>(&self, pattern: &P) -> Vec<T>
    where
        T: Clone,
    {
        self.prefix_up_to(pattern)
            .unwrap_or_else(|| self.as_span())
            .to_vec()
    }

    /// A copy of the sequence up to the end of the first match of `pattern`,
    /// or all of it if there is no match.
    fn truncated_after<P: Pattern<T>>(&self, pattern: &P) -> Vec<T>
    where
        T: Clone,
    {
        self.prefix_through(pattern)
            .unwrap_or_else(|| self.as_span())
            .to_vec()
    }

    /// A copy of the sequence from the start of the first match of `pattern`,
    /// or all of it if there is no match.
    fn dropping_up_to<P: Pattern<T>>(&self, pattern: &P) -> Vec<T>
    where
        T: Clone,
    {
        self.suffix_from(pattern)
            .unwrap_or_else(|| self.as_span())
            .to_vec()
    }

    /// A copy of the sequence after the end of the first match of `pattern`,
    /// or all of it if there is no match.
    fn dropping_through<P: Pattern<T>>(&self, pattern: &P) -> Vec<T>
    where
        T: Clone,
    {
        self.suffix_after(pattern)
            .unwrap_or_else(|| self.as_span())
            .to_vec()
    }
}

impl<T> Search<T> for [T] {
    fn as_span(&self) -> Span<'_, T> {
        Span::new(self)
    }
}

impl<T> Search<T> for Span<'_, T> {
    fn as_span(&self) -> Span<'_, T> {
        *self
    }
}

fn common_len<T: PartialEq>(a: Span<'_, T>, b: Span<'_, T>) -> usize {
    a.iter().zip(b.iter()).take_while(|(a, b)| a == b).count()
}

/// Copy `span`, replacing each of the ascending, disjoint `edits` ranges by
/// its new elements.
fn splice<T: Clone, R: IntoIterator<Item = T>>(
    span: Span<'_, T>,
    edits: impl IntoIterator<Item = (Range<usize>, R)>,
) -> Vec<T> {
    let mut spliced = Vec::with_capacity(span.len());
    let mut cursor = span.start();
    for (range, replacement) in edits {
        spliced.extend(span.subspan(cursor..range.start).iter().cloned());
        spliced.extend(replacement);
        cursor = range.end;
    }
    spliced.extend(span.subspan(cursor..span.end()).iter().cloned());
    spliced
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rstest::rstest;

    use super::*;
    use crate::pattern::{Conditional, Consumption, Literal, Nesting, PatternExt};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_prefix_and_suffix() {
        let host = [1, 2, 3, 4];
        let pattern = Literal::new([2, 3]);

        assert_eq!(host.prefix_up_to(&pattern).unwrap().range(), 0..1);
        assert_eq!(host.prefix_through(&pattern).unwrap().range(), 0..3);
        assert_eq!(host.suffix_from(&pattern).unwrap().range(), 1..4);
        assert_eq!(host.suffix_after(&pattern).unwrap().range(), 3..4);
    }

    #[test]
    fn test_absent_is_not_empty() {
        let host = [1, 2, 3, 4];
        assert!(host.prefix_up_to(&Literal::new([5])).is_none());
        let at_start = host.prefix_up_to(&Literal::new([1])).unwrap();
        assert!(at_start.is_empty());
    }

    #[rstest]
    #[case(0..6, Some(1..3))]
    #[case(2..6, Some(4..6))]
    #[case(2..5, None)]
    fn test_first_match_in(#[case] range: Range<usize>, #[case] expected: Option<Range<usize>>) {
        let host = [0, 1, 2, 0, 1, 2];
        let pattern = Literal::new([1, 2]);
        assert_eq!(host.first_match_in(&pattern, range).map(|m| m.range()), expected);
    }

    #[test]
    fn test_last_match() {
        let host = [1, 2, 1, 2, 3];
        let pattern = Literal::new([1, 2]);
        assert_eq!(host.last_match(&pattern).unwrap().range(), 2..4);
        assert_eq!(host.last_match_in(&pattern, 0..3).unwrap().range(), 0..2);
        assert!(host.last_match(&Literal::new([4])).is_none());
    }

    #[test]
    fn test_last_match_scans_backward() {
        let host = chars("abcabcab");
        let pattern = Literal::from("abc");
        let span = Span::new(&host);
        let backward = (0..=host.len())
            .rev()
            .find_map(|at| pattern.primary_match(span, at))
            .map(|m| m.range());
        assert_eq!(host.last_match(&pattern).map(|m| m.range()), backward);
    }

    #[test]
    fn test_greedy_first_match() {
        let pattern = Literal::new([5, 4]).repeated(0..=2, Consumption::Greedy);
        let m = [5, 4, 5, 4].first_match(&pattern).unwrap();
        assert_eq!(m.range(), 0..4);
        assert_eq!(m.count(), 2);
    }

    #[test]
    fn test_half_open_count() {
        // `0..2` allows at most one repetition
        let pattern = Literal::new([5, 4]).repeated(0..2, Consumption::Greedy);
        let m = [5, 4, 5, 4].first_match(&pattern).unwrap();
        assert_eq!(m.range(), 0..2);
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn test_all_matches() {
        let host = [1, 1, 1, 2, 1, 1];
        let pattern = Literal::new([1, 1]);
        let ranges = host.all_matches(&pattern).iter().map(|m| m.range()).collect_vec();
        assert_eq!(ranges, vec![0..2, 4..6]);
    }

    #[test]
    fn test_all_empty_matches() {
        let pattern = Literal::<u8>::new([]);
        let ranges = [1, 2].all_matches(&pattern).iter().map(|m| m.range()).collect_vec();
        assert_eq!(ranges, vec![0..0, 1..1, 2..2]);
    }

    #[test]
    fn test_components() {
        let host = chars(",a,,bc,");
        let components = host.components_separated_by(&Literal::from(","));
        let texts = components
            .iter()
            .map(|c| c.component().contents().iter().collect::<String>())
            .collect_vec();
        assert_eq!(texts, vec!["", "a", "", "bc", ""]);
        assert!(components.last().unwrap().separator().is_none());
        assert_eq!(components[1].range(), 1..3);
    }

    #[test]
    fn test_components_join() {
        let host = chars("one, two,three");
        let comma = Literal::from(",");
        let joined = host
            .components_separated_by(&comma)
            .iter()
            .map(|c| c.component().contents().to_vec())
            .collect_vec()
            .join(&',');
        assert_eq!(joined, host);
    }

    #[test]
    fn test_predicates() {
        let host = [1, 2, 3];
        assert!(host.contains_match(&Literal::new([2, 3])));
        assert!(!host.contains_match(&Literal::new([3, 2])));
        assert!(host.has_prefix(&Literal::new([1, 2])));
        assert!(!host.has_prefix(&Literal::new([2])));
        assert!(host.has_suffix(&Literal::new([2, 3])));
        assert!(!host.has_suffix(&Literal::new([2])));
    }

    #[test]
    fn test_is_match_uses_any_match() {
        let digit = Conditional::named("digit", |c: &char| c.is_ascii_digit());
        let lazy = digit.repeated(1.., Consumption::Lazy);
        assert!(chars("123").is_match(&lazy));
        assert!(!chars("12a").is_match(&lazy));
        assert!(!chars("").is_match(&lazy));
    }

    #[test]
    fn test_common_prefix_and_suffix() {
        let a = chars("prefix-a-suffix");
        let b = chars("prefix-bb-suffix");
        assert_eq!(a.common_prefix(&b[..]).range(), 0..7);
        assert_eq!(a.common_suffix(&b[..]).range(), 8..15);
        assert_eq!(a.common_prefix(&[][..]).range(), 0..0);
    }

    #[test]
    fn test_replacing() {
        let host = [1, 2, 3, 1, 2];
        let pattern = Literal::new([1, 2]);
        assert_eq!(host.replacing_matches(&pattern, &[9]), vec![9, 3, 9]);
        assert_eq!(host.replacing_first_match(&pattern, &[]), vec![3, 1, 2]);
    }

    #[test]
    fn test_replacing_without_matches() {
        let host = [3, 4, 5];
        assert_eq!(host.replacing_matches(&Literal::new([1, 2]), &[9]), host.to_vec());
    }

    #[test]
    fn test_mutating_nested() {
        let host = chars("f(a(b)) g(c)");
        let parens = Nesting::new(Literal::from("("), Literal::from(")"));
        let mutated = host.mutating_matches(&parens, |m| {
            let mut inner = vec!['['];
            inner.extend(m.interior().contents().iter());
            inner.push(']');
            inner
        });
        assert_eq!(mutated.into_iter().collect::<String>(), "f[a(b)] g[c]");
    }

    #[rstest]
    #[case("a.b.c", "a")]
    #[case("abc", "abc")]
    fn test_truncated_before(#[case] host: &str, #[case] expected: &str) {
        let dot = Literal::from(".");
        assert_eq!(chars(host).truncated_before(&dot), chars(expected));
    }

    #[test]
    fn test_truncate_and_drop() {
        let host = chars("key=value=x");
        let eq = Literal::from("=");
        assert_eq!(host.truncated_after(&eq), chars("key="));
        assert_eq!(host.dropping_up_to(&eq), chars("=value=x"));
        assert_eq!(host.dropping_through(&eq), chars("value=x"));
    }

    #[test]
    fn test_search_in_subspan() {
        let host = [1, 2, 1, 2];
        let span = Span::new(&host[..]).subspan(1..4);
        let m = span.first_match(&Literal::new([1, 2])).unwrap();
        assert_eq!(m.range(), 2..4);
        assert_eq!(span.replacing_matches(&Literal::new([1]), &[0]), vec![2, 0, 2]);
    }
}
