use std::ops::Range;

use super::Search;
use crate::{matches::PatternMatch, pattern::Pattern};

/// Edit a sequence in place at the matches of patterns.
///
/// Every method returns whether the sequence changed.
pub trait SearchMut<T> {
    /// Replace every match of `pattern` by `replacement`.
    fn replace_matches<P: Pattern<T>>(&mut self, pattern: &P, replacement: &[T]) -> bool
    where
        T: Clone,
    {
        self.mutate_matches(pattern, |_| replacement.to_vec())
    }

    /// Replace the first match of `pattern` by `replacement`.
    fn replace_first_match<P: Pattern<T>>(&mut self, pattern: &P, replacement: &[T]) -> bool
    where
        T: Clone;

    /// Replace every match of `pattern` by the result of `f` on the matched
    /// elements.
    ///
    /// Unlike [`Search::mutating_matches`], `f` sees the matched elements
    /// rather than the match: a match borrows the sequence, and no lifetime of
    /// that borrow can be named while the sequence is borrowed mutably. To
    /// rewrite matches using their structure, assign the result of
    /// [`Search::mutating_matches`] instead.
    fn mutate_matches<P, F, R>(&mut self, pattern: &P, f: F) -> bool
    where
        P: Pattern<T>,
        F: FnMut(&[T]) -> R,
        R: IntoIterator<Item = T>;

    /// Remove everything from the start of the first match of `pattern`.
    fn truncate_before<P: Pattern<T>>(&mut self, pattern: &P) -> bool;

    /// Remove everything after the end of the first match of `pattern`.
    fn truncate_after<P: Pattern<T>>(&mut self, pattern: &P) -> bool;

    /// Remove everything before the start of the first match of `pattern`.
    fn drop_up_to<P: Pattern<T>>(&mut self, pattern: &P) -> bool;

    /// Remove everything up to the end of the first match of `pattern`.
    fn drop_through<P: Pattern<T>>(&mut self, pattern: &P) -> bool;
}

impl<T> SearchMut<T> for Vec<T> {
    fn replace_first_match<P: Pattern<T>>(&mut self, pattern: &P, replacement: &[T]) -> bool
    where
        T: Clone,
    {
        let Some(range) = first_range(self, pattern) else {
            return false;
        };
        self.splice(range, replacement.iter().cloned());
        true
    }

    fn mutate_matches<P, F, R>(&mut self, pattern: &P, mut f: F) -> bool
    where
        P: Pattern<T>,
        F: FnMut(&[T]) -> R,
        R: IntoIterator<Item = T>,
    {
        let edits: Vec<(Range<usize>, Vec<T>)> = self
            .as_slice()
            .all_matches(pattern)
            .iter()
            .map(|m| {
                let range = m.range();
                let replacement = f(&self[range.clone()]).into_iter().collect();
                (range, replacement)
            })
            .collect();
        if edits.is_empty() {
            return false;
        }
        // Later ranges first, so that earlier ones stay valid
        for (range, replacement) in edits.into_iter().rev() {
            self.splice(range, replacement);
        }
        true
    }

    fn truncate_before<P: Pattern<T>>(&mut self, pattern: &P) -> bool {
        match first_range(self, pattern) {
            Some(range) if range.start < self.len() => {
                self.truncate(range.start);
                true
            }
            _ => false,
        }
    }

    fn truncate_after<P: Pattern<T>>(&mut self, pattern: &P) -> bool {
        match first_range(self, pattern) {
            Some(range) if range.end < self.len() => {
                self.truncate(range.end);
                true
            }
            _ => false,
        }
    }

    fn drop_up_to<P: Pattern<T>>(&mut self, pattern: &P) -> bool {
        match first_range(self, pattern) {
            Some(range) if range.start > 0 => {
                self.drain(..range.start);
                true
            }
            _ => false,
        }
    }

    fn drop_through<P: Pattern<T>>(&mut self, pattern: &P) -> bool {
        match first_range(self, pattern) {
            Some(range) if range.end > 0 => {
                self.drain(..range.end);
                true
            }
            _ => false,
        }
    }
}

fn first_range<T, P: Pattern<T>>(elements: &[T], pattern: &P) -> Option<Range<usize>> {
    elements.first_match(pattern).map(|m| m.range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Conditional, Consumption, Literal, Nesting, PatternExt};

    #[test]
    fn test_replace_matches() {
        let mut host = vec![1, 2, 3, 1, 2, 1];
        assert!(host.replace_matches(&Literal::new([1, 2]), &[7, 7, 7]));
        assert_eq!(host, vec![7, 7, 7, 3, 7, 7, 7, 1]);
        assert!(!host.replace_matches(&Literal::new([1, 2]), &[0]));
        assert_eq!(host, vec![7, 7, 7, 3, 7, 7, 7, 1]);
    }

    #[test]
    fn test_replace_first_match() {
        let mut host = vec![1, 2, 1, 2];
        assert!(host.replace_first_match(&Literal::new([1, 2]), &[]));
        assert_eq!(host, vec![1, 2]);
    }

    #[test]
    fn test_mutate_matches() {
        let mut host: Vec<char> = "a12b345".chars().collect();
        let digits = Conditional::named("digit", |c: &char| c.is_ascii_digit())
            .repeated(1.., Consumption::Greedy);
        assert!(host.mutate_matches(&digits, |run| run.iter().rev().copied().collect::<Vec<_>>()));
        assert_eq!(host.into_iter().collect::<String>(), "a21b543");
    }

    #[test]
    fn test_structured_rewrite() {
        let parens = Nesting::new(Literal::new(['(']), Literal::new([')']));
        let mut host: Vec<char> = "f(a(b)) g(c)".chars().collect();
        host = host.mutating_matches(&parens, |m| {
            let mut inner = vec!['['];
            inner.extend(m.interior().contents().iter());
            inner.push(']');
            inner
        });
        assert_eq!(host.iter().collect::<String>(), "f[a(b)] g[c]");

        assert!(host.mutate_matches(&Literal::new(['(']), |open| open.iter().map(|_| '<').collect::<Vec<_>>()));
        assert_eq!(host.into_iter().collect::<String>(), "f[a<b)] g[c]");
    }

    #[test]
    fn test_truncate_and_drop() {
        let dot = Literal::new(['.']);
        let original: Vec<char> = "a.b.c".chars().collect();

        let mut host = original.clone();
        assert!(host.truncate_before(&dot));
        assert_eq!(host, vec!['a']);

        let mut host = original.clone();
        assert!(host.truncate_after(&dot));
        assert_eq!(host, vec!['a', '.']);

        let mut host = original.clone();
        assert!(host.drop_up_to(&dot));
        assert_eq!(host, vec!['.', 'b', '.', 'c']);

        let mut host = original.clone();
        assert!(host.drop_through(&dot));
        assert_eq!(host, vec!['b', '.', 'c']);

        let mut host = original.clone();
        assert!(!host.truncate_before(&Literal::new(['x'])));
        assert!(!host.drop_up_to(&Literal::new(['a'])));
        assert_eq!(host, original);
    }

    #[test]
    fn test_agrees_with_copies() {
        let host = vec![1, 2, 3, 2, 3, 4];
        let pattern = Literal::new([2, 3]);

        let mut edited = host.clone();
        edited.replace_matches(&pattern, &[0]);
        assert_eq!(edited, host.replacing_matches(&pattern, &[0]));

        let mut edited = host.clone();
        edited.drop_through(&pattern);
        assert_eq!(edited, host.dropping_through(&pattern));
    }
}
