use std::{fmt, sync::Arc};

use super::{Pattern, ReversiblePattern};
use crate::{
    matches::{AtomicMatch, PatternMatch},
    Span,
};

/// A pattern of any type, with the structure of its matches erased.
///
/// Cloning an [`AnyPattern`] is cheap: clones share the underlying pattern.
/// This is the type of all reversed patterns, and a convenient way to build
/// pattern trees whose shape is only known at runtime.
pub struct AnyPattern<T> {
    pattern: Arc<dyn ErasedPattern<T> + Send + Sync>,
}

/// Object-safe view of a reversible pattern.
trait ErasedPattern<T> {
    fn erased_matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<AtomicMatch<'a, T>>
    where
        T: 'a;

    fn erased_primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<AtomicMatch<'a, T>>
    where
        T: 'a;

    fn erased_reversed(&self) -> AnyPattern<T>;
}

impl<T, P: ReversiblePattern<T>> ErasedPattern<T> for P {
    fn erased_matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<AtomicMatch<'a, T>>
    where
        T: 'a,
    {
        self.matches(host, at)
            .iter()
            .map(PatternMatch::to_atomic)
            .collect()
    }

    fn erased_primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<AtomicMatch<'a, T>>
    where
        T: 'a,
    {
        self.primary_match(host, at).map(|m| m.to_atomic())
    }

    fn erased_reversed(&self) -> AnyPattern<T> {
        self.reversed()
    }
}

impl<T> AnyPattern<T> {
    /// Erase the type of `pattern`.
    pub fn new<P>(pattern: P) -> Self
    where
        P: ReversiblePattern<T> + Send + Sync + 'static,
    {
        Self {
            pattern: Arc::new(pattern),
        }
    }
}

impl<T> Clone for AnyPattern<T> {
    fn clone(&self) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
        }
    }
}

impl<T> fmt::Debug for AnyPattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyPattern")
    }
}

impl<T> Pattern<T> for AnyPattern<T> {
    type Match<'a> = AtomicMatch<'a, T> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.pattern.erased_matches(host, at)
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        self.pattern.erased_primary_match(host, at)
    }
}

impl<T> ReversiblePattern<T> for AnyPattern<T> {
    fn reversed(&self) -> AnyPattern<T> {
        self.pattern.erased_reversed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{
        tests::{assert_primary_is_first, match_ranges},
        Consumption, Literal, PatternExt,
    };

    #[test]
    fn test_erased_matches() {
        let pattern = Literal::new([1]).repeated(.., Consumption::Greedy);
        let host = [1, 1, 2];
        let expected = match_ranges(&pattern, &host, 0);

        let any = pattern.boxed();
        assert_eq!(match_ranges(&any, &host, 0), expected);
        assert_eq!(match_ranges(&any.clone(), &host, 0), expected);
        assert_primary_is_first(&any, &host);
    }

    #[test]
    fn test_heterogeneous_alternatives() {
        let patterns = vec![Literal::new([1, 2]).boxed(), Literal::new([3]).negated().boxed()];
        let pattern = crate::pattern::NaryAlternatives::new(patterns);
        assert_eq!(match_ranges(&pattern, &[1, 2], 0), vec![0..2, 0..1]);
        assert_eq!(match_ranges(&pattern, &[3], 0), vec![]);
    }

    #[test]
    fn test_double_reversal() {
        let pattern = Literal::new([1, 2]).followed_by(Literal::new([3])).boxed();
        let twice = pattern.reversed().reversed();
        assert_eq!(match_ranges(&twice, &[0, 1, 2, 3], 1), vec![1..4]);
    }

    #[test]
    fn test_is_shareable() {
        fn assert_send_sync<P: Send + Sync>(_: &P) {}
        assert_send_sync(&Literal::new([1u8]).boxed());
    }
}
