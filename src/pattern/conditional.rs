use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use derive_where::derive_where;

use super::{AnyPattern, Pattern, ReversiblePattern};
use crate::{matches::AtomicMatch, Span};

type Condition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A pattern matching any single element that satisfies a condition.
#[derive_where(Clone)]
pub struct Conditional<T> {
    condition: Condition<T>,
    name: Option<String>,
}

impl<T> Conditional<T> {
    /// A pattern matching elements for which `condition` holds.
    pub fn new(condition: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            condition: Arc::new(condition),
            name: None,
        }
    }

    /// Like [`Conditional::new`], with a name shown when displaying the pattern.
    pub fn named(
        name: impl Into<String>,
        condition: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(condition)
        }
    }

    /// Whether `element` satisfies the condition.
    pub fn accepts(&self, element: &T) -> bool {
        (self.condition)(element)
    }
}

impl<T> Pattern<T> for Conditional<T> {
    type Match<'a> = AtomicMatch<'a, T> where T: 'a;

    fn matches<'a>(&self, host: Span<'a, T>, at: usize) -> Vec<Self::Match<'a>> {
        self.primary_match(host, at).into_iter().collect()
    }

    fn primary_match<'a>(&self, host: Span<'a, T>, at: usize) -> Option<Self::Match<'a>> {
        let element = host.get(at)?;
        self.accepts(element)
            .then(|| AtomicMatch::new(host.subspan(at..at + 1)))
    }
}

impl<T: 'static> ReversiblePattern<T> for Conditional<T> {
    fn reversed(&self) -> AnyPattern<T> {
        AnyPattern::new(self.clone())
    }
}

impl<T> Display for Conditional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<{name}>"),
            None => write!(f, "<?>"),
        }
    }
}

impl<T> Debug for Conditional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::tests::{assert_primary_is_first, match_ranges};

    fn digit() -> Conditional<char> {
        Conditional::named("digit", char::is_ascii_digit)
    }

    #[test]
    fn test_conditional() {
        let host = "a1".chars().collect::<Vec<_>>();
        let pattern = digit();

        assert_eq!(match_ranges(&pattern, &host, 0), vec![]);
        assert_eq!(match_ranges(&pattern, &host, 1), vec![1..2]);
        assert_eq!(match_ranges(&pattern, &host, 2), vec![]);
        assert_primary_is_first(&pattern, &host);
    }

    #[test]
    fn test_reversed_conditional() {
        let host = "a1".chars().collect::<Vec<_>>();
        let reversed = digit().reversed();
        let span = Span::new(&host).reversed();

        assert_eq!(reversed.primary_match(span, 0).unwrap().reversed().range(), 1..2);
        assert!(reversed.primary_match(span, 1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(digit().to_string(), "<digit>");
        assert_eq!(Conditional::new(|_: &u8| true).to_string(), "<?>");
    }
}
