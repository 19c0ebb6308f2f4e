use derive_where::derive_where;

use super::{AtomicMatch, PatternMatch};
use crate::Span;

/// A component of a sequence split by a separator pattern.
///
/// Every component but the last is followed by the separator that ended it.
#[derive_where(Clone; M)]
#[derive(Debug)]
pub struct SeparatedMatch<'a, T, M> {
    component: AtomicMatch<'a, T>,
    separator: Option<M>,
    contents: Span<'a, T>,
}

impl<'a, T, M: PatternMatch<'a, T>> SeparatedMatch<'a, T, M> {
    /// A component of `host`, optionally terminated by `separator`.
    pub fn new(host: Span<'a, T>, component: AtomicMatch<'a, T>, separator: Option<M>) -> Self {
        let end = separator
            .as_ref()
            .map_or(component.range().end, |s| s.range().end);
        Self {
            contents: host.subspan(component.range().start..end),
            component,
            separator,
        }
    }

    /// The content between two separators.
    pub fn component(&self) -> AtomicMatch<'a, T> {
        self.component
    }

    /// The separator ending the component, absent for the last component.
    pub fn separator(&self) -> Option<&M> {
        self.separator.as_ref()
    }
}

impl<'a, T, M: PatternMatch<'a, T>> PatternMatch<'a, T> for SeparatedMatch<'a, T, M> {
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }
}
