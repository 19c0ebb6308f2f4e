use derive_where::derive_where;

use super::{AtomicMatch, PatternMatch};
use crate::Span;

/// A balanced pair of delimiters and everything between them.
///
/// The interior is decomposed into [`NestingSegment`]s: runs of plain content
/// alternating with nested matches of the same delimiter pair.
#[derive_where(Clone; O, C)]
#[derive(Debug)]
pub struct NestingMatch<'a, T, O, C> {
    opening: O,
    closing: C,
    interior: AtomicMatch<'a, T>,
    segments: Vec<NestingSegment<'a, T, O, C>>,
    contents: Span<'a, T>,
}

/// A piece of the interior of a [`NestingMatch`].
#[derive_where(Clone; O, C)]
#[derive(Debug)]
pub enum NestingSegment<'a, T, O, C> {
    /// Content outside of any nested delimiter pair.
    Content(AtomicMatch<'a, T>),
    /// A nested delimiter pair.
    Nested(NestingMatch<'a, T, O, C>),
}

impl<'a, T, O, C> NestingMatch<'a, T, O, C>
where
    O: PatternMatch<'a, T>,
    C: PatternMatch<'a, T>,
{
    /// Assemble a nesting match from its delimiters and interior segments.
    pub fn new(
        host: Span<'a, T>,
        opening: O,
        closing: C,
        segments: Vec<NestingSegment<'a, T, O, C>>,
    ) -> Self {
        let interior = AtomicMatch::new(host.subspan(opening.range().end..closing.range().start));
        let contents = host.subspan(opening.range().start..closing.range().end);
        Self {
            opening,
            closing,
            interior,
            segments,
            contents,
        }
    }

    /// The match of the opening delimiter.
    pub fn opening(&self) -> &O {
        &self.opening
    }

    /// The match of the closing delimiter.
    pub fn closing(&self) -> &C {
        &self.closing
    }

    /// Everything between the delimiters.
    pub fn interior(&self) -> AtomicMatch<'a, T> {
        self.interior
    }

    /// The interior, split into plain content and nested matches.
    pub fn segments(&self) -> &[NestingSegment<'a, T, O, C>] {
        &self.segments
    }

    /// The nested matches directly inside this one.
    pub fn nested(&self) -> impl Iterator<Item = &NestingMatch<'a, T, O, C>> {
        self.segments.iter().filter_map(|segment| match segment {
            NestingSegment::Nested(nested) => Some(nested),
            NestingSegment::Content(_) => None,
        })
    }

    /// The nesting depth of the deepest delimiter pair, counting this one.
    pub fn depth(&self) -> usize {
        1 + self.nested().map(NestingMatch::depth).max().unwrap_or(0)
    }
}

impl<'a, T, O, C> NestingSegment<'a, T, O, C>
where
    O: PatternMatch<'a, T>,
    C: PatternMatch<'a, T>,
{
    /// The host span covered by the segment.
    pub fn contents(&self) -> Span<'a, T> {
        match self {
            NestingSegment::Content(content) => content.contents(),
            NestingSegment::Nested(nested) => nested.contents(),
        }
    }
}

impl<'a, T, O, C> PatternMatch<'a, T> for NestingMatch<'a, T, O, C>
where
    O: PatternMatch<'a, T>,
    C: PatternMatch<'a, T>,
{
    fn contents(&self) -> Span<'a, T> {
        self.contents
    }
}
