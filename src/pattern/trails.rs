//! Paths of adjacent matches sharing their prefixes.

use itertools::Itertools;

use super::Pattern;
use crate::{matches::PatternMatch, Span};

/// The last node of a path in [`Trails`], `None` for the empty path.
pub(super) type Tip = Option<usize>;

/// An arena of paths of adjacent matches, all starting at the same location.
///
/// Each node holds one match and the tip of the path it extends, so that
/// extending a path by a match adds a single node.
pub(super) struct Trails<M> {
    nodes: Vec<Node<M>>,
}

struct Node<M> {
    last: M,
    end: usize,
    parent: Tip,
}

impl<M> Trails<M> {
    pub(super) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The index the path at `tip` ends at, for paths starting at `at`.
    pub(super) fn end(&self, tip: Tip, at: usize) -> usize {
        tip.map_or(at, |i| self.nodes[i].end)
    }

    /// Whether the last match of the path at `tip` is not zero-width.
    pub(super) fn advanced(&self, tip: Tip, at: usize) -> bool {
        match tip {
            None => true,
            Some(i) => self.nodes[i].end != self.end(self.nodes[i].parent, at),
        }
    }

    /// Keep the first path of `frontier` ending at each index.
    pub(super) fn distinct_ends(&self, frontier: Vec<Tip>, at: usize) -> Vec<Tip> {
        frontier
            .into_iter()
            .unique_by(|&tip| self.end(tip, at))
            .collect()
    }

    /// The matches along the path at `tip`, in order.
    pub(super) fn path(&self, mut tip: Tip) -> Vec<M>
    where
        M: Clone,
    {
        let mut path = Vec::new();
        while let Some(i) = tip {
            path.push(self.nodes[i].last.clone());
            tip = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}

/// Extend every path of `frontier` by every match of `pattern` at its end.
///
/// The new frontier is ordered by path, then by match.
pub(super) fn advance_frontier<'a, T, P: Pattern<T>>(
    trails: &mut Trails<P::Match<'a>>,
    pattern: &P,
    host: Span<'a, T>,
    at: usize,
    frontier: &[Tip],
) -> Vec<Tip> {
    let mut next = Vec::new();
    for &parent in frontier {
        for last in pattern.matches(host, trails.end(parent, at)) {
            next.push(Some(trails.nodes.len()));
            trails.nodes.push(Node {
                end: last.range().end,
                last,
                parent,
            });
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::pattern::{Literal, PatternExt};

    #[test]
    fn test_paths_share_prefixes() {
        let host = [1, 1, 1];
        let span = Span::new(&host[..]);
        let one_or_two = Literal::new([1]).or(Literal::new([1, 1]));
        let mut trails = Trails::new();

        let first = advance_frontier(&mut trails, &one_or_two, span, 0, &[None]);
        let second = advance_frontier(&mut trails, &one_or_two, span, 0, &first);
        let ends = second.iter().map(|&tip| trails.end(tip, 0)).collect_vec();
        assert_eq!(ends, vec![2, 3, 3]);
        assert_eq!(trails.nodes.len(), 5);

        let distinct = trails.distinct_ends(second.clone(), 0);
        assert_eq!(distinct, second[..2].to_vec());

        let path = trails.path(second[1]).iter().map(|m| m.range()).collect_vec();
        assert_eq!(path, vec![0..1, 1..3]);
        assert!(trails.path(None).is_empty());
    }

    #[test]
    fn test_zero_width_steps() {
        let host = [1u8];
        let span = Span::new(&host[..]);
        let mut trails = Trails::new();
        let empty = advance_frontier(&mut trails, &Literal::<u8>::new([]), span, 1, &[None]);
        assert!(trails.advanced(None, 1));
        assert!(!trails.advanced(empty[0], 1));
    }
}
