//! Edit scripts from longest common subsequences.

use super::Change;
use crate::search::Search;

/// The removals and insertions turning `start` into `end`.
///
/// Common leading and trailing runs are skipped before the longest common
/// subsequence of the rest is computed, so that edits to long, mostly equal
/// sequences stay cheap. Removals come in ascending order of offset, as do
/// insertions.
pub(super) fn edit_script<T: PartialEq + Clone>(start: &[T], end: &[T]) -> Vec<Change<T>> {
    let prefix = start.common_prefix(end).len();
    let (start_rest, end_rest) = (&start[prefix..], &end[prefix..]);
    let suffix = start_rest.common_suffix(end_rest).len();
    let a = &start_rest[..start_rest.len() - suffix];
    let b = &end_rest[..end_rest.len() - suffix];

    let table = LcsTable::new(a, b);
    let mut removals = Vec::new();
    let mut insertions = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            i += 1;
            j += 1;
        } else if j == b.len() || (i < a.len() && table.get(i + 1, j) >= table.get(i, j + 1)) {
            removals.push(Change::remove(prefix + i, a[i].clone()));
            i += 1;
        } else {
            insertions.push(Change::insert(prefix + j, b[j].clone()));
            j += 1;
        }
    }
    removals.extend(insertions);
    removals
}

/// Lengths of the longest common subsequences of all suffix pairs.
struct LcsTable {
    lengths: Vec<usize>,
    width: usize,
}

impl LcsTable {
    fn new<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let width = b.len() + 1;
        let mut lengths = vec![0; (a.len() + 1) * width];
        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                lengths[i * width + j] = if a[i] == b[j] {
                    lengths[(i + 1) * width + j + 1] + 1
                } else {
                    lengths[(i + 1) * width + j].max(lengths[i * width + j + 1])
                };
            }
        }
        Self { lengths, width }
    }

    /// The length of the longest common subsequence of `a[i..]` and `b[j..]`.
    fn get(&self, i: usize, j: usize) -> usize {
        self.lengths[i * self.width + j]
    }
}
