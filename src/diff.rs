//! Structural differences between sequences.
//!
//! A [`ChangeScript`] lists the element insertions and removals that turn one
//! sequence into another. Scripts are validated on construction, can be
//! inverted, can describe moved elements by associating a removal with an
//! insertion, and are applied with [`ChangeScript::apply`].
//!
//! ```
//! use seqmatching::diff::difference;
//!
//! let start = ['a', 'b', 'c'];
//! let end = ['b', 'c', 'a'];
//! let script = difference(&start, &end).inferring_moves();
//!
//! assert_eq!(script.apply(&start).unwrap(), end);
//! assert_eq!(script.inverse().apply(&end).unwrap(), start);
//! ```

mod change;
mod lcs;

use std::collections::BTreeMap;

use thiserror::Error;

pub use change::Change;

/// An ordered, internally consistent list of changes.
///
/// Removals come first, by descending offset, followed by insertions by
/// ascending offset. This is the order in which they are applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawChangeScript<T>",
        bound(deserialize = "T: serde::Deserialize<'de> + PartialEq")
    )
)]
pub struct ChangeScript<T> {
    changes: Vec<Change<T>>,
}

/// The serialised form of a change script, before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawChangeScript<T> {
    changes: Vec<Change<T>>,
}

#[cfg(feature = "serde")]
impl<T: PartialEq> TryFrom<RawChangeScript<T>> for ChangeScript<T> {
    type Error = InvalidChangeScript;

    fn try_from(raw: RawChangeScript<T>) -> Result<Self, Self::Error> {
        Self::try_new(raw.changes)
    }
}

/// Errors that occur when constructing change scripts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidChangeScript {
    /// Two removals at the same offset
    #[error("Duplicate removal at offset {0}")]
    DuplicateRemoval(usize),

    /// Two insertions at the same offset
    #[error("Duplicate insertion at offset {0}")]
    DuplicateInsertion(usize),

    /// An association to a change that does not exist or does not refer back
    #[error("Change at offset {offset} is associated with {associated_with}, which is not associated back")]
    DanglingAssociation {
        /// The offset of the associated change
        offset: usize,
        /// The offset it refers to
        associated_with: usize,
    },

    /// An association between different elements
    #[error("Change at offset {offset} is associated with {associated_with}, which changes a different element")]
    MismatchedAssociation {
        /// The offset of the associated change
        offset: usize,
        /// The offset it refers to
        associated_with: usize,
    },
}

/// Errors that occur when applying a change script to a sequence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    /// A removal past the end of the sequence
    #[error("Cannot remove at offset {offset} of a sequence of length {len}")]
    RemovalOutOfBounds {
        /// The offset of the removal
        offset: usize,
        /// The length of the sequence at that point
        len: usize,
    },

    /// An insertion past the end of the sequence
    #[error("Cannot insert at offset {offset} of a sequence of length {len}")]
    InsertionOutOfBounds {
        /// The offset of the insertion
        offset: usize,
        /// The length of the sequence at that point
        len: usize,
    },

    /// A removal of an element that is not in the sequence
    #[error("Element removed at offset {0} does not match the sequence")]
    ElementMismatch(usize),
}

impl<T> Default for ChangeScript<T> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
        }
    }
}

impl<T: PartialEq> ChangeScript<T> {
    /// Validate and order a list of changes.
    ///
    /// Offsets must be unique among removals and among insertions. Every
    /// association must point to a change of the opposite kind on an equal
    /// element, that points back.
    pub fn try_new(changes: impl IntoIterator<Item = Change<T>>) -> Result<Self, InvalidChangeScript> {
        let mut removals = BTreeMap::new();
        let mut insertions = BTreeMap::new();
        for change in changes {
            let offset = change.offset();
            if change.is_remove() {
                if removals.insert(offset, change).is_some() {
                    return Err(InvalidChangeScript::DuplicateRemoval(offset));
                }
            } else if insertions.insert(offset, change).is_some() {
                return Err(InvalidChangeScript::DuplicateInsertion(offset));
            }
        }

        for (this, other) in [(&removals, &insertions), (&insertions, &removals)] {
            for change in this.values() {
                let Some(associated_with) = change.associated_with() else {
                    continue;
                };
                let offset = change.offset();
                let partner = other
                    .get(&associated_with)
                    .filter(|partner| partner.associated_with() == Some(offset))
                    .ok_or(InvalidChangeScript::DanglingAssociation {
                        offset,
                        associated_with,
                    })?;
                if partner.element() != change.element() {
                    return Err(InvalidChangeScript::MismatchedAssociation {
                        offset,
                        associated_with,
                    });
                }
            }
        }

        let changes = removals.into_values().rev().chain(insertions.into_values()).collect();
        Ok(Self { changes })
    }
}

impl<T: PartialEq + Clone> ChangeScript<T> {
    /// The changes turning `start` into `end`.
    ///
    /// The script keeps the longest common subsequence of both sequences in
    /// place. No moves are inferred, see [`ChangeScript::inferring_moves`].
    pub fn between(start: &[T], end: &[T]) -> Self {
        let mut changes = lcs::edit_script(start, end);
        let insertions_start = changes.partition_point(Change::is_remove);
        changes[..insertions_start].reverse();
        Self { changes }
    }

    /// The same script, with removals and insertions of equal elements paired
    /// up as moves.
    ///
    /// Each unassociated removal, by ascending offset, is paired with the
    /// first unassociated insertion of an equal element.
    pub fn inferring_moves(&self) -> Self {
        let (mut removals, mut insertions): (Vec<_>, Vec<_>) =
            self.changes.iter().cloned().partition(Change::is_remove);
        removals.reverse();

        for removal in removals.iter_mut() {
            if removal.associated_with().is_some() {
                continue;
            }
            let partner = insertions.iter_mut().find(|insertion| {
                insertion.associated_with().is_none() && insertion.element() == removal.element()
            });
            if let Some(insertion) = partner {
                let (removal_offset, insertion_offset) = (removal.offset(), insertion.offset());
                *insertion = insertion.clone().associated(removal_offset);
                *removal = removal.clone().associated(insertion_offset);
            }
        }

        removals.reverse();
        removals.extend(insertions);
        Self { changes: removals }
    }

    /// Apply the script to `start`.
    ///
    /// Fails if the script does not fit `start`: an offset is out of bounds,
    /// or a removed element differs from the one in `start`.
    pub fn apply(&self, start: &[T]) -> Result<Vec<T>, ApplyError> {
        let mut elements = start.to_vec();
        for change in &self.changes {
            let offset = change.offset();
            let len = elements.len();
            match change {
                Change::Remove { element, .. } => {
                    if offset >= len {
                        return Err(ApplyError::RemovalOutOfBounds { offset, len });
                    }
                    if &elements[offset] != element {
                        return Err(ApplyError::ElementMismatch(offset));
                    }
                    elements.remove(offset);
                }
                Change::Insert { element, .. } => {
                    if offset > len {
                        return Err(ApplyError::InsertionOutOfBounds { offset, len });
                    }
                    elements.insert(offset, element.clone());
                }
            }
        }
        Ok(elements)
    }
}

impl<T> ChangeScript<T> {
    /// The script undoing this one.
    ///
    /// Removals become insertions and vice versa, at the same offsets:
    /// removal offsets refer to the old sequence, which is the new sequence of
    /// the inverse.
    pub fn inverse(&self) -> Self
    where
        T: Clone,
    {
        let (mut insertions, mut removals): (Vec<_>, Vec<_>) = self
            .changes
            .iter()
            .cloned()
            .map(Change::inverted)
            .partition(Change::is_insert);
        insertions.reverse();
        removals.reverse();
        removals.extend(insertions);
        Self { changes: removals }
    }

    /// All changes, in the order they are applied.
    pub fn changes(&self) -> &[Change<T>] {
        &self.changes
    }

    /// The removals, by descending offset.
    pub fn removals(&self) -> impl Iterator<Item = &Change<T>> {
        self.changes.iter().filter(|change| change.is_remove())
    }

    /// The insertions, by ascending offset.
    pub fn insertions(&self) -> impl Iterator<Item = &Change<T>> {
        self.changes.iter().filter(|change| change.is_insert())
    }

    /// The number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the script changes nothing.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<T> IntoIterator for ChangeScript<T> {
    type Item = Change<T>;
    type IntoIter = std::vec::IntoIter<Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// The changes turning `start` into `end`.
///
/// Shorthand for [`ChangeScript::between`].
pub fn difference<T: PartialEq + Clone>(start: &[T], end: &[T]) -> ChangeScript<T> {
    ChangeScript::between(start, end)
}
