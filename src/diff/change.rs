/// A single insertion or removal of an element.
///
/// Removal offsets index into the sequence before the changes, insertion
/// offsets into the sequence after them. A removal and an insertion of equal
/// elements may be associated with each other, to describe the element as
/// moved: each then refers to the offset of the other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change<T> {
    /// `element` is inserted at `offset` of the new sequence.
    Insert {
        /// The position of the element in the new sequence.
        offset: usize,
        /// The inserted element.
        element: T,
        /// The offset of the associated removal, if any.
        associated_with: Option<usize>,
    },
    /// `element` is removed from `offset` of the old sequence.
    Remove {
        /// The position of the element in the old sequence.
        offset: usize,
        /// The removed element.
        element: T,
        /// The offset of the associated insertion, if any.
        associated_with: Option<usize>,
    },
}

impl<T> Change<T> {
    /// An unassociated insertion.
    pub fn insert(offset: usize, element: T) -> Self {
        Change::Insert {
            offset,
            element,
            associated_with: None,
        }
    }

    /// An unassociated removal.
    pub fn remove(offset: usize, element: T) -> Self {
        Change::Remove {
            offset,
            element,
            associated_with: None,
        }
    }

    /// The position of the change.
    pub fn offset(&self) -> usize {
        match self {
            Change::Insert { offset, .. } | Change::Remove { offset, .. } => *offset,
        }
    }

    /// The inserted or removed element.
    pub fn element(&self) -> &T {
        match self {
            Change::Insert { element, .. } | Change::Remove { element, .. } => element,
        }
    }

    /// The offset of the associated change of the opposite kind.
    pub fn associated_with(&self) -> Option<usize> {
        match self {
            Change::Insert {
                associated_with, ..
            }
            | Change::Remove {
                associated_with, ..
            } => *associated_with,
        }
    }

    /// Whether this is an insertion.
    pub fn is_insert(&self) -> bool {
        matches!(self, Change::Insert { .. })
    }

    /// Whether this is a removal.
    pub fn is_remove(&self) -> bool {
        matches!(self, Change::Remove { .. })
    }

    /// The same change, associated with the change at `offset`.
    pub fn associated(self, offset: usize) -> Self {
        self.with_association(Some(offset))
    }

    fn with_association(self, associated_with: Option<usize>) -> Self {
        match self {
            Change::Insert {
                offset, element, ..
            } => Change::Insert {
                offset,
                element,
                associated_with,
            },
            Change::Remove {
                offset, element, ..
            } => Change::Remove {
                offset,
                element,
                associated_with,
            },
        }
    }

    /// The change undoing this one: insertions become removals and vice
    /// versa, at the same offset.
    pub fn inverted(self) -> Self {
        match self {
            Change::Insert {
                offset,
                element,
                associated_with,
            } => Change::Remove {
                offset,
                element,
                associated_with,
            },
            Change::Remove {
                offset,
                element,
                associated_with,
            } => Change::Insert {
                offset,
                element,
                associated_with,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let change = Change::remove(3, 'x').associated(5);
        assert_eq!(change.offset(), 3);
        assert_eq!(change.element(), &'x');
        assert_eq!(change.associated_with(), Some(5));
        assert!(change.is_remove());

        let inverted = change.inverted();
        assert!(inverted.is_insert());
        assert_eq!(inverted.offset(), 3);
        assert_eq!(inverted.associated_with(), Some(5));
    }
}
