//! A no-skip range together with the exact set of identifiers inside it.

use itertools::Itertools;

use crate::{Id, IdRange};

/// One contiguous, fully known part of the identifier space.
///
/// Invariants:
/// - `ids` is sorted in ascending order and free of duplicates.
/// - Every element of `ids` lies within `range`.
/// - `ids` is exhaustive: any identifier existing within `range` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    ids: Vec<Id>,
    range: IdRange,
}

impl Slice {
    /// Creates a slice from identifiers that are already sorted and
    /// deduplicated.
    pub(crate) fn new(ids: Vec<Id>, range: IdRange) -> Slice {
        debug_assert!(is_strictly_sorted(&ids));
        debug_assert!(ids.iter().all(|&id| range.contains(id)));
        Slice { ids, range }
    }

    /// Creates a slice from identifiers in arbitrary order, possibly repeated.
    pub fn from_ids(ids: impl IntoIterator<Item = Id>, range: IdRange) -> Slice {
        Slice::new(normalize_ids(ids), range)
    }

    #[inline]
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    #[inline]
    pub fn range(&self) -> IdRange {
        self.range
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: Id) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Unions `ids` (sorted, deduplicated) into this slice and widens the range
    /// to the envelope of both ranges.
    ///
    /// # Panics
    ///
    /// Panics if `range` neither overlaps nor touches this slice's range.
    pub fn merge(&mut self, ids: &[Id], range: IdRange) {
        assert!(
            self.range.can_merge(&range),
            "merging disjoint ranges {} and {range}",
            self.range
        );
        debug_assert!(is_strictly_sorted(ids));

        if !ids.is_empty() {
            let tail_only = self.ids.last().is_none_or(|&last| last < ids[0]);
            if tail_only {
                self.ids.extend_from_slice(ids);
            } else {
                self.ids = self
                    .ids
                    .iter()
                    .copied()
                    .merge(ids.iter().copied())
                    .dedup()
                    .collect();
            }
        }
        self.range = self.range.envelope(&range);
    }

    /// Folds `other` into this slice.
    pub(crate) fn absorb(&mut self, other: Slice) {
        self.merge(&other.ids, other.range);
    }

    /// Removes `id` from the set, returning whether it was present.
    pub(crate) fn remove(&mut self, id: Id) -> bool {
        match self.ids.binary_search(&id) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Position of the first identifier not less than `id`.
    #[inline]
    pub(crate) fn lower_bound(&self, id: Id) -> usize {
        self.ids.partition_point(|&existing| existing < id)
    }
}

/// Sorts and deduplicates a batch of incoming identifiers.
pub(crate) fn normalize_ids(ids: impl IntoIterator<Item = Id>) -> Vec<Id> {
    let mut ids = ids.into_iter().collect::<Vec<_>>();
    ids.sort_unstable();
    ids.dedup();
    ids
}

pub(crate) fn is_strictly_sorted(ids: &[Id]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}
