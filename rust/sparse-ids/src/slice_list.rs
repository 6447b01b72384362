//! Ordered collection of disjoint slices and the insertion algorithm that keeps
//! it maximally merged.

use std::ops::Range;

use crate::{Id, IdRange, Slice};

/// Sorted list of [`Slice`]s.
///
/// Invariant (maximal merge): no two stored slices overlap or touch. For
/// consecutive slices `a` and `b` this means `a.range().till < b.range().from`.
///
/// Slices are addressed by index and never referenced across mutations, so
/// inserting or erasing is free to reallocate the underlying `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceList {
    slices: Vec<Slice>,
}

/// Outcome of [`SliceList::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Index of the slice that received the batch, `None` when the range was
    /// empty and nothing was touched.
    pub index: Option<usize>,
    /// How many identifiers were not known before.
    pub added: usize,
}

impl SliceList {
    pub fn new() -> SliceList {
        SliceList { slices: Vec::new() }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Slice] {
        &self.slices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    /// Replaces all slices with a single one.
    pub fn reset(&mut self, slice: Slice) {
        self.slices.clear();
        self.slices.push(slice);
    }

    /// Index of the slice whose range contains `id`.
    pub fn find(&self, id: Id) -> Option<usize> {
        let index = self.slices.partition_point(|slice| slice.range().till < id);
        self.slices
            .get(index)
            .filter(|slice| slice.range().from <= id)
            .map(|_| index)
    }

    /// Block of stored slices that are merge-eligible with `range`.
    ///
    /// Starts at the first slice with `till >= range.from` and ends before the
    /// first slice with `from > range.till`. Both bounds are found by binary
    /// search; the block is empty when `range` falls into a gap.
    pub fn mergeable_with(&self, range: IdRange) -> Range<usize> {
        let start = self
            .slices
            .partition_point(|slice| slice.range().till < range.from);
        let end = self
            .slices
            .partition_point(|slice| slice.range().from <= range.till);
        start..end
    }

    /// Adds a batch of sorted, deduplicated `ids` known under the no-skip
    /// `range`.
    ///
    /// Every stored slice that touches `range` is united with the batch into a
    /// single slice, located at the position of the leftmost of them. If none
    /// touches it, a new slice is inserted at its sorted position.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty but `ids` is not.
    pub fn insert(&mut self, ids: &[Id], range: IdRange) -> Insertion {
        assert!(
            !range.is_empty() || ids.is_empty(),
            "non-empty batch for empty range {range}"
        );
        if range.is_empty() {
            return Insertion {
                index: None,
                added: 0,
            };
        }

        let block = self.mergeable_with(range);
        let index = block.start;
        if block.is_empty() {
            self.slices.insert(index, Slice::new(ids.to_vec(), range));
            return Insertion {
                index: Some(index),
                added: ids.len(),
            };
        }

        let was = self.slices[index].len();
        self.slices[index].merge(ids, range);
        let absorbed = self
            .slices
            .drain(index + 1..block.end)
            .collect::<Vec<_>>();
        for slice in absorbed {
            self.slices[index].absorb(slice);
        }
        Insertion {
            index: Some(index),
            added: self.slices[index].len() - was,
        }
    }

    /// Removes `id` from the slice containing it. Returns whether it was found.
    pub fn remove(&mut self, id: Id) -> bool {
        match self.find(id) {
            Some(index) => self.slices[index].remove(id),
            None => false,
        }
    }

    /// Verifies the ordering and maximal-merge invariants.
    ///
    /// # Panics
    ///
    /// Panics if any slice is unsorted, holds an id outside its range, or
    /// touches its successor.
    pub fn verify(&self) {
        for slice in &self.slices {
            assert!(
                crate::slice::is_strictly_sorted(slice.ids()),
                "slice {} is not strictly sorted",
                slice.range()
            );
            for &id in slice.ids() {
                assert!(
                    slice.range().contains(id),
                    "id {id} outside of slice {}",
                    slice.range()
                );
            }
        }
        for pair in self.slices.windows(2) {
            assert!(
                !pair[0].range().can_merge(&pair[1].range()),
                "slices {} and {} must have been merged",
                pair[0].range(),
                pair[1].range()
            );
            assert!(pair[0].range().till < pair[1].range().from);
        }
    }
}
