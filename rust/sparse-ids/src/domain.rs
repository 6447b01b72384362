//! Bounds of the identifier space an index is built over.

use crate::IdRange;

/// An item identifier. Identifiers are totally ordered; `0` is the absolute
/// lower bound of every domain.
pub type Id = u64;

/// Default upper sentinel, strictly greater than any real identifier.
pub const DEFAULT_MAX_ID: Id = Id::MAX;

/// The identifier space `[0, max]` a [`SparseIdsList`](crate::SparseIdsList)
/// tracks.
///
/// `max` is a sentinel: no real identifier may equal it. A no-skip range ending
/// at `max` therefore guarantees that nothing newer than the range's last id
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdDomain {
    max: Id,
}

impl IdDomain {
    /// Lower sentinel shared by all domains.
    pub const MIN: Id = 0;

    /// Creates a domain with the given upper sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero, since the domain would hold no identifiers.
    pub fn new(max: Id) -> IdDomain {
        assert!(max > Self::MIN, "id domain upper bound must be positive");
        IdDomain { max }
    }

    #[inline]
    pub fn max(&self) -> Id {
        self.max
    }

    /// The range covering the entire domain, `[0, max]`.
    #[inline]
    pub fn full_range(&self) -> IdRange {
        IdRange::new(Self::MIN, self.max)
    }

    /// The no-skip range implied by a freshly created item: nothing exists
    /// after it, `[id, max]`.
    #[inline]
    pub fn tail_from(&self, id: Id) -> IdRange {
        IdRange::new(id, self.max)
    }

    /// Returns `true` if `range` starts at the absolute lower bound.
    #[inline]
    pub fn starts_at_min(&self, range: &IdRange) -> bool {
        range.from == Self::MIN
    }

    /// Returns `true` if `range` reaches the upper sentinel.
    #[inline]
    pub fn reaches_max(&self, range: &IdRange) -> bool {
        range.till == self.max
    }
}

impl Default for IdDomain {
    fn default() -> Self {
        IdDomain::new(DEFAULT_MAX_ID)
    }
}
