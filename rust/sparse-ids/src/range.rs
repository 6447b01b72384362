//! No-skip ranges and the merge-eligibility predicate over them.

use std::fmt;

use crate::Id;

/// A closed interval `[from, till]` of the identifier space that is known to
/// be complete: every identifier existing between `from` and `till` is
/// accounted for by whoever holds the range.
///
/// `from == till` describes an empty range that carries no knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdRange {
    pub from: Id,
    pub till: Id,
}

impl IdRange {
    /// # Panics
    ///
    /// Panics if `from > till`.
    #[inline]
    pub fn new(from: Id, till: Id) -> IdRange {
        assert!(from <= till, "invalid range [{from}, {till}]");
        IdRange { from, till }
    }

    /// Returns `true` if the range carries no knowledge (`from == till`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from == self.till
    }

    #[inline]
    pub fn contains(&self, id: Id) -> bool {
        self.from <= id && id <= self.till
    }

    /// Returns `true` if the two ranges overlap or touch, i.e. no identifier
    /// can hide between them and their contents may be merged.
    #[inline]
    pub fn can_merge(&self, other: &IdRange) -> bool {
        self.from <= other.till && other.from <= self.till
    }

    /// The smallest range covering both `self` and `other`.
    #[inline]
    pub fn envelope(&self, other: &IdRange) -> IdRange {
        IdRange {
            from: self.from.min(other.from),
            till: self.till.max(other.till),
        }
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.till)
    }
}

impl From<std::ops::RangeInclusive<Id>> for IdRange {
    fn from(range: std::ops::RangeInclusive<Id>) -> Self {
        IdRange::new(*range.start(), *range.end())
    }
}
