//! The partially loaded index itself: mutation entry points, total count
//! reconciliation and queries.

use crate::{
    Id, IdDomain, IdRange, Result, Slice, SliceList,
    error::Error,
    observers::{ObserverId, Observers, SliceUpdate},
    query::{Query, QueryResult, window_from_slice},
    slice::normalize_ids,
    slice_list::Insertion,
    verify_arg,
};

/// A growing, partial view over an ordered identifier space.
///
/// The list remembers which ranges of the space are fully known ("no-skip")
/// and, within each, exactly which identifiers exist. Knowledge only grows:
/// batches may arrive at either end or fill a gap in the middle, and whenever
/// two known ranges come to touch they are merged. Alongside it keeps the best
/// known total number of identifiers in the whole domain, if any.
///
/// Every `add_*` call notifies the subscribed observers synchronously, after
/// the state is updated. [`remove_one`](Self::remove_one) and
/// [`remove_all`](Self::remove_all) do not notify: callers that invalidate or
/// delete items are expected to re-run their queries.
///
/// Mutations expect consistent input and treat contract violations (an
/// explicit count combined with an increment, a non-empty batch for an empty
/// range) as bugs and panic. The `try_add_*` variants validate their input
/// first and report problems as [`Error`]s instead.
#[derive(Debug, Default)]
pub struct SparseIdsList {
    domain: IdDomain,
    slices: SliceList,
    count: Option<usize>,
    observers: Observers,
}

impl SparseIdsList {
    /// Creates an empty list over the default domain.
    pub fn new() -> SparseIdsList {
        SparseIdsList::with_domain(IdDomain::default())
    }

    /// Creates an empty list over `domain`: no slices, unknown count.
    pub fn with_domain(domain: IdDomain) -> SparseIdsList {
        SparseIdsList {
            domain,
            slices: SliceList::new(),
            count: None,
            observers: Observers::new(),
        }
    }

    #[inline]
    pub fn domain(&self) -> IdDomain {
        self.domain
    }

    #[inline]
    pub fn slices(&self) -> &[Slice] {
        self.slices.as_slice()
    }

    /// Best known total number of identifiers in the domain.
    #[inline]
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Returns `true` if `id` lies within some known no-skip range.
    pub fn is_loaded(&self, id: Id) -> bool {
        self.slices.find(id).is_some()
    }

    /// Returns `true` if `id` is known to exist.
    pub fn contains(&self, id: Id) -> bool {
        self.slices
            .find(id)
            .and_then(|index| self.slices.get(index))
            .is_some_and(|slice| slice.contains(id))
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SliceUpdate<'_>) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Records a freshly created identifier: it exists and nothing after it
    /// does. A known total count grows by one if `id` was not known yet.
    pub fn add_new(&mut self, id: Id) {
        let range = self.domain.tail_from(id);
        self.add_range(vec![id], range, None, true);
    }

    /// Records that `id` exists and that `range` around it is fully known.
    /// The total count is left as is.
    pub fn add_existing(&mut self, id: Id, range: IdRange) {
        self.add_range(vec![id], range, None, false);
    }

    /// Records a fetched batch: `ids` are all the identifiers existing within
    /// `range`. A supplied `count` replaces the total count.
    pub fn add_slice(
        &mut self,
        ids: impl IntoIterator<Item = Id>,
        range: IdRange,
        count: Option<usize>,
    ) {
        self.add_range(normalize_ids(ids), range, count, false);
    }

    /// Validating counterpart of [`add_new`](Self::add_new).
    pub fn try_add_new(&mut self, id: Id) -> Result<()> {
        verify_arg!(id, id < self.domain.max());
        self.add_new(id);
        Ok(())
    }

    /// Validating counterpart of [`add_existing`](Self::add_existing).
    pub fn try_add_existing(&mut self, id: Id, range: IdRange) -> Result<()> {
        self.verify_batch(&[id], range)?;
        self.add_existing(id, range);
        Ok(())
    }

    /// Validating counterpart of [`add_slice`](Self::add_slice).
    pub fn try_add_slice(
        &mut self,
        ids: impl IntoIterator<Item = Id>,
        range: IdRange,
        count: Option<usize>,
    ) -> Result<()> {
        let ids = normalize_ids(ids);
        self.verify_batch(&ids, range)?;
        self.add_range(ids, range, count, false);
        Ok(())
    }

    /// Forgets `id`, which the caller knows to have existed.
    ///
    /// The id is dropped from its slice if loaded. A known total count is
    /// decremented whether or not the id was loaded, since it existed
    /// somewhere in the domain.
    pub fn remove_one(&mut self, id: Id) {
        let removed = self.slices.remove(id);
        if let Some(count) = &mut self.count {
            *count = count.saturating_sub(1);
        }
        log::trace!("remove_one({id}): loaded={removed}, count={:?}", self.count);
    }

    /// Marks the whole domain as known to be empty.
    pub fn remove_all(&mut self) {
        self.slices
            .reset(Slice::new(Vec::new(), self.domain.full_range()));
        self.count = Some(0);
        log::debug!("remove_all: domain {} cleared", self.domain.full_range());
    }

    /// Computes the window described by `query` against the current state.
    ///
    /// Falls back to a count-only result when the anchor is absent or not
    /// within any known range, and to an entirely unknown result when the
    /// total count is unknown as well.
    pub fn query(&self, query: &Query) -> QueryResult {
        let slice = query
            .around_id
            .and_then(|id| self.slices.find(id))
            .and_then(|index| self.slices.get(index));
        match slice {
            Some(slice) => window_from_slice(query, slice, &self.domain, self.count),
            None => QueryResult::count_only(self.count),
        }
    }

    /// Verifies the slice invariants.
    ///
    /// # Panics
    ///
    /// Panics if the slices are unsorted, overlap or touch, or if a slice
    /// holds an id outside of its range.
    pub fn verify(&self) {
        self.slices.verify();
        for slice in self.slices.as_slice() {
            assert!(slice.range().till <= self.domain.max());
        }
    }

    fn verify_batch(&self, ids: &[Id], range: IdRange) -> Result<()> {
        verify_arg!(range, range.from <= range.till);
        if range.till > self.domain.max() {
            return Err(Error::range_out_of_domain(range, self.domain.max()));
        }
        verify_arg!(ids, !range.is_empty() || ids.is_empty());
        if let Some(&id) = ids.iter().find(|&&id| !range.contains(id)) {
            return Err(Error::id_out_of_range(id, range));
        }
        Ok(())
    }

    fn add_range(
        &mut self,
        ids: Vec<Id>,
        range: IdRange,
        count: Option<usize>,
        increment_count: bool,
    ) {
        assert!(
            count.is_none() || !increment_count,
            "explicit count combined with increment"
        );
        assert!(range.from <= range.till, "invalid range {range}");
        debug_assert!(ids.iter().all(|&id| range.contains(id)));

        let Insertion { index, added } = self.slices.insert(&ids, range);
        if count.is_some() {
            self.count = count;
        } else if increment_count
            && added > 0
            && let Some(count) = &mut self.count
        {
            *count += added;
        }
        if let [only] = self.slices.as_slice()
            && only.range() == self.domain.full_range()
        {
            self.count = Some(only.len());
        }
        log::trace!(
            "add_range({range}): {} ids, {added} new, count={:?}",
            ids.len(),
            self.count
        );

        let update = match index.and_then(|index| self.slices.get(index)) {
            Some(slice) => SliceUpdate {
                ids: slice.ids(),
                range: slice.range(),
                count: self.count,
            },
            None => SliceUpdate {
                ids: &[],
                range,
                count: self.count,
            },
        };
        self.observers.notify(&update);
    }
}
