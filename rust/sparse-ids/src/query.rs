//! Windowed queries around an anchor identifier.

use crate::{Id, IdDomain, Slice};

/// Request for a window of identifiers around `around_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query {
    /// Anchor of the window. `None` asks only for the total count.
    pub around_id: Option<Id>,
    /// Maximum number of ids strictly before the anchor.
    pub limit_before: usize,
    /// Maximum number of ids strictly after the anchor. The anchor itself is
    /// returned in addition when present.
    pub limit_after: usize,
}

impl Query {
    pub fn around(id: Id, limit_before: usize, limit_after: usize) -> Query {
        Query {
            around_id: Some(id),
            limit_before,
            limit_after,
        }
    }

    pub fn count_only() -> Query {
        Query::default()
    }
}

/// A window of known identifiers plus what is known about the rest.
///
/// `None` means unknown, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub ids: Vec<Id>,
    pub skipped_before: Option<usize>,
    pub skipped_after: Option<usize>,
    pub count: Option<usize>,
}

impl QueryResult {
    pub(crate) fn count_only(count: Option<usize>) -> QueryResult {
        QueryResult {
            count,
            ..Default::default()
        }
    }
}

/// Cuts the window for `query` out of the slice that contains its anchor.
pub(crate) fn window_from_slice(
    query: &Query,
    slice: &Slice,
    domain: &IdDomain,
    count: Option<usize>,
) -> QueryResult {
    let ids = slice.ids();
    let position = query.around_id.map_or(0, |id| slice.lower_bound(id));
    let have_before = position;
    let have_equal_or_after = ids.len() - position;
    let before = have_before.min(query.limit_before);
    let equal_or_after = have_equal_or_after.min(query.limit_after.saturating_add(1));

    let mut result = QueryResult {
        ids: ids[position - before..position + equal_or_after].to_vec(),
        skipped_before: None,
        skipped_after: None,
        count,
    };
    if domain.starts_at_min(&slice.range()) {
        result.skipped_before = Some(have_before - before);
    }
    if domain.reaches_max(&slice.range()) {
        result.skipped_after = Some(have_equal_or_after - equal_or_after);
    }

    if let Some(count) = count {
        let window = result.ids.len();
        match (result.skipped_before, result.skipped_after) {
            (None, Some(after)) => {
                result.skipped_before = derive_skipped(count, after, window);
            }
            (Some(before), None) => {
                result.skipped_after = derive_skipped(count, before, window);
            }
            _ => {}
        }
    }
    result
}

fn derive_skipped(count: usize, known: usize, window: usize) -> Option<usize> {
    let derived = count.checked_sub(known).and_then(|rest| rest.checked_sub(window));
    if derived.is_none() {
        log::warn!(
            "total count {count} is below the {known} skipped and {window} loaded ids"
        );
    }
    derived
}
