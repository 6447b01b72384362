//! Partially loaded index over an ordered identifier space.
//!
//! Long histories (message ids in a chat, offsets in a log) are usually loaded
//! piece by piece. [`SparseIdsList`] tracks which ranges of the identifier space
//! have been loaded completely and, within each such range, the exact set of
//! identifiers that exist. It answers windowed queries around an anchor id,
//! reporting how many identifiers were skipped on either side whenever that can
//! be proven.
//!
//! # Key Types
//!
//! - [`SparseIdsList`] - The index: mutation entry points, total count, queries
//! - [`IdRange`] - A closed "no-skip" interval and its merge-eligibility test
//! - [`Slice`] - A no-skip range with its sorted set of ids
//! - [`SliceList`] - Maximally merged, sorted list of slices
//! - [`Query`] / [`QueryResult`] - Window request and answer
//! - [`SliceUpdate`] - Notification delivered to observers after each addition
//!
//! # Example
//!
//! ```
//! use sparse_ids::{IdRange, Query, SparseIdsList};
//!
//! let mut list = SparseIdsList::new();
//! list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(3));
//!
//! let result = list.query(&Query::around(7, 1, 1));
//! assert_eq!(result.ids, vec![5, 7, 9]);
//! assert_eq!(result.skipped_before, Some(0));
//! assert_eq!(result.skipped_after, Some(0));
//! assert_eq!(result.count, Some(3));
//! ```

pub mod domain;
pub mod error;
pub mod observers;
pub mod query;
pub mod range;
pub mod result;
pub mod slice;
pub mod slice_list;
pub mod sparse_ids_list;
#[cfg(test)]
mod tests;

pub use domain::{DEFAULT_MAX_ID, Id, IdDomain};
pub use observers::{ObserverId, SliceUpdate};
pub use query::{Query, QueryResult};
pub use range::IdRange;
pub use result::Result;
pub use slice::Slice;
pub use slice_list::SliceList;
pub use sparse_ids_list::SparseIdsList;
