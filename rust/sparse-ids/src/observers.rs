//! Synchronous multicast of slice change notifications.

use crate::{Id, IdRange};

/// Describes the slice touched by a mutation and the resulting total count.
///
/// `ids` borrows the live slice contents and is valid only while the
/// notification is being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceUpdate<'a> {
    pub ids: &'a [Id],
    pub range: IdRange,
    pub count: Option<usize>,
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&SliceUpdate<'_>)>;

/// Registry of update callbacks, invoked in registration order.
#[derive(Default)]
pub struct Observers {
    callbacks: Vec<(ObserverId, Callback)>,
    next_id: u64,
}

impl Observers {
    pub fn new() -> Observers {
        Observers::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SliceUpdate<'_>) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered callback. Returns `false` if `id` is
    /// unknown or was already removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        match self.callbacks.iter().position(|(existing, _)| *existing == id) {
            Some(pos) => {
                self.callbacks.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify(&mut self, update: &SliceUpdate<'_>) {
        for (_, callback) in &mut self.callbacks {
            callback(update);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}
