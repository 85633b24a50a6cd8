//! Client-side cache for the task collection.
//!
//! # Design
//! The cached list is never authoritative. Mutations do not edit it in
//! place; they call `invalidate`, and the next read refetches the whole
//! collection from the server. Client and server can therefore diverge for
//! at most one round trip. Stale data is kept around (not dropped) so a
//! view can keep rendering the last known list while a refetch is pending.

use crate::types::Task;

/// Cached task collection with a staleness flag.
///
/// Starts stale and empty; `store` makes it fresh, `invalidate` marks it
/// stale without discarding the data.
#[derive(Debug)]
pub struct ListCache {
    tasks: Option<Vec<Task>>,
    stale: bool,
}

impl ListCache {
    pub fn new() -> Self {
        Self {
            tasks: None,
            stale: true,
        }
    }

    /// Fresh data, if any. Returns `None` when the cache has never been
    /// filled or has been invalidated since the last `store`.
    pub fn get(&self) -> Option<&[Task]> {
        if self.stale {
            return None;
        }
        self.tasks.as_deref()
    }

    /// The last stored list regardless of staleness. Used to keep rendering
    /// while a refetch is in flight.
    pub fn last_known(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Replace the cached collection with a fresh fetch result.
    pub fn store(&mut self, tasks: Vec<Task>) {
        self.tasks = Some(tasks);
        self.stale = false;
    }

    /// Mark the collection stale, forcing the next read to refetch. The
    /// stored data is retained for `last_known`.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::new()
    }
}
