//! Single-flight view cache.
//!
//! # Responsibilities
//! - Invoke a route's loader at most once while it succeeds
//! - Attach concurrent callers to the in-flight load
//! - Drop failed entries so the next navigation retries
//!
//! # Design Decisions
//! - Entries are shared futures, so an in-flight load and a finished one
//!   look the same to callers
//! - Map guards are released before awaiting
//! - A failure only evicts the entry it came from (`Shared::ptr_eq`)

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::observability::metrics;
use crate::routing::table::RouteId;
use crate::view::types::{LoadFailure, View};

type SharedLoad = Shared<BoxFuture<'static, Result<View, LoadFailure>>>;

/// Memoized view loads keyed by route identity.
#[derive(Default)]
pub struct ViewCache {
    entries: DashMap<RouteId, SharedLoad>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for `id`, starting `load` only if no entry exists.
    pub async fn get_or_load<F>(&self, id: RouteId, load: F) -> Result<View, LoadFailure>
    where
        F: FnOnce() -> BoxFuture<'static, Result<View, LoadFailure>>,
    {
        let shared = match self.entries.entry(id) {
            Entry::Occupied(entry) => {
                tracing::trace!(route = %id, "Attaching to cached view load");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                tracing::debug!(route = %id, "Starting view load");
                let shared = load().shared();
                entry.insert(shared.clone());
                shared
            }
        };

        let result = shared.clone().await;

        match &result {
            Ok(_) => metrics::record_view_load("ok"),
            Err(e) => {
                metrics::record_view_load("error");
                // Only the first waiter to get here evicts, and never a newer retry.
                if self
                    .entries
                    .remove_if(&id, |_, current| current.ptr_eq(&shared))
                    .is_some()
                {
                    tracing::warn!(
                        route = %id,
                        error = %e,
                        "View load failed, cache entry cleared"
                    );
                }
            }
        }
        metrics::record_view_cache_size(self.entries.len());

        result
    }

    /// True once the view for `id` has finished loading successfully.
    pub fn is_loaded(&self, id: RouteId) -> bool {
        self.entries
            .get(&id)
            .map(|entry| matches!(entry.value().peek(), Some(Ok(_))))
            .unwrap_or(false)
    }

    /// True while a load for `id` is started but not finished.
    pub fn is_pending(&self, id: RouteId) -> bool {
        self.entries
            .get(&id)
            .map(|entry| entry.value().peek().is_none())
            .unwrap_or(false)
    }

    /// Number of entries, loaded or in flight.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry. Views already handed out stay valid.
    pub fn clear(&self) {
        self.entries.clear();
        metrics::record_view_cache_size(0);
    }
}
