//! # Command Layer
//!
//! The business logic of the storage core, split per operation family:
//!
//! - [`save`]: the version chain manager — append-only saves for
//!   snippets, replace-in-place saves for large files.
//! - [`query`]: the latest-view resolver — `latest`, `list`, `search`
//!   and `by_tag`, all read-through cached.
//! - [`trash`]: the recycle bin — soft delete, deleted-items listing,
//!   restore and purge.
//!
//! Commands are free functions generic over
//! [`SnippetStore`](crate::store::SnippetStore) and
//! [`SnippetCache`], return `Result`, and never touch I/O beyond their
//! collaborators. The API facade on top converts errors into the safe
//! defaults callers see; tests drive commands directly against the
//! in-memory store.
//!
//! ## Cache discipline
//!
//! The helpers below are the only way commands talk to the cache.
//! Cache errors never propagate: a failed read is a miss, a failed
//! write or invalidation is logged and dropped. The store is the
//! source of truth.

use crate::cache::SnippetCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub mod query;
pub mod save;
pub mod trash;

/// Cache lookup that degrades every failure to a miss.
pub(crate) fn cache_read<T: DeserializeOwned, C: SnippetCache>(cache: &C, key: &str) -> Option<T> {
    match cache.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(key, %err, "dropping undecodable cache entry");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::debug!(key, %err, "cache read failed, treating as miss");
            None
        }
    }
}

/// Cache population that swallows failures.
pub(crate) fn cache_write<T: Serialize, C: SnippetCache>(
    cache: &C,
    key: &str,
    value: &T,
    ttl: Duration,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(key, %err, "skipping cache write, value not serializable");
            return;
        }
    };
    if let Err(err) = cache.set(key, &raw, ttl) {
        tracing::debug!(key, %err, "cache write failed");
    }
}

/// Wipes every cached view for the owner after a mutation. A single
/// save changes `latest`, `list`, `search` and `by_tag` at once, so
/// invalidation is always user-wide.
pub(crate) fn invalidate_owner<C: SnippetCache>(cache: &C, owner_id: i64) {
    match cache.invalidate_user(owner_id) {
        Ok(count) => tracing::debug!(owner_id, count, "invalidated cached views"),
        Err(err) => tracing::debug!(owner_id, %err, "cache invalidation failed"),
    }
}

/// Upper bound on rows pulled from each collection before the deleted
/// items of both are merged and sorted in memory.
pub(crate) const MERGE_FETCH_CAP: usize = 500;

// Re-exported so integration tests and embedding callers can reach the
// store/cache generics without spelling out module paths.
pub use trash::DeletedEntry;
