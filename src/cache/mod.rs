//! # Cache Port
//!
//! Read operations are wrapped by a key-value cache with per-operation
//! TTLs; every mutation invalidates all cached keys for the affected
//! owner. The cache is best-effort: any error on the cache path is
//! treated as a miss (reads) or ignored (writes), and the store stays
//! the source of truth. Clearing the cache at any time is safe.
//!
//! ## Key construction
//!
//! All keys are built here, never at call sites, so the invalidation
//! scope stays auditable:
//!
//! ```text
//! sv:{owner_id}:{op}:{args...}
//! ```
//!
//! Because the owner id is the second segment, user-scoped bulk
//! invalidation is a prefix match on `sv:{owner_id}:` across every
//! operation prefix. A save must wipe `latest`, `list`, `search` and
//! `by_tag` entries at once, since one new version changes all four
//! views.

use crate::error::Result;
use std::time::Duration;

pub mod memory;
pub mod null;

/// Key-value cache port with user-scoped bulk invalidation.
///
/// Values are serialized JSON; the commands layer owns (de)serialization
/// so implementations stay dumb byte shufflers.
pub trait SnippetCache {
    /// Look up a key. `Ok(None)` is a miss.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value with an expiry.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete every key belonging to the owner, across all operation
    /// prefixes. Returns the number of keys removed.
    fn invalidate_user(&self, owner_id: i64) -> Result<usize>;
}

/// Key builders, one per cached call shape.
pub mod keys {
    /// Prefix shared by every key the owner's invalidation must reach.
    pub fn user_prefix(owner_id: i64) -> String {
        format!("sv:{}:", owner_id)
    }

    pub fn latest(owner_id: i64, name: &str) -> String {
        format!("sv:{}:latest:{}", owner_id, name)
    }

    pub fn list(owner_id: i64, limit: usize) -> String {
        format!("sv:{}:list:{}", owner_id, limit)
    }

    pub fn search(
        owner_id: i64,
        query: &str,
        language: Option<&str>,
        tags: &[String],
        limit: usize,
    ) -> String {
        format!(
            "sv:{}:search:{}:{}:{}:{}",
            owner_id,
            query,
            language.unwrap_or(""),
            encode_list(tags),
            limit
        )
    }

    /// Length-prefixes each element so a joined list decodes to exactly
    /// one input: `["a", "b"]` and `["a,b"]` must not share a key.
    fn encode_list(items: &[String]) -> String {
        items
            .iter()
            .map(|item| format!("{}.{}", item.len(), item))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn by_tag(owner_id: i64, tag: &str, page: usize, per_page: usize) -> String {
        format!("sv:{}:tag:{}:{}:{}", owner_id, tag, page, per_page)
    }
}
