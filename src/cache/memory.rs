//! In-process cache with per-entry expiry.
//!
//! Entries are dropped lazily: an expired entry is removed when the
//! lookup touches it. There is no background sweeper; a stale entry
//! costs memory until read, which is acceptable for the short TTLs
//! (seconds to minutes) this cache is used with.

use super::SnippetCache;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries, for tests and diagnostics.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .unwrap()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnippetCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
                Some(_) => {} // expired, fall through to remove
            }
        }
        self.entries.write().unwrap().remove(key);
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().unwrap().insert(key.to_string(), entry);
        Ok(())
    }

    fn invalidate_user(&self, owner_id: i64) -> Result<usize> {
        let prefix = super::keys::user_prefix(owner_id);
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(&prefix));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::keys;

    #[test]
    fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let cache = MemoryCache::new();
        assert!(cache.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_millis(5)).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("k").unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_user_removes_all_operation_prefixes() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(&keys::latest(1, "a.py"), "x", ttl).unwrap();
        cache.set(&keys::list(1, 10), "x", ttl).unwrap();
        cache.set(&keys::by_tag(1, "k", 1, 10), "x", ttl).unwrap();
        cache.set(&keys::list(2, 10), "x", ttl).unwrap();

        let removed = cache.invalidate_user(1).unwrap();
        assert_eq!(removed, 3);

        // Other owners are untouched.
        assert!(cache.get(&keys::list(2, 10)).unwrap().is_some());
        assert!(cache.get(&keys::list(1, 10)).unwrap().is_none());
    }

    #[test]
    fn test_invalidate_does_not_bleed_into_longer_owner_ids() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(&keys::list(1, 10), "x", ttl).unwrap();
        cache.set(&keys::list(12, 10), "x", ttl).unwrap();

        cache.invalidate_user(1).unwrap();
        assert!(cache.get(&keys::list(12, 10)).unwrap().is_some());
    }

    #[test]
    fn test_overwrite_refreshes_value() {
        let cache = MemoryCache::new();
        cache.set("k", "old", Duration::from_secs(60)).unwrap();
        cache.set("k", "new", Duration::from_secs(60)).unwrap();
        assert_eq!(cache.get("k").unwrap().as_deref(), Some("new"));
    }
}
