//! Always-miss cache, used when no cache backend is configured.
//!
//! Reads miss, writes are dropped, invalidation removes nothing. The
//! store serves every read, which is slower but always correct.

use super::SnippetCache;
use crate::error::Result;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

impl SnippetCache for NullCache {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    fn invalidate_user(&self, _owner_id: i64) -> Result<usize> {
        Ok(0)
    }
}
