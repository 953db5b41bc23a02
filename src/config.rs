//! # Configuration
//!
//! Configuration is managed by [`confique`], loaded from a TOML file
//! and/or environment, with compiled defaults via `#[config(default)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `trash_ttl_days` | `7` | Days a soft-deleted row stays restorable |
//! | `normalize_content` | `true` | Strip control characters on save |
//! | `persistence` | `true` | When false, the null store is selected |
//! | `latest_cache_ttl_secs` | `30` | Cache TTL for `latest` lookups |
//! | `list_cache_ttl_secs` | `60` | Cache TTL for `list` |
//! | `search_cache_ttl_secs` | `45` | Cache TTL for `search` |
//! | `tag_cache_ttl_secs` | `120` | Cache TTL for `by_tag` pages |

use std::time::Duration;

use confique::Config;
use serde::{Deserialize, Serialize};

/// Configuration for the snippet storage core, stored in `snipvault.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnipConfig {
    /// How long soft-deleted rows remain in the recycle bin before the
    /// store expunges them.
    #[config(default = 7)]
    pub trash_ttl_days: u32,

    /// Strip disallowed control characters from content on save.
    #[config(default = true)]
    pub normalize_content: bool,

    /// When false, writes are dropped and reads are empty (null store).
    #[config(default = true)]
    pub persistence: bool,

    #[config(default = 30)]
    pub latest_cache_ttl_secs: u64,

    #[config(default = 60)]
    pub list_cache_ttl_secs: u64,

    #[config(default = 45)]
    pub search_cache_ttl_secs: u64,

    #[config(default = 120)]
    pub tag_cache_ttl_secs: u64,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            trash_ttl_days: 7,
            normalize_content: true,
            persistence: true,
            latest_cache_ttl_secs: 30,
            list_cache_ttl_secs: 60,
            search_cache_ttl_secs: 45,
            tag_cache_ttl_secs: 120,
        }
    }
}

impl SnipConfig {
    /// Recycle-bin retention as a chrono duration.
    pub fn trash_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.trash_ttl_days))
    }

    pub fn latest_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.latest_cache_ttl_secs)
    }

    pub fn list_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_ttl_secs)
    }

    pub fn search_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.search_cache_ttl_secs)
    }

    pub fn tag_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tag_cache_ttl_secs)
    }
}
