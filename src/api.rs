//! # API Facade
//!
//! [`SnipVault`] is the single entry point the transport layer (chat
//! handlers, HTTP, whatever) talks to. It is a thin facade over the
//! command layer:
//!
//! - **Dispatches** to the command functions.
//! - **Normalizes inputs** (parses row-id strings, defaults).
//! - **Applies the propagation policy**: command errors are logged and
//!   converted to safe defaults (`false`, empty, `0`, `None`) so a
//!   store outage degrades instead of crashing the caller. The flip
//!   side is intentional: an empty result is not proof of "no data"
//!   while the store is down; the log line is the distinguishing
//!   signal.
//!
//! ## Generic over store and cache
//!
//! `SnipVault<S: SnippetStore, C: SnippetCache>` is constructed once at
//! startup with its collaborators injected:
//! - Production: `SnipVault<FileStore, MemoryCache>`
//! - Persistence disabled: `SnipVault<NullStore, _>`
//! - Tests: `SnipVault<MemoryStore, NullCache>`
//!
//! No global state, no hidden singletons; everything a method touches
//! arrives through the constructor.

use crate::cache::SnippetCache;
use crate::commands::{self, query, save, trash, DeletedEntry};
use crate::config::SnipConfig;
use crate::error::SnipError;
use crate::model::{SnippetMeta, SnippetRow};
use crate::store::SnippetStore;
use uuid::Uuid;

/// The storage core's public operation set.
pub struct SnipVault<S: SnippetStore, C: SnippetCache> {
    store: S,
    cache: C,
    config: SnipConfig,
}

impl<S: SnippetStore, C: SnippetCache> SnipVault<S, C> {
    pub fn new(store: S, cache: C, config: SnipConfig) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &SnipConfig {
        &self.config
    }

    /// Saves a new version of a snippet. Returns false on failure;
    /// a failed save is never reported as success.
    pub fn save(
        &self,
        owner_id: i64,
        name: &str,
        content: &str,
        language: &str,
        tags: &[String],
    ) -> bool {
        match save::run(
            &self.store,
            &self.cache,
            &self.config,
            owner_id,
            name,
            content,
            language,
            tags,
        ) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(owner_id, name, %err, "save failed");
                false
            }
        }
    }

    /// Saves a large file, replacing the live row for the name.
    pub fn save_file(&self, owner_id: i64, name: &str, content: &str, language: &str) -> bool {
        match save::run_file(
            &self.store,
            &self.cache,
            &self.config,
            owner_id,
            name,
            content,
            language,
        ) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(owner_id, name, %err, "file save failed");
                false
            }
        }
    }

    /// Latest active version of a snippet, or `None`.
    pub fn latest(&self, owner_id: i64, name: &str) -> Option<SnippetRow> {
        match query::latest(&self.store, &self.cache, &self.config, owner_id, name) {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(owner_id, name, %err, "latest lookup failed");
                None
            }
        }
    }

    /// Most recently updated snippets, one per name, newest first.
    pub fn list(&self, owner_id: i64, limit: usize) -> Vec<SnippetRow> {
        match query::list(&self.store, &self.cache, &self.config, owner_id, limit) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(owner_id, %err, "list failed");
                Vec::new()
            }
        }
    }

    /// Substring search over name, content and description.
    pub fn search(
        &self,
        owner_id: i64,
        query_text: &str,
        language: Option<&str>,
        tags: &[String],
        limit: usize,
    ) -> Vec<SnippetRow> {
        match query::search(
            &self.store,
            &self.cache,
            &self.config,
            owner_id,
            query_text,
            language,
            tags,
            limit,
        ) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(owner_id, query_text, %err, "search failed");
                Vec::new()
            }
        }
    }

    /// One page of snippets carrying a tag, plus the exact total.
    /// Out-of-range pages clamp, they never error.
    pub fn by_tag(
        &self,
        owner_id: i64,
        tag: &str,
        page: usize,
        per_page: usize,
    ) -> (Vec<SnippetMeta>, usize) {
        match query::by_tag(
            &self.store,
            &self.cache,
            &self.config,
            owner_id,
            tag,
            page,
            per_page,
        ) {
            Ok(result) => (result.items, result.total),
            Err(err) => {
                tracing::warn!(owner_id, tag, %err, "tag listing failed");
                (Vec::new(), 0)
            }
        }
    }

    /// Moves the named snippets (and large files) to the recycle bin.
    /// Returns how many rows were flipped.
    pub fn soft_delete(&self, owner_id: i64, names: &[String]) -> usize {
        match trash::soft_delete(&self.store, &self.cache, &self.config, owner_id, names) {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(owner_id, %err, "soft delete failed");
                0
            }
        }
    }

    /// One page of the recycle bin, most recently deleted first.
    pub fn list_deleted(
        &self,
        owner_id: i64,
        page: usize,
        per_page: usize,
    ) -> (Vec<DeletedEntry>, usize) {
        match trash::list_deleted(&self.store, owner_id, page, per_page) {
            Ok(result) => (result.items, result.total),
            Err(err) => {
                tracing::warn!(owner_id, %err, "recycle bin listing failed");
                (Vec::new(), 0)
            }
        }
    }

    /// Restores a recycle-bin entry by row id. A failed restore is
    /// never reported as success.
    pub fn restore(&self, owner_id: i64, row_id: &str) -> bool {
        let id = match parse_row_id(row_id) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(owner_id, row_id, %err, "restore rejected");
                return false;
            }
        };
        match trash::restore(&self.store, &self.cache, owner_id, &id) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(owner_id, row_id, %err, "restore failed");
                false
            }
        }
    }

    /// Permanently removes a recycle-bin entry by row id.
    pub fn purge(&self, owner_id: i64, row_id: &str) -> bool {
        let id = match parse_row_id(row_id) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(owner_id, row_id, %err, "purge rejected");
                return false;
            }
        };
        match trash::purge(&self.store, &self.cache, owner_id, &id) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(owner_id, row_id, %err, "purge failed");
                false
            }
        }
    }

    /// Direct access to cache invalidation, for callers that mutate
    /// rows through the store handle (migrations, admin tooling).
    pub fn invalidate_user(&self, owner_id: i64) {
        commands::invalidate_owner(&self.cache, owner_id);
    }
}

fn parse_row_id(raw: &str) -> crate::error::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| SnipError::InvalidReference(raw.to_string()))
}
