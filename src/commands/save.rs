//! Version chain manager: append-only snippet saves and
//! replace-in-place large-file saves.
//!
//! A snippet save never mutates the previous version. It computes the
//! next version from the highest version ever recorded for the name,
//! active or not, so a chain sitting in the recycle bin never blocks a
//! new save and no version number is ever reused. Description, creation
//! time and tags carry forward from the latest active row when one
//! exists; a save over a fully deleted chain starts fresh.
//!
//! Two handlers saving the same name concurrently can both read the
//! same "previous" row and compute the same next version. The store
//! rejects the second insert with `Conflict`; the loser re-reads and
//! retries, so version numbers stay unique without any
//! application-level lock.

use crate::cache::SnippetCache;
use crate::config::SnipConfig;
use crate::error::{Result, SnipError};
use crate::model::{normalize_content, FileRow, SnippetRow};
use crate::store::SnippetStore;
use crate::tags::merge_tags;
use chrono::Utc;

/// Retries after a version collision before the save is reported as
/// failed. Each retry re-reads the chain, so one retry is enough
/// unless the same name is under sustained concurrent writes.
const MAX_VERSION_RETRIES: u32 = 3;

/// Appends a new version to the `(owner_id, name)` chain.
///
/// Returns the inserted row. Invalidation of the owner's cached views
/// happens here, after the insert succeeds.
pub fn run<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    name: &str,
    content: &str,
    language: &str,
    extra_tags: &[String],
) -> Result<SnippetRow> {
    let content = if config.normalize_content {
        normalize_content(content)
    } else {
        content.to_string()
    };

    let mut attempts = 0;
    loop {
        let versions = store.snippet_versions(owner_id, name)?;
        // Soft-deleted rows count for numbering but not for carry-over:
        // a save over a binned chain gets a fresh identity.
        let next_version = versions.iter().map(|r| r.version).max().unwrap_or(0) + 1;
        let previous = versions
            .into_iter()
            .filter(|r| r.is_active)
            .max_by_key(|r| r.version);

        let mut row = SnippetRow::new(
            owner_id,
            name.to_string(),
            content.clone(),
            language.to_string(),
        );
        row.version = next_version;
        if let Some(prev) = &previous {
            row.description = prev.description.clone();
            row.created_at = prev.created_at;
            row.tags = merge_tags(&prev.tags, extra_tags);
        } else {
            row.tags = merge_tags(&[], extra_tags);
        }
        row.updated_at = Utc::now();

        match store.insert_snippet(&row) {
            Ok(()) => {
                super::invalidate_owner(cache, owner_id);
                return Ok(row);
            }
            Err(SnipError::Conflict(reason)) => {
                attempts += 1;
                if attempts >= MAX_VERSION_RETRIES {
                    return Err(SnipError::Conflict(reason));
                }
                tracing::debug!(owner_id, name, attempts, "version collision, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

/// Saves a large file: replaces the live row for the name, or inserts
/// a fresh one. Size and line-count metadata are recomputed from the
/// payload on every save.
pub fn run_file<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    name: &str,
    content: &str,
    language: &str,
) -> Result<FileRow> {
    let content = if config.normalize_content {
        normalize_content(content)
    } else {
        content.to_string()
    };

    let row = match store.file_by_name(owner_id, name)? {
        Some(mut existing) => {
            existing.size_bytes = content.len() as u64;
            existing.line_count = content.lines().count() as u64;
            existing.content = content;
            existing.language = language.to_string();
            existing.updated_at = Utc::now();
            store.update_file(&existing)?;
            existing
        }
        None => {
            let fresh = FileRow::new(
                owner_id,
                name.to_string(),
                content,
                language.to_string(),
            );
            store.insert_file(&fresh)?;
            fresh
        }
    };

    super::invalidate_owner(cache, owner_id);
    Ok(row)
}
