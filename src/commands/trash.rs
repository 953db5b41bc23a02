//! Recycle bin: soft delete, deleted-items listing, restore, purge.
//!
//! State machine per row:
//!
//! ```text
//! active -> deleted -> purged   (purged is terminal)
//! deleted -> active             (restore)
//! ```
//!
//! Soft-deleting a versioned snippet marks every active row of its
//! chain, and restore/purge act on the chain's soft-deleted rows only.
//! Versions saved after the delete are untouched, so purging a bin
//! entry never removes live data, and only bin entries can be restored
//! or purged in the first place. The recycle bin shows one entry per
//! chain (its highest-version deleted row); that entry's id addresses
//! the chain's deleted rows.
//!
//! Deleted large files and deleted snippets live in different
//! collections, so the listing is an explicit in-memory merge: fetch
//! from both (capped), sort by deletion recency, then paginate.

use crate::cache::SnippetCache;
use crate::config::SnipConfig;
use crate::error::{Result, SnipError};
use crate::model::{FileMeta, SnippetMeta};
use crate::pagination::{paginate, Page};
use crate::store::SnippetStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recycle-bin entry, from either collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeletedEntry {
    Snippet(SnippetMeta),
    File(FileMeta),
}

impl DeletedEntry {
    pub fn id(&self) -> Uuid {
        match self {
            DeletedEntry::Snippet(meta) => meta.id,
            DeletedEntry::File(meta) => meta.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DeletedEntry::Snippet(meta) => &meta.name,
            DeletedEntry::File(meta) => &meta.name,
        }
    }

    fn sort_key(&self) -> DateTime<Utc> {
        match self {
            DeletedEntry::Snippet(meta) => meta.deleted_at.unwrap_or(meta.updated_at),
            DeletedEntry::File(meta) => meta.deleted_at.unwrap_or(meta.updated_at),
        }
    }
}

/// Soft-deletes every active row matching the given names, in both
/// collections. Returns the number of rows flipped.
pub fn soft_delete<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    names: &[String],
) -> Result<usize> {
    let deleted_at = Utc::now();
    let expires_at = deleted_at + config.trash_ttl();
    let mut affected = 0;

    for name in names {
        for mut row in store.snippet_versions(owner_id, name)? {
            if row.is_active {
                row.mark_deleted(deleted_at, expires_at);
                store.update_snippet(&row)?;
                affected += 1;
            }
        }
        if let Some(mut file) = store.file_by_name(owner_id, name)? {
            file.mark_deleted(deleted_at, expires_at);
            store.update_file(&file)?;
            affected += 1;
        }
    }

    if affected > 0 {
        super::invalidate_owner(cache, owner_id);
    }
    Ok(affected)
}

/// One page of the recycle bin, most recently deleted first.
///
/// Cross-collection: deleted snippet chains (one entry each, their
/// highest-version row) merged with deleted file rows. Each collection
/// contributes at most [`super::MERGE_FETCH_CAP`] entries per call.
pub fn list_deleted<S: SnippetStore>(
    store: &S,
    owner_id: i64,
    page: usize,
    per_page: usize,
) -> Result<Page<DeletedEntry>> {
    let mut snippet_entries: Vec<DeletedEntry> = {
        // Collapse each deleted chain to its highest-version row.
        let mut by_name: std::collections::HashMap<String, crate::model::SnippetRow> =
            std::collections::HashMap::new();
        for row in store.deleted_snippets(owner_id)? {
            match by_name.get(&row.name) {
                Some(kept) if kept.version >= row.version => {}
                _ => {
                    by_name.insert(row.name.clone(), row);
                }
            }
        }
        by_name
            .into_values()
            .map(|row| DeletedEntry::Snippet(SnippetMeta::from(&row)))
            .collect()
    };

    let mut file_entries: Vec<DeletedEntry> = store
        .deleted_files(owner_id)?
        .iter()
        .map(|row| DeletedEntry::File(FileMeta::from(row)))
        .collect();

    // Most recently deleted first; id as tiebreaker so repeated reads
    // paginate identically when timestamps collide.
    let recency =
        |a: &DeletedEntry, b: &DeletedEntry| b.sort_key().cmp(&a.sort_key()).then_with(|| a.id().cmp(&b.id()));

    // Bound memory before the merge; drop the oldest overflow.
    snippet_entries.sort_by(recency);
    snippet_entries.truncate(super::MERGE_FETCH_CAP);
    file_entries.sort_by(recency);
    file_entries.truncate(super::MERGE_FETCH_CAP);

    let mut merged = snippet_entries;
    merged.append(&mut file_entries);
    merged.sort_by(recency);

    Ok(paginate(merged, page, per_page))
}

/// Brings a soft-deleted row back: snippet collection first, then
/// files. For a snippet, every soft-deleted row of the chain is
/// reactivated.
pub fn restore<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    owner_id: i64,
    id: &Uuid,
) -> Result<()> {
    if let Some(row) = store.snippet_by_id(owner_id, id)? {
        if row.is_active {
            return Err(SnipError::NotFound(*id));
        }
        for mut chained in store.snippet_versions(owner_id, &row.name)? {
            if !chained.is_active {
                chained.mark_restored();
                store.update_snippet(&chained)?;
            }
        }
        super::invalidate_owner(cache, owner_id);
        return Ok(());
    }

    if let Some(mut file) = store.file_by_id(owner_id, id)? {
        if file.is_active {
            return Err(SnipError::NotFound(*id));
        }
        file.mark_restored();
        store.update_file(&file)?;
        super::invalidate_owner(cache, owner_id);
        return Ok(());
    }

    Err(SnipError::NotFound(*id))
}

/// Physically removes a recycle-bin entry: snippet collection first,
/// then files. For a snippet, every soft-deleted row of the chain
/// goes; active rows stay. Irreversible.
pub fn purge<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    owner_id: i64,
    id: &Uuid,
) -> Result<()> {
    if let Some(row) = store.snippet_by_id(owner_id, id)? {
        if row.is_active {
            return Err(SnipError::NotFound(*id));
        }
        for chained in store.snippet_versions(owner_id, &row.name)? {
            if !chained.is_active {
                store.remove_snippet(owner_id, &chained.id)?;
            }
        }
        super::invalidate_owner(cache, owner_id);
        return Ok(());
    }

    if let Some(file) = store.file_by_id(owner_id, id)? {
        if file.is_active {
            return Err(SnipError::NotFound(*id));
        }
        store.remove_file(owner_id, id)?;
        super::invalidate_owner(cache, owner_id);
        return Ok(());
    }

    Err(SnipError::NotFound(*id))
}
