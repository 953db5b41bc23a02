//! # Domain Model: Snippet Rows and Version Chains
//!
//! This module defines the persisted documents: [`SnippetRow`] for
//! versioned code snippets and [`FileRow`] for large files.
//!
//! ## Version chains
//!
//! Snippets are append-only. Editing a snippet never mutates an
//! existing row; it inserts a brand-new row with `version` one higher
//! than the previous latest. For a given `(owner_id, name)`:
//!
//! - version numbers move strictly forward and are never reused; a new
//!   save continues from the highest version ever recorded for the
//!   name, even while older versions sit in the recycle bin;
//! - at most one active row carries the maximum version; that row is
//!   the "latest" and is what listing and lookups resolve to.
//!
//! Large files are unversioned: one live row per `(owner_id, name)`,
//! replaced in place on re-save. They share the soft-delete contract.
//!
//! ## Soft-delete lifecycle
//!
//! ```text
//! active --soft delete--> deleted --purge / TTL expiry--> gone
//!    ^                       |
//!    +-------restore---------+
//! ```
//!
//! `deleted_at` and `deleted_expires_at` are set together on soft
//! delete and cleared together on restore. Once `deleted_expires_at`
//! passes, the store expunges the row on its own; no application code
//! polls for it.
//!
//! ## Content normalization
//!
//! Code payloads arrive from chat transports and occasionally carry
//! stray control characters (cursor moves, bells) that corrupt later
//! rendering. [`normalize_content`] strips the C0 range except for
//! `\n`, `\t` and `\r` before insert. The pass can be disabled via
//! configuration, in which case saves store content verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted version of a snippet. Immutable once inserted, except
/// for the soft-delete fields flipped by the recycle bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetRow {
    pub id: Uuid,
    pub owner_id: i64,
    pub name: String,
    pub content: String,
    pub language: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Insertion-ordered, deduplicated; at most one `repo:` entry.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Contiguous from 1 within a `(owner_id, name)` chain.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_expires_at: Option<DateTime<Utc>>,
}

impl SnippetRow {
    pub fn new(owner_id: i64, name: String, content: String, language: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            content,
            language,
            description: None,
            tags: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
            is_active: true,
            deleted_at: None,
            deleted_expires_at: None,
        }
    }

    /// Marks the row soft-deleted until `expires_at`.
    pub fn mark_deleted(&mut self, deleted_at: DateTime<Utc>, expires_at: DateTime<Utc>) {
        self.is_active = false;
        self.deleted_at = Some(deleted_at);
        self.deleted_expires_at = Some(expires_at);
    }

    /// Clears the soft-delete state, making the row live again.
    pub fn mark_restored(&mut self) {
        self.is_active = true;
        self.deleted_at = None;
        self.deleted_expires_at = None;
    }

    /// Sort key for recycle-bin listings: deletion time, falling back
    /// to the last update for rows missing the timestamp.
    pub fn deletion_sort_key(&self) -> DateTime<Utc> {
        self.deleted_at.unwrap_or(self.updated_at)
    }
}

/// An unversioned large-file row. One live row per `(owner_id, name)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRow {
    pub id: Uuid,
    pub owner_id: i64,
    pub name: String,
    pub content: String,
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub size_bytes: u64,
    pub line_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_expires_at: Option<DateTime<Utc>>,
}

impl FileRow {
    pub fn new(owner_id: i64, name: String, content: String, language: String) -> Self {
        let now = Utc::now();
        let size_bytes = content.len() as u64;
        let line_count = content.lines().count() as u64;
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            content,
            language,
            tags: Vec::new(),
            size_bytes,
            line_count,
            created_at: now,
            updated_at: now,
            is_active: true,
            deleted_at: None,
            deleted_expires_at: None,
        }
    }

    pub fn mark_deleted(&mut self, deleted_at: DateTime<Utc>, expires_at: DateTime<Utc>) {
        self.is_active = false;
        self.deleted_at = Some(deleted_at);
        self.deleted_expires_at = Some(expires_at);
    }

    pub fn mark_restored(&mut self) {
        self.is_active = true;
        self.deleted_at = None;
        self.deleted_expires_at = None;
    }

    pub fn deletion_sort_key(&self) -> DateTime<Utc> {
        self.deleted_at.unwrap_or(self.updated_at)
    }
}

/// Metadata-only projection of a snippet row, used by listings that
/// must stay cheap (tag views, the recycle bin). Omits `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetMeta {
    pub id: Uuid,
    pub owner_id: i64,
    pub name: String,
    pub language: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&SnippetRow> for SnippetMeta {
    fn from(row: &SnippetRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name.clone(),
            language: row.language.clone(),
            description: row.description.clone(),
            tags: row.tags.clone(),
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Metadata-only projection of a large-file row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    pub id: Uuid,
    pub owner_id: i64,
    pub name: String,
    pub language: String,
    pub size_bytes: u64,
    pub line_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&FileRow> for FileMeta {
    fn from(row: &FileRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name.clone(),
            language: row.language.clone(),
            size_bytes: row.size_bytes,
            line_count: row.line_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Strips disallowed control characters from a code payload.
///
/// Everything in the C0 range is removed except `\n`, `\t` and `\r`.
/// DEL (0x7f) is removed as well. All other characters pass through
/// untouched, so the result is a no-op for ordinary source code.
pub fn normalize_content(content: &str) -> String {
    content
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}
