//! # Storage Layer
//!
//! This module defines the repository interface for the two document
//! collections: versioned snippets and large files. The
//! [`SnippetStore`] trait lets the upper layers work against different
//! backends without knowing which one is wired in.
//!
//! ## Shape of the data
//!
//! Each collection is a set of rows keyed by a `Uuid`. Every query is
//! partitioned by `owner_id`; there is no cross-owner operation.
//! Snippet rows additionally form version chains: all rows sharing
//! `(owner_id, name)`, ordered by `version`.
//!
//! ## Write contracts
//!
//! - [`SnippetStore::insert_snippet`] MUST reject a row whose
//!   `(owner_id, name, version)` already exists with
//!   [`SnipError::Conflict`]. This is the uniqueness constraint that
//!   lets the save path detect two concurrent writers computing the
//!   same next version: the loser re-reads and retries.
//! - [`SnippetStore::insert_file`] MUST reject a second *active* row
//!   for the same `(owner_id, name)` the same way; large files are
//!   unversioned and hold one live row per name.
//! - Updates replace a row by id and fail with [`SnipError::NotFound`]
//!   when the row is gone.
//!
//! ## TTL expiry
//!
//! Soft-deleted rows carry `deleted_expires_at`. Every implementation
//! expunges rows past that timestamp as part of touching its
//! collections, the way a document store's TTL index would. Callers
//! never schedule or poll for expiry; they only set the timestamp.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON document files on disk, atomic writes.
//! - [`memory::MemoryStore`]: `RwLock`-guarded maps, used in tests and
//!   embedded deployments.
//! - [`null::NullStore`]: persistence disabled; reads empty, writes
//!   succeed and drop the data.

use crate::error::Result;
use crate::model::{FileRow, SnippetRow};
use uuid::Uuid;

pub mod fs;
pub mod memory;
pub mod null;

/// Abstract interface over the snippet and large-file collections.
///
/// All methods take `&self`; implementations handle their own interior
/// locking since callers are concurrent request handlers.
pub trait SnippetStore {
    // --- Snippet collection ---

    /// Insert a new version row. Fails with `Conflict` if a row with
    /// the same `(owner_id, name, version)` already exists.
    fn insert_snippet(&self, row: &SnippetRow) -> Result<()>;

    /// Replace an existing row by id (soft-delete/restore state flips).
    fn update_snippet(&self, row: &SnippetRow) -> Result<()>;

    /// Physically remove a row.
    fn remove_snippet(&self, owner_id: i64, id: &Uuid) -> Result<()>;

    /// Point lookup by id, scoped to the owner.
    fn snippet_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<SnippetRow>>;

    /// Every row of a version chain, active or not, unordered.
    fn snippet_versions(&self, owner_id: i64, name: &str) -> Result<Vec<SnippetRow>>;

    /// All active rows for the owner (all chains, all versions).
    fn active_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>>;

    /// All soft-deleted, not-yet-expired rows for the owner.
    fn deleted_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>>;

    // --- Large-file collection ---

    /// Insert a new file row. Fails with `Conflict` if an active row
    /// with the same `(owner_id, name)` already exists.
    fn insert_file(&self, row: &FileRow) -> Result<()>;

    /// Replace an existing file row by id.
    fn update_file(&self, row: &FileRow) -> Result<()>;

    /// Physically remove a file row.
    fn remove_file(&self, owner_id: i64, id: &Uuid) -> Result<()>;

    fn file_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<FileRow>>;

    /// The live (active) row for a name, if any.
    fn file_by_name(&self, owner_id: i64, name: &str) -> Result<Option<FileRow>>;

    fn active_files(&self, owner_id: i64) -> Result<Vec<FileRow>>;

    fn deleted_files(&self, owner_id: i64) -> Result<Vec<FileRow>>;
}
