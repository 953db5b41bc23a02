//! In-memory store backed by `RwLock`-guarded maps.
//!
//! Used by the test suite and by embedded deployments that do not need
//! durability. Callers run on a pool of request handlers, so interior
//! mutability goes through `RwLock` rather than `RefCell`.

use super::SnippetStore;
use crate::error::{Result, SnipError};
use crate::model::{FileRow, SnippetRow};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

pub struct MemoryStore {
    snippets: RwLock<HashMap<Uuid, SnippetRow>>,
    files: RwLock<HashMap<Uuid, FileRow>>,
    fail_writes: RwLock<bool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            snippets: RwLock::new(HashMap::new()),
            files: RwLock::new(HashMap::new()),
            fail_writes: RwLock::new(false),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for error-path tests.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().unwrap() = fail;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.read().unwrap() {
            return Err(SnipError::StoreUnavailable(
                "simulated write failure".to_string(),
            ));
        }
        Ok(())
    }

    /// Drops rows whose recycle-bin retention has lapsed. Runs on every
    /// collection access, standing in for a store-side TTL index.
    fn expunge_expired(&self) {
        let now = Utc::now();
        self.snippets
            .write()
            .unwrap()
            .retain(|_, row| row.deleted_expires_at.map_or(true, |t| t > now));
        self.files
            .write()
            .unwrap()
            .retain(|_, row| row.deleted_expires_at.map_or(true, |t| t > now));
    }
}

impl SnippetStore for MemoryStore {
    fn insert_snippet(&self, row: &SnippetRow) -> Result<()> {
        self.check_writable()?;
        self.expunge_expired();
        let mut snippets = self.snippets.write().unwrap();
        let duplicate = snippets.values().any(|r| {
            r.owner_id == row.owner_id && r.name == row.name && r.version == row.version
        });
        if duplicate {
            return Err(SnipError::Conflict(format!(
                "version {} of '{}' already exists",
                row.version, row.name
            )));
        }
        snippets.insert(row.id, row.clone());
        Ok(())
    }

    fn update_snippet(&self, row: &SnippetRow) -> Result<()> {
        self.check_writable()?;
        self.expunge_expired();
        let mut snippets = self.snippets.write().unwrap();
        if !snippets.contains_key(&row.id) {
            return Err(SnipError::NotFound(row.id));
        }
        snippets.insert(row.id, row.clone());
        Ok(())
    }

    fn remove_snippet(&self, owner_id: i64, id: &Uuid) -> Result<()> {
        self.check_writable()?;
        let mut snippets = self.snippets.write().unwrap();
        match snippets.get(id) {
            Some(row) if row.owner_id == owner_id => {
                snippets.remove(id);
                Ok(())
            }
            _ => Err(SnipError::NotFound(*id)),
        }
    }

    fn snippet_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<SnippetRow>> {
        self.expunge_expired();
        let snippets = self.snippets.read().unwrap();
        Ok(snippets
            .get(id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    fn snippet_versions(&self, owner_id: i64, name: &str) -> Result<Vec<SnippetRow>> {
        self.expunge_expired();
        let snippets = self.snippets.read().unwrap();
        Ok(snippets
            .values()
            .filter(|r| r.owner_id == owner_id && r.name == name)
            .cloned()
            .collect())
    }

    fn active_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>> {
        self.expunge_expired();
        let snippets = self.snippets.read().unwrap();
        Ok(snippets
            .values()
            .filter(|r| r.owner_id == owner_id && r.is_active)
            .cloned()
            .collect())
    }

    fn deleted_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>> {
        self.expunge_expired();
        let snippets = self.snippets.read().unwrap();
        Ok(snippets
            .values()
            .filter(|r| r.owner_id == owner_id && !r.is_active)
            .cloned()
            .collect())
    }

    fn insert_file(&self, row: &FileRow) -> Result<()> {
        self.check_writable()?;
        self.expunge_expired();
        let mut files = self.files.write().unwrap();
        let duplicate = files
            .values()
            .any(|r| r.owner_id == row.owner_id && r.name == row.name && r.is_active);
        if duplicate {
            return Err(SnipError::Conflict(format!(
                "an active file named '{}' already exists",
                row.name
            )));
        }
        files.insert(row.id, row.clone());
        Ok(())
    }

    fn update_file(&self, row: &FileRow) -> Result<()> {
        self.check_writable()?;
        self.expunge_expired();
        let mut files = self.files.write().unwrap();
        if !files.contains_key(&row.id) {
            return Err(SnipError::NotFound(row.id));
        }
        files.insert(row.id, row.clone());
        Ok(())
    }

    fn remove_file(&self, owner_id: i64, id: &Uuid) -> Result<()> {
        self.check_writable()?;
        let mut files = self.files.write().unwrap();
        match files.get(id) {
            Some(row) if row.owner_id == owner_id => {
                files.remove(id);
                Ok(())
            }
            _ => Err(SnipError::NotFound(*id)),
        }
    }

    fn file_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<FileRow>> {
        self.expunge_expired();
        let files = self.files.read().unwrap();
        Ok(files.get(id).filter(|r| r.owner_id == owner_id).cloned())
    }

    fn file_by_name(&self, owner_id: i64, name: &str) -> Result<Option<FileRow>> {
        self.expunge_expired();
        let files = self.files.read().unwrap();
        Ok(files
            .values()
            .find(|r| r.owner_id == owner_id && r.name == name && r.is_active)
            .cloned())
    }

    fn active_files(&self, owner_id: i64) -> Result<Vec<FileRow>> {
        self.expunge_expired();
        let files = self.files.read().unwrap();
        Ok(files
            .values()
            .filter(|r| r.owner_id == owner_id && r.is_active)
            .cloned()
            .collect())
    }

    fn deleted_files(&self, owner_id: i64) -> Result<Vec<FileRow>> {
        self.expunge_expired();
        let files = self.files.read().unwrap();
        Ok(files
            .values()
            .filter(|r| r.owner_id == owner_id && !r.is_active)
            .cloned()
            .collect())
    }
}
