//! Filesystem store: one JSON document file per collection.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/
//! ├── snippets.json   # HashMap<Uuid, SnippetRow>
//! └── files.json      # HashMap<Uuid, FileRow>
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a
//! crash mid-write never leaves a truncated collection. Collections are
//! loaded per operation; rows whose `deleted_expires_at` has lapsed are
//! dropped during load. The prune is in-memory only on read paths and
//! reaches disk through the next save, which always runs under the
//! write lock, so an unlocked reader can never clobber a concurrent
//! writer's rows.

use super::SnippetStore;
use crate::error::{Result, SnipError};
use crate::model::{FileRow, SnippetRow};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

const SNIPPETS_FILE: &str = "snippets.json";
const FILES_FILE: &str = "files.json";

pub struct FileStore {
    data_dir: PathBuf,
    /// Serializes load-modify-save cycles within this process. Without
    /// it, two handlers could interleave their writes and lose rows.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    fn write_atomic(&self, file_name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.data_dir.join(file_name);
        let tmp = self.data_dir.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, target)?;
        Ok(())
    }

    fn load_snippets(&self) -> Result<HashMap<Uuid, SnippetRow>> {
        let path = self.data_dir.join(SNIPPETS_FILE);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        let mut rows: HashMap<Uuid, SnippetRow> = serde_json::from_str(&content)?;
        let now = Utc::now();
        rows.retain(|_, row| row.deleted_expires_at.map_or(true, |t| t > now));
        Ok(rows)
    }

    fn save_snippets(&self, rows: &HashMap<Uuid, SnippetRow>) -> Result<()> {
        let content = serde_json::to_string_pretty(rows)?;
        self.write_atomic(SNIPPETS_FILE, &content)
    }

    fn load_files(&self) -> Result<HashMap<Uuid, FileRow>> {
        let path = self.data_dir.join(FILES_FILE);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        let mut rows: HashMap<Uuid, FileRow> = serde_json::from_str(&content)?;
        let now = Utc::now();
        rows.retain(|_, row| row.deleted_expires_at.map_or(true, |t| t > now));
        Ok(rows)
    }

    fn save_files(&self, rows: &HashMap<Uuid, FileRow>) -> Result<()> {
        let content = serde_json::to_string_pretty(rows)?;
        self.write_atomic(FILES_FILE, &content)
    }
}

impl SnippetStore for FileStore {
    fn insert_snippet(&self, row: &SnippetRow) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_snippets()?;
        let duplicate = rows.values().any(|r| {
            r.owner_id == row.owner_id && r.name == row.name && r.version == row.version
        });
        if duplicate {
            return Err(SnipError::Conflict(format!(
                "version {} of '{}' already exists",
                row.version, row.name
            )));
        }
        rows.insert(row.id, row.clone());
        self.save_snippets(&rows)
    }

    fn update_snippet(&self, row: &SnippetRow) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_snippets()?;
        if !rows.contains_key(&row.id) {
            return Err(SnipError::NotFound(row.id));
        }
        rows.insert(row.id, row.clone());
        self.save_snippets(&rows)
    }

    fn remove_snippet(&self, owner_id: i64, id: &Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_snippets()?;
        match rows.get(id) {
            Some(row) if row.owner_id == owner_id => {
                rows.remove(id);
                self.save_snippets(&rows)
            }
            _ => Err(SnipError::NotFound(*id)),
        }
    }

    fn snippet_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<SnippetRow>> {
        let rows = self.load_snippets()?;
        Ok(rows.get(id).filter(|r| r.owner_id == owner_id).cloned())
    }

    fn snippet_versions(&self, owner_id: i64, name: &str) -> Result<Vec<SnippetRow>> {
        let rows = self.load_snippets()?;
        Ok(rows
            .into_values()
            .filter(|r| r.owner_id == owner_id && r.name == name)
            .collect())
    }

    fn active_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>> {
        let rows = self.load_snippets()?;
        Ok(rows
            .into_values()
            .filter(|r| r.owner_id == owner_id && r.is_active)
            .collect())
    }

    fn deleted_snippets(&self, owner_id: i64) -> Result<Vec<SnippetRow>> {
        let rows = self.load_snippets()?;
        Ok(rows
            .into_values()
            .filter(|r| r.owner_id == owner_id && !r.is_active)
            .collect())
    }

    fn insert_file(&self, row: &FileRow) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_files()?;
        let duplicate = rows
            .values()
            .any(|r| r.owner_id == row.owner_id && r.name == row.name && r.is_active);
        if duplicate {
            return Err(SnipError::Conflict(format!(
                "an active file named '{}' already exists",
                row.name
            )));
        }
        rows.insert(row.id, row.clone());
        self.save_files(&rows)
    }

    fn update_file(&self, row: &FileRow) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_files()?;
        if !rows.contains_key(&row.id) {
            return Err(SnipError::NotFound(row.id));
        }
        rows.insert(row.id, row.clone());
        self.save_files(&rows)
    }

    fn remove_file(&self, owner_id: i64, id: &Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows = self.load_files()?;
        match rows.get(id) {
            Some(row) if row.owner_id == owner_id => {
                rows.remove(id);
                self.save_files(&rows)
            }
            _ => Err(SnipError::NotFound(*id)),
        }
    }

    fn file_by_id(&self, owner_id: i64, id: &Uuid) -> Result<Option<FileRow>> {
        let rows = self.load_files()?;
        Ok(rows.get(id).filter(|r| r.owner_id == owner_id).cloned())
    }

    fn file_by_name(&self, owner_id: i64, name: &str) -> Result<Option<FileRow>> {
        let rows = self.load_files()?;
        Ok(rows
            .into_values()
            .find(|r| r.owner_id == owner_id && r.name == name && r.is_active))
    }

    fn active_files(&self, owner_id: i64) -> Result<Vec<FileRow>> {
        let rows = self.load_files()?;
        Ok(rows
            .into_values()
            .filter(|r| r.owner_id == owner_id && r.is_active)
            .collect())
    }

    fn deleted_files(&self, owner_id: i64) -> Result<Vec<FileRow>> {
        let rows = self.load_files()?;
        Ok(rows
            .into_values()
            .filter(|r| r.owner_id == owner_id && !r.is_active)
            .collect())
    }
}
