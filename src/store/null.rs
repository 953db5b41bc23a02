//! Null store, selected when persistence is disabled by configuration.
//!
//! Every read returns empty, every write succeeds and drops the data.
//! Modeled as a first-class [`SnippetStore`] implementation so callers
//! never branch on whether persistence is on.

use super::SnippetStore;
use crate::error::Result;
use crate::model::{FileRow, SnippetRow};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

impl SnippetStore for NullStore {
    fn insert_snippet(&self, _row: &SnippetRow) -> Result<()> {
        Ok(())
    }

    fn update_snippet(&self, _row: &SnippetRow) -> Result<()> {
        Ok(())
    }

    fn remove_snippet(&self, _owner_id: i64, _id: &Uuid) -> Result<()> {
        Ok(())
    }

    fn snippet_by_id(&self, _owner_id: i64, _id: &Uuid) -> Result<Option<SnippetRow>> {
        Ok(None)
    }

    fn snippet_versions(&self, _owner_id: i64, _name: &str) -> Result<Vec<SnippetRow>> {
        Ok(Vec::new())
    }

    fn active_snippets(&self, _owner_id: i64) -> Result<Vec<SnippetRow>> {
        Ok(Vec::new())
    }

    fn deleted_snippets(&self, _owner_id: i64) -> Result<Vec<SnippetRow>> {
        Ok(Vec::new())
    }

    fn insert_file(&self, _row: &FileRow) -> Result<()> {
        Ok(())
    }

    fn update_file(&self, _row: &FileRow) -> Result<()> {
        Ok(())
    }

    fn remove_file(&self, _owner_id: i64, _id: &Uuid) -> Result<()> {
        Ok(())
    }

    fn file_by_id(&self, _owner_id: i64, _id: &Uuid) -> Result<Option<FileRow>> {
        Ok(None)
    }

    fn file_by_name(&self, _owner_id: i64, _name: &str) -> Result<Option<FileRow>> {
        Ok(None)
    }

    fn active_files(&self, _owner_id: i64) -> Result<Vec<FileRow>> {
        Ok(Vec::new())
    }

    fn deleted_files(&self, _owner_id: i64) -> Result<Vec<FileRow>> {
        Ok(Vec::new())
    }
}
