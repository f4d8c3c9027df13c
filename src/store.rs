//! File-backed persistence of saved dashboards.
//!
//! One JSON document per dashboard under a store directory, keyed by a
//! generated id. The store is an external collaborator to the pipeline:
//! its failures surface as typed [`StoreError`] values reported to the
//! user, never as part of the aggregation path's silent-coercion policy.
//! Records marked public receive a short share token; token lookup only
//! ever returns public records.

use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    data::{Dataset, Row},
    schema::{ColumnSchema, Schema},
};

pub const SHARE_TOKEN_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dashboard '{0}' not found")]
    NotFound(String),
    #[error("Dashboard store I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Dashboard record is not valid JSON")]
    Serde(#[from] serde_json::Error),
}

/// A saved dashboard: everything needed to reconstruct the dataset and its
/// schema later, plus ownership and sharing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRecord {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub file_name: String,
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub public: bool,
    pub share_token: Option<String>,
}

impl DashboardRecord {
    pub fn new(owner: &str, name: &str, dataset: &Dataset, schema: &Schema) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            file_name: dataset.file_name.clone(),
            columns: schema.columns.clone(),
            rows: dataset.rows.clone(),
            row_count: dataset.row_count(),
            public: false,
            share_token: None,
        }
    }

    /// Rebuilds the dataset a record was saved from; column order comes from
    /// the stored schema.
    pub fn dataset(&self) -> Dataset {
        let headers = self.columns.iter().map(|c| c.name.clone()).collect();
        Dataset::new(self.file_name.clone(), headers, self.rows.clone())
    }

    pub fn schema(&self) -> Schema {
        Schema {
            columns: self.columns.clone(),
        }
    }
}

/// Brief listing entry, everything but the row payload.
#[derive(Debug, Clone, Serialize)]
pub struct StoreEntry {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub row_count: usize,
    pub public: bool,
    pub share_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardStore {
    root: PathBuf,
}

impl DashboardStore {
    /// Opens a store rooted at a directory, creating it when absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }

    pub fn save(&self, record: &DashboardRecord) -> Result<(), StoreError> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        let file = File::create(path)?;
        serde_json::to_writer(file, record)?;
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<DashboardRecord, StoreError> {
        let path = self
            .record_path(id)
            .filter(|path| path.exists())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let reader = BufReader::new(File::open(path)?);
        let record = serde_json::from_reader(reader)?;
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self
            .record_path(id)
            .filter(|path| path.exists())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        fs::remove_file(path)?;
        Ok(())
    }

    /// All saved dashboards, sorted by display name for stable output.
    pub fn list(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let reader = BufReader::new(File::open(&path)?);
            let record: DashboardRecord = serde_json::from_reader(reader)?;
            entries.push(StoreEntry {
                id: record.id,
                name: record.name,
                file_name: record.file_name,
                row_count: record.row_count,
                public: record.public,
                share_token: record.share_token,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Toggles the public flag. Making a record public assigns a share
    /// token when it has none; making it private clears the token.
    pub fn set_public(&self, id: &str, public: bool) -> Result<DashboardRecord, StoreError> {
        let mut record = self.load(id)?;
        record.public = public;
        record.share_token = if public {
            record
                .share_token
                .or_else(|| Some(new_share_token()))
        } else {
            None
        };
        self.save(&record)?;
        Ok(record)
    }

    /// Looks a dashboard up by its share token; private records never match.
    pub fn find_by_token(&self, token: &str) -> Result<DashboardRecord, StoreError> {
        for entry in self.list()? {
            if entry.public && entry.share_token.as_deref() == Some(token) {
                return self.load(&entry.id);
            }
        }
        Err(StoreError::NotFound(token.to_string()))
    }
}

fn new_share_token() -> String {
    Uuid::new_v4().simple().to_string()[..SHARE_TOKEN_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_path_rejects_traversal_shaped_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = DashboardStore::open(dir.path()).expect("open store");
        assert!(store.record_path("../escape").is_none());
        assert!(store.record_path("").is_none());
        assert!(store.record_path("ab12-cd34").is_some());
    }

    #[test]
    fn share_tokens_are_short_and_fresh() {
        let first = new_share_token();
        let second = new_share_token();
        assert_eq!(first.len(), SHARE_TOKEN_LEN);
        assert_ne!(first, second);
    }
}
