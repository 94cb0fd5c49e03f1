//! Whole-warehouse JSON export.
//!
//! A download-style snapshot for people, not an input to the core.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_inventory::{IssueRecord, Item};

use crate::snapshot::PersistenceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub catalog: Vec<Item>,
    pub ledger: Vec<IssueRecord>,
    pub departments: Vec<String>,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    /// `stockroom-export-YYYY-MM-DD.json`, dated by the export timestamp.
    pub fn file_name(&self) -> String {
        format!("stockroom-export-{}.json", self.exported_at.format("%Y-%m-%d"))
    }

    pub fn to_json_pretty(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document into `dir` under [`file_name`](Self::file_name).
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, PersistenceError> {
        let path = dir.join(self.file_name());
        let json = self.to_json_pretty()?;
        std::fs::write(&path, json).map_err(|source| PersistenceError::Io {
            key: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}
