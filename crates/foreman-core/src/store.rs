//! Single-document JSON persistence for the board.
//!
//! The entire application state is one JSON document: it is read in full at
//! startup and written in full on every mutation. There are no partial
//! updates and no transaction log; a save replaces the previous file via a
//! temp-file rename, so it is atomic-by-replacement from the caller's point
//! of view.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BoardError, Result, StorageResultExt},
    models::{default_template, ChecklistItem, Job},
};

/// The persisted document: everything the board knows, in one blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    /// All live jobs, in insertion order
    #[serde(default)]
    pub jobs: Vec<Job>,

    /// The global checklist template applied to new jobs
    #[serde(default = "default_template")]
    pub checklist_template: Vec<ChecklistItem>,

    /// File-stripped job snapshots keyed by year
    #[serde(default)]
    pub archives: std::collections::BTreeMap<String, Vec<Job>>,

    /// Timestamp of the last successful save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<Timestamp>,
}

impl Default for BoardData {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            checklist_template: default_template(),
            archives: std::collections::BTreeMap::new(),
            last_saved: None,
        }
    }
}

/// Persistence adapter owning the document path.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default XDG data location
    /// (`$XDG_DATA_HOME/foreman/board.json`).
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns the default document path following the XDG Base Directory
    /// specification.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("foreman")
            .place_data_file("board.json")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }

    /// The document path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full document. An absent file yields the empty board with
    /// the default checklist template; a malformed file is an error rather
    /// than trusted-on-read.
    pub fn load(&self) -> Result<BoardData> {
        if !self.path.exists() {
            log::debug!("no document at {}, starting empty", self.path.display());
            return Ok(BoardData::default());
        }
        let raw = fs::read_to_string(&self.path).at_path(&self.path)?;
        let data: BoardData = serde_json::from_str(&raw)?;
        Ok(data)
    }

    /// Write the full document, stamping `last_saved`. The document is
    /// serialized to a sibling temp file and renamed into place.
    pub fn save(&self, data: &mut BoardData) -> Result<()> {
        data.last_saved = Some(Timestamp::now());
        let serialized = serde_json::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).at_path(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).at_path(&tmp)?;
        fs::rename(&tmp, &self.path).at_path(&self.path)?;

        log::debug!(
            "saved {} jobs, {} archive years to {}",
            data.jobs.len(),
            data.archives.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("board.json"))
    }

    #[test]
    fn absent_file_loads_default_board() {
        let dir = TempDir::new().unwrap();
        let data = store_in(&dir).load().unwrap();
        assert!(data.jobs.is_empty());
        assert_eq!(data.checklist_template.len(), 4);
        assert!(data.archives.is_empty());
        assert!(data.last_saved.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut data = BoardData::default();
        data.checklist_template.push(ChecklistItem::new("Sweep site"));

        store.save(&mut data).unwrap();
        assert!(data.last_saved.is_some());

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.checklist_template.len(), 5);
        assert_eq!(reloaded.checklist_template[4].text, "Sweep site");
        assert_eq!(reloaded.last_saved, data.last_saved);
    }

    #[test]
    fn save_replaces_prior_document_in_full() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut first = BoardData::default();
        first.checklist_template.push(ChecklistItem::new("extra"));
        store.save(&mut first).unwrap();

        let mut second = BoardData::default();
        store.save(&mut second).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.checklist_template.len(), 4);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = JsonStore::new(path).load();
        assert!(matches!(result, Err(BoardError::Serialization { .. })));
    }

    #[test]
    fn unknown_status_is_rejected_at_the_boundary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(
            &path,
            r#"{"jobs":[{"id":"a","name":"n","address":"ad","status":"paused"}]}"#,
        )
        .unwrap();
        assert!(JsonStore::new(path).load().is_err());
    }

    #[test]
    fn no_temp_file_left_behind_after_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&mut BoardData::default()).unwrap();
        assert!(!dir.path().join("board.json.tmp").exists());
        assert!(dir.path().join("board.json").exists());
    }
}
