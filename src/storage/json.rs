//! JSON file-based favorites backend.
//!
//! Keeps the whole favorites set in memory and rewrites the file on every
//! mutation using write-to-temp + rename, so a crash never leaves a
//! half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "favorites": {
//!     "4512": {
//!       "id": "4512",
//!       "first_name": "Gareth",
//!       "second_name": "Barry",
//!       "nationality": "England",
//!       "age": "36",
//!       "club": "West Bromwich Albion",
//!       "favorited_at": 1634400000
//!     }
//!   }
//! }
//! ```

use crate::domain::error::{FootballError, Result};
use crate::storage::backend::Storage;
use crate::storage::models::FavoriteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    /// Favorites indexed by player id.
    #[serde(default)]
    favorites: BTreeMap<String, FavoriteRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            favorites: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// `Send` but not `Sync`; owned by the favorites worker thread.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonStorage {
    /// Opens the store at `file_path`, creating parent directories and an
    /// empty store if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// existing file cannot be read or parsed.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON favorites storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(favorite_count = data.favorites.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| FootballError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(FootballError::Storage(format!(
                "unsupported storage version {} (expected <= {FORMAT_VERSION})",
                data.version
            )));
        }

        tracing::debug!(version = data.version, favorites = data.favorites.len(), "loaded storage data");
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FootballError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }

    /// Persists the current data, restoring `previous` in memory if the
    /// write fails so memory and disk stay in agreement.
    fn commit(&mut self, previous: BTreeMap<String, FavoriteRecord>) -> Result<()> {
        if let Err(e) = self.save_to_file() {
            self.data.favorites = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn upsert_favorite(&mut self, record: &FavoriteRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_upsert_favorite", player_id = %record.id).entered();

        let previous = self.data.favorites.clone();

        if let Some(existing) = self.data.favorites.get_mut(&record.id) {
            tracing::debug!("overwriting existing favorite");
            existing.first_name.clone_from(&record.first_name);
            existing.second_name.clone_from(&record.second_name);
            existing.nationality.clone_from(&record.nationality);
            existing.age.clone_from(&record.age);
            existing.club.clone_from(&record.club);
        } else {
            tracing::debug!("inserting new favorite");
            self.data.favorites.insert(record.id.clone(), record.clone());
        }

        self.commit(previous)
    }

    fn remove_favorite(&mut self, id: &str) -> Result<usize> {
        let _span = tracing::debug_span!("json_remove_favorite", player_id = %id).entered();

        let previous = self.data.favorites.clone();
        let removed = usize::from(self.data.favorites.remove(id).is_some());

        self.commit(previous)?;
        tracing::debug!(removed, "favorite removed");
        Ok(removed)
    }

    fn get_all_favorites(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self.data.favorites.values().cloned().collect())
    }

    fn lookup_favorites(&self, needle: &str) -> Result<Vec<FavoriteRecord>> {
        let needle_lower = needle.to_lowercase();
        let found: Vec<FavoriteRecord> = self
            .data
            .favorites
            .values()
            .filter(|record| record.matches(&needle_lower))
            .cloned()
            .collect();

        tracing::debug!(needle = %needle, count = found.len(), "favorites lookup complete");
        Ok(found)
    }
}
