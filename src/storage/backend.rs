//! Storage backend abstraction.
//!
//! The [`Storage`] trait covers exactly the operations the favorites worker
//! needs. It is synchronous and `Send`: a backend lives on the worker thread
//! and is never shared.

use crate::domain::error::Result;
use crate::storage::models::FavoriteRecord;

/// Abstraction over durable favorites backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use football_search::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/favorites.json"))?;
/// let favorites = storage.get_all_favorites()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Inserts a record, or overwrites the player fields of an existing one
    /// with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    fn upsert_favorite(&mut self, record: &FavoriteRecord) -> Result<()>;

    /// Deletes every record with the given id and returns how many went.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    fn remove_favorite(&mut self, id: &str) -> Result<usize>;

    /// Returns all records, unsorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_all_favorites(&self) -> Result<Vec<FavoriteRecord>>;

    /// Returns records whose first or second name contains `needle`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn lookup_favorites(&self, needle: &str) -> Result<Vec<FavoriteRecord>>;
}
