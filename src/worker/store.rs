//! Async favorites store contract and its worker-backed implementation.

use super::handler::{FavoritesWorker, WorkerRequest};
use super::{WorkerMessage, WorkerResponse};
use crate::domain::error::{FootballError, Result};
use crate::domain::Player;
use crate::storage::{FavoriteRecord, JsonStorage, Storage};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot, watch};

/// Durable set of favorited players.
///
/// Writes report success as a `bool` and never fail loudly: a failed write
/// is logged and leaves the stored set unchanged. Every successful write
/// increments the version published by [`subscribe`](Self::subscribe), which
/// readers use to know when to query again.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Inserts the player or overwrites the stored record with its id.
    async fn upsert(&self, player: &Player) -> bool;

    /// Deletes every record with the player's id. Reports whether the write
    /// succeeded, not whether a record existed.
    async fn remove(&self, player: &Player) -> bool;

    /// Ids of favorites whose first or second name contains `needle`,
    /// ignoring case. Blank input yields an empty set.
    async fn lookup(&self, needle: &str) -> HashSet<String>;

    /// Every favorite, sorted by first name ascending.
    async fn list_all(&self) -> Vec<FavoriteRecord>;

    /// Receiver for the store's write version.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Cloneable front-end to a [`FavoritesWorker`] running on its own thread.
///
/// The worker thread exits once every handle has been dropped.
#[derive(Clone)]
pub struct FavoritesHandle {
    requests: mpsc::UnboundedSender<WorkerRequest>,
    version: watch::Receiver<u64>,
}

impl std::fmt::Debug for FavoritesHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesHandle")
            .field("version", &*self.version.borrow())
            .finish_non_exhaustive()
    }
}

impl FavoritesHandle {
    /// Opens (or creates) a JSON store at `path` and starts its worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the worker thread
    /// cannot be spawned.
    pub fn open(path: PathBuf) -> Result<Self> {
        let storage = JsonStorage::new(path)?;
        Self::spawn(Box::new(storage))
    }

    /// Starts a worker thread that owns `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(storage: Box<dyn Storage>) -> Result<Self> {
        let (requests, receiver) = mpsc::unbounded_channel();
        let (version_tx, version) = watch::channel(0);
        let worker = FavoritesWorker::new(storage);

        std::thread::Builder::new()
            .name("favorites-worker".to_string())
            .spawn(move || worker.run(receiver, version_tx))?;

        Ok(Self { requests, version })
    }

    /// Sends a message and waits for the worker's answer.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Worker`] if the worker thread is gone.
    pub async fn request(&self, message: WorkerMessage) -> Result<WorkerResponse> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(WorkerRequest { message, reply })
            .map_err(|_| FootballError::Worker("favorites worker has stopped".to_string()))?;

        response
            .await
            .map_err(|_| FootballError::Worker("favorites worker dropped the request".to_string()))
    }

    async fn write(&self, operation: &str, message: WorkerMessage) -> bool {
        match self.request(message).await {
            Ok(response) if response.is_successful_write() => true,
            Ok(WorkerResponse::Error { message }) => {
                tracing::error!(operation, error = %message, "favorites write failed");
                false
            }
            Ok(other) => {
                tracing::error!(operation, response = ?other, "unexpected worker response");
                false
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "favorites write failed");
                false
            }
        }
    }
}

#[async_trait]
impl FavoritesStore for FavoritesHandle {
    async fn upsert(&self, player: &Player) -> bool {
        self.write("upsert", WorkerMessage::upsert_favorite(player.clone())).await
    }

    async fn remove(&self, player: &Player) -> bool {
        self.write("remove", WorkerMessage::remove_favorite(player.id.clone())).await
    }

    async fn lookup(&self, needle: &str) -> HashSet<String> {
        let needle = needle.trim();
        if needle.is_empty() {
            return HashSet::new();
        }

        match self.request(WorkerMessage::lookup_favorites(needle.to_string())).await {
            Ok(WorkerResponse::FavoritesFound { ids }) => ids.into_iter().collect(),
            Ok(other) => {
                tracing::warn!(response = ?other, "favorites lookup failed");
                HashSet::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "favorites lookup failed");
                HashSet::new()
            }
        }
    }

    async fn list_all(&self) -> Vec<FavoriteRecord> {
        match self.request(WorkerMessage::list_favorites()).await {
            Ok(WorkerResponse::FavoritesListed { favorites }) => favorites,
            Ok(other) => {
                tracing::warn!(response = ?other, "listing favorites failed");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing favorites failed");
                Vec::new()
            }
        }
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.clone()
    }
}
