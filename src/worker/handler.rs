//! Favorites worker: owns the storage backend and answers [`WorkerMessage`]s.
//!
//! The worker runs on its own OS thread (see [`FavoritesHandle`]) so file
//! I/O never blocks the coordinator task. It bumps a version counter after
//! every successful write; subscribers use that counter as their
//! invalidation signal.
//!
//! [`FavoritesHandle`]: crate::worker::FavoritesHandle

use crate::domain::error::Result;
use crate::storage::backend::Storage;
use crate::storage::models::FavoriteRecord;
use crate::worker::{WorkerMessage, WorkerResponse};
use tokio::sync::{mpsc, oneshot, watch};

/// A message paired with the channel its response goes back on.
pub(crate) struct WorkerRequest {
    pub(crate) message: WorkerMessage,
    pub(crate) reply: oneshot::Sender<WorkerResponse>,
}

/// Worker state for handling favorites operations.
pub struct FavoritesWorker {
    storage: Box<dyn Storage>,
    version: u64,
}

impl FavoritesWorker {
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage, version: 0 }
    }

    /// Number of successful writes handled so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_upsert(&mut self, player: &crate::domain::Player) -> WorkerResponse {
        let record = FavoriteRecord::from_player(player);
        let player_id = record.id.clone();

        Self::handle_db_result("upsert favorite", self.storage.upsert_favorite(&record), |()| {
            WorkerResponse::FavoriteUpserted { player_id }
        })
    }

    fn handle_remove(&mut self, player_id: String) -> WorkerResponse {
        Self::handle_db_result("remove favorite", self.storage.remove_favorite(&player_id), |removed| {
            WorkerResponse::FavoriteRemoved { player_id, removed }
        })
    }

    fn handle_lookup(&self, needle: &str) -> WorkerResponse {
        Self::handle_db_result("lookup favorites", self.storage.lookup_favorites(needle), |records| {
            WorkerResponse::FavoritesFound {
                ids: records.into_iter().map(|r| r.id).collect(),
            }
        })
    }

    fn handle_list(&self) -> WorkerResponse {
        Self::handle_db_result("list favorites", self.storage.get_all_favorites(), |mut favorites| {
            favorites.sort_by(|a, b| a.first_name.cmp(&b.first_name).then_with(|| a.id.cmp(&b.id)));
            tracing::debug!(count = favorites.len(), "favorites listed");
            WorkerResponse::FavoritesListed { favorites }
        })
    }

    /// Reattaches the caller's trace context on this thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns its response.
    ///
    /// Successful writes increment [`version`](Self::version).
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        let response = match message {
            WorkerMessage::UpsertFavorite { player, .. } => self.handle_upsert(&player),
            WorkerMessage::RemoveFavorite { player_id, .. } => self.handle_remove(player_id),
            WorkerMessage::LookupFavorites { needle, .. } => self.handle_lookup(&needle),
            WorkerMessage::ListFavorites { .. } => self.handle_list(),
        };

        if response.is_successful_write() {
            self.version = self.version.saturating_add(1);
            tracing::debug!(version = self.version, "favorites version bumped");
        }

        response
    }

    /// Serves requests until every sender is dropped.
    ///
    /// The new version is published before the reply is sent, so a caller
    /// that awaited a write always observes the bumped version.
    pub(crate) fn run(mut self, mut requests: mpsc::UnboundedReceiver<WorkerRequest>, version_tx: watch::Sender<u64>) {
        tracing::debug!("favorites worker started");

        while let Some(WorkerRequest { message, reply }) = requests.blocking_recv() {
            let response = self.handle_message(message);
            if *version_tx.borrow() != self.version {
                version_tx.send_replace(self.version);
            }
            if reply.send(response).is_err() {
                tracing::debug!("caller went away before the reply");
            }
        }

        tracing::debug!("favorites worker stopped");
    }
}
