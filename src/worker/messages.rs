//! Request and response protocol between async callers and the favorites
//! worker thread.
//!
//! Every request carries the caller's OpenTelemetry trace context so spans
//! opened on the worker thread link back to the span that issued them.

use crate::domain::Player;
use crate::storage::FavoriteRecord;

/// Distributed tracing context captured on the calling side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the caller, used as the remote parent.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current `tracing` span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active, for
    /// instance when tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    upsert_favorite(UpsertFavorite { player: Player }),
    remove_favorite(RemoveFavorite { player_id: String }),
    lookup_favorites(LookupFavorites { needle: String }),
    list_favorites(ListFavorites {}),
}

/// Messages sent to the favorites worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Insert the player, or overwrite the stored record with the same id.
    UpsertFavorite {
        player: Player,
        trace_context: Option<TraceContext>,
    },

    /// Delete every record with this id.
    RemoveFavorite {
        player_id: String,
        trace_context: Option<TraceContext>,
    },

    /// Case-insensitive substring search on first and second names.
    LookupFavorites {
        needle: String,
        trace_context: Option<TraceContext>,
    },

    /// Every stored favorite, sorted by first name.
    ListFavorites { trace_context: Option<TraceContext> },
}

impl WorkerMessage {
    pub(crate) fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::UpsertFavorite { trace_context, .. }
            | Self::RemoveFavorite { trace_context, .. }
            | Self::LookupFavorites { trace_context, .. }
            | Self::ListFavorites { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Responses sent back by the favorites worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// The upsert was written to disk.
    FavoriteUpserted { player_id: String },

    /// The removal was written to disk. `removed` may be zero.
    FavoriteRemoved { player_id: String, removed: usize },

    /// Ids of the favorites matching a lookup.
    FavoritesFound { ids: Vec<String> },

    /// All favorites, sorted by first name ascending.
    FavoritesListed { favorites: Vec<FavoriteRecord> },

    /// The operation failed.
    Error { message: String },
}

impl WorkerResponse {
    /// Whether this response reports a successful durable write.
    #[must_use]
    pub const fn is_successful_write(&self) -> bool {
        matches!(self, Self::FavoriteUpserted { .. } | Self::FavoriteRemoved { .. })
    }
}
