//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O. It returns a
//! `Vec<Action>` which the coordinator runtime executes in order: timers,
//! catalog calls, favorites writes and store subscriptions.

use super::modes::RequestTicket;
use crate::domain::{Player, SearchQuery};
use std::time::Duration;

/// Commands executed by the coordinator runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sleep for `delay`, then feed back `Event::DebounceElapsed` with the
    /// same generation.
    ScheduleDebounce {
        /// Debounce generation the timer belongs to.
        generation: u64,
        /// How long to wait.
        delay: Duration,
    },

    /// Abort any running catalog call and start this one. The answer comes
    /// back as `Event::PageArrived` carrying `ticket`.
    Search {
        ticket: RequestTicket,
        query: SearchQuery,
    },

    /// Abort any running catalog call without starting another.
    CancelSearch,

    /// Write the player to the favorites store.
    UpsertFavorite(Player),

    /// Delete the player from the favorites store.
    RemoveFavorite(Player),

    /// Track favorite ids matching `lookup` from now on, re-querying the
    /// store after every write. Empty `lookup` tracks nothing.
    WatchFavorites {
        lookup: String,
    },

    /// Start (`true`) or stop (`false`) the live favorites list.
    WatchFavoritesList(bool),
}
