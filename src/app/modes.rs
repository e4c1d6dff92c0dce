//! Request lifecycle types for the search coordinator.
//!
//! The coordinator is either idle or waiting on exactly one catalog request.
//! [`InFlight`] says which kind of request that is, and every request carries
//! a [`RequestTicket`] so its answer can be matched against the request the
//! coordinator still cares about.
//!
//! # State Machine
//!
//! ```text
//!            text (non-empty)             page / failure
//!   Idle ─────────────────────► FullSearch ──────────────► Idle
//!    │  load more (has more)                                ▲
//!    ├────────────────────────► MorePlayers | MoreTeams ────┘
//!    │  empty text
//!    └──► Idle (results cleared, nothing sent)
//! ```

use crate::domain::SearchKind;

/// The catalog request currently awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InFlight {
    /// First page of players and teams for new search text.
    FullSearch,
    /// Next page of players for the active text.
    MorePlayers,
    /// Next page of teams for the active text.
    MoreTeams,
}

impl InFlight {
    /// The `searchType` sent with this request; `None` asks for both.
    #[must_use]
    pub const fn search_kind(self) -> Option<SearchKind> {
        match self {
            Self::FullSearch => None,
            Self::MorePlayers => Some(SearchKind::Players),
            Self::MoreTeams => Some(SearchKind::Teams),
        }
    }
}

/// Identifies one issued request.
///
/// A response is applied only if its ticket equals the coordinator's current
/// ticket. Any later request, or a cancel, moves the current ticket on, so
/// late answers to superseded requests fall on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    /// Request generation, strictly increasing per coordinator.
    pub generation: u64,
    /// What the request was for.
    pub kind: InFlight,
}
