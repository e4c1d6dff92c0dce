//! Search session state and view model computation.
//!
//! [`SearchState`] is the single source of truth for one search session. It
//! is owned by the coordinator task, mutated only by
//! [`handle_event`](super::handle_event), and published to observers as
//! cloned snapshots. Nothing in it is persisted.
//!
//! # State Components
//!
//! - **Text**: the raw input, the text of the results on screen, and the text
//!   of a full search still under way
//! - **Results**: accumulated players and teams with their has-more flags
//! - **Request**: the ticket of the one catalog request being awaited
//! - **Favorites**: ids matching the active text, and the favorites screen
//! - **Flags**: the country flag directory, loaded once at start
//!
//! Generation counters are private: they only ever move forward, and the
//! handler compares incoming events against them to drop stale work.

use super::modes::{InFlight, RequestTicket};
use crate::domain::{Player, Team};
use crate::flags::FlagDirectory;
use crate::storage::FavoriteRecord;
use crate::ui::viewmodel::{ListOverlay, MoreButton, PlayerCell, SearchViewModel, TeamCell};
use std::collections::HashSet;
use std::time::Duration;

/// Quiet period after the last keystroke before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// State of one search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Text exactly as typed.
    pub search_text: String,

    /// Trimmed text of the results on screen. Load-more requests and
    /// favorites lookups use this, not `search_text`.
    pub active_text: String,

    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub has_more_players: bool,
    pub has_more_teams: bool,

    /// Ids of favorites whose names match `active_text`.
    pub favorite_ids: HashSet<String>,

    /// Set by any failed catalog request, cleared only by dismissal.
    pub error_visible: bool,

    /// Favorites screen contents, kept live while the screen is open.
    pub favorites: Vec<FavoriteRecord>,
    pub favorites_shown: bool,

    pub flags: FlagDirectory,

    pub(crate) debounce: Duration,
    pub(crate) debounce_generation: u64,
    pub(crate) request_generation: u64,
    pub(crate) request: Option<RequestTicket>,
    /// Text of the full search in flight; becomes `active_text` on success.
    pub(crate) pending_text: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchState {
    /// Creates an idle, empty session.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            search_text: String::new(),
            active_text: String::new(),
            players: Vec::new(),
            teams: Vec::new(),
            has_more_players: false,
            has_more_teams: false,
            favorite_ids: HashSet::new(),
            error_visible: false,
            favorites: Vec::new(),
            favorites_shown: false,
            flags: FlagDirectory::default(),
            debounce,
            debounce_generation: 0,
            request_generation: 0,
            request: None,
            pending_text: String::new(),
        }
    }

    /// The catalog request being awaited, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<InFlight> {
        self.request.map(|ticket| ticket.kind)
    }

    /// Whether the player shows as a favorite: its id matched the active
    /// text lookup, or it is listed on the open favorites screen.
    #[must_use]
    pub fn is_favourite(&self, player: &Player) -> bool {
        self.favorite_ids.contains(&player.id)
            || (self.favorites_shown && self.favorites.iter().any(|record| record.id == player.id))
    }

    /// The text a new debounced value is compared against: the pending full
    /// search if one is running, otherwise the text on screen.
    pub(crate) fn acted_text(&self) -> &str {
        if self.in_flight() == Some(InFlight::FullSearch) {
            &self.pending_text
        } else {
            &self.active_text
        }
    }

    /// Issues a new ticket, superseding whatever was in flight.
    pub(crate) fn issue_ticket(&mut self, kind: InFlight) -> RequestTicket {
        self.request_generation += 1;
        let ticket = RequestTicket {
            generation: self.request_generation,
            kind,
        };
        self.request = Some(ticket);
        ticket
    }

    pub(crate) fn clear_results(&mut self) {
        self.players.clear();
        self.teams.clear();
        self.has_more_players = false;
        self.has_more_teams = false;
        self.favorite_ids.clear();
    }

    /// Projects the state into display-ready cells.
    ///
    /// The overlay is chosen in priority order: a running full search shows
    /// the spinner, blank text asks the user to start searching, and two
    /// empty lists mean nothing matched.
    #[must_use]
    pub fn view_model(&self) -> SearchViewModel {
        let in_flight = self.in_flight();

        let overlay = if in_flight == Some(InFlight::FullSearch) {
            Some(ListOverlay::Spinner)
        } else if self.search_text.trim().is_empty() {
            Some(ListOverlay::StartSearching)
        } else if self.players.is_empty() && self.teams.is_empty() {
            Some(ListOverlay::NoResults)
        } else {
            None
        };

        let more_button = |has_more: bool, kind: InFlight| {
            if in_flight == Some(kind) {
                MoreButton::Loading
            } else if has_more {
                MoreButton::Shown
            } else {
                MoreButton::Hidden
            }
        };

        let favorites = self.favorites_shown.then(|| {
            self.favorites
                .iter()
                .map(|record| {
                    let player = record.to_player();
                    player_cell(&player, self.is_favourite(&player))
                })
                .collect()
        });

        SearchViewModel {
            search_text: self.search_text.clone(),
            overlay,
            players: self
                .players
                .iter()
                .map(|p| player_cell(p, self.is_favourite(p)))
                .collect(),
            teams: self.teams.iter().map(|t| self.team_cell(t)).collect(),
            more_players: more_button(self.has_more_players, InFlight::MorePlayers),
            more_teams: more_button(self.has_more_teams, InFlight::MoreTeams),
            favorites,
            error_visible: self.error_visible,
        }
    }

    fn team_cell(&self, team: &Team) -> TeamCell {
        TeamCell {
            id: team.id.clone(),
            name: team.name.clone(),
            city: team.city.clone(),
            stadium: team.stadium.clone(),
            flag: self.flags.get(&team.nationality).unwrap_or_default().to_string(),
        }
    }
}

fn player_cell(player: &Player, is_favourite: bool) -> PlayerCell {
    PlayerCell {
        id: player.id.clone(),
        name: player.display_name(),
        age: player.age.clone(),
        club: player.club.clone(),
        is_favourite,
    }
}
