//! Event processing and state transitions.
//!
//! [`handle_event`] is the whole search coordinator minus its I/O: it takes
//! one [`Event`], mutates [`SearchState`] and returns the [`Action`]s the
//! runtime must execute. It never blocks, never awaits and never fails, which
//! is what lets every transition be tested without a runtime.
//!
//! # Event Types
//!
//! - **Input**: `TextChanged`, `LoadMorePlayers`, `LoadMoreTeams`, `Refresh`,
//!   `FavoriteToggled`, `ShowFavorites`, `HideFavorites`, `DismissError`
//! - **Timers**: `DebounceElapsed`
//! - **Completions**: `PageArrived`, `FavoritesChanged`, `FavoritesListed`,
//!   `FlagsLoaded`
//!
//! # Staleness
//!
//! Completions are matched against the state before they are applied. A
//! debounce timer must carry the latest debounce generation, a page must
//! carry the current request ticket, and a favorites lookup must be for the
//! active text. Anything else is dropped without touching the state.

use super::modes::{InFlight, RequestTicket};
use super::{Action, SearchState};
use crate::domain::{CatalogError, Player, ResultPage, SearchKind, SearchQuery};
use crate::flags::FlagDirectory;
use crate::storage::FavoriteRecord;
use std::collections::HashSet;

/// Everything the coordinator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search field now holds this text.
    TextChanged(String),

    /// A debounce timer fired.
    DebounceElapsed { generation: u64 },

    /// Fetch the next page of players for the active text.
    LoadMorePlayers,

    /// Fetch the next page of teams for the active text.
    LoadMoreTeams,

    /// Search the current text again, even if it was just searched.
    Refresh,

    /// A catalog request finished.
    PageArrived {
        ticket: RequestTicket,
        result: Result<ResultPage, CatalogError>,
    },

    /// The user tapped the star on a player.
    FavoriteToggled { player: Player, was_favorite: bool },

    /// Fresh favorites lookup for `lookup`.
    FavoritesChanged { lookup: String, ids: HashSet<String> },

    ShowFavorites,
    HideFavorites,

    /// Fresh contents for the favorites screen.
    FavoritesListed(Vec<FavoriteRecord>),

    FlagsLoaded(FlagDirectory),

    /// The user acknowledged the error alert.
    DismissError,
}

/// Processes an event, mutates the state and returns actions to execute.
///
/// The returned `bool` says whether observers need a new snapshot.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut SearchState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::TextChanged(text) => {
            state.search_text = text;
            state.debounce_generation += 1;
            (
                true,
                vec![Action::ScheduleDebounce {
                    generation: state.debounce_generation,
                    delay: state.debounce,
                }],
            )
        }
        Event::DebounceElapsed { generation } => {
            if generation != state.debounce_generation {
                tracing::debug!(generation, latest = state.debounce_generation, "stale debounce timer");
                return (false, vec![]);
            }
            let text = state.search_text.trim().to_string();
            if text == state.acted_text() {
                tracing::debug!(text = %text, "text unchanged, not searching again");
                return (false, vec![]);
            }
            act_on_text(state, text)
        }
        Event::Refresh => {
            // Any pending timer would only repeat this search.
            state.debounce_generation += 1;
            let text = state.search_text.trim().to_string();
            act_on_text(state, text)
        }
        Event::LoadMorePlayers => load_more(state, InFlight::MorePlayers),
        Event::LoadMoreTeams => load_more(state, InFlight::MoreTeams),
        Event::PageArrived { ticket, result } => page_arrived(state, ticket, result),
        Event::FavoriteToggled { player, was_favorite } => {
            tracing::debug!(player_id = %player.id, was_favorite, "favorite toggled");
            let action = if was_favorite {
                Action::RemoveFavorite(player)
            } else {
                Action::UpsertFavorite(player)
            };
            (false, vec![action])
        }
        Event::FavoritesChanged { lookup, ids } => {
            if lookup != state.active_text {
                tracing::debug!(lookup = %lookup, active = %state.active_text, "stale favorites lookup");
                return (false, vec![]);
            }
            if ids == state.favorite_ids {
                return (false, vec![]);
            }
            state.favorite_ids = ids;
            (true, vec![])
        }
        Event::ShowFavorites => {
            if state.favorites_shown {
                return (false, vec![]);
            }
            state.favorites_shown = true;
            (true, vec![Action::WatchFavoritesList(true)])
        }
        Event::HideFavorites => {
            if !state.favorites_shown {
                return (false, vec![]);
            }
            state.favorites_shown = false;
            state.favorites.clear();
            (true, vec![Action::WatchFavoritesList(false)])
        }
        Event::FavoritesListed(records) => {
            if !state.favorites_shown || records == state.favorites {
                return (false, vec![]);
            }
            state.favorites = records;
            (true, vec![])
        }
        Event::FlagsLoaded(flags) => {
            tracing::debug!(count = flags.len(), "flags loaded");
            state.flags = flags;
            (true, vec![])
        }
        Event::DismissError => {
            let changed = state.error_visible;
            state.error_visible = false;
            (changed, vec![])
        }
    }
}

/// Acts on debounced text. Blank input clears everything at once; other text
/// starts a full search that supersedes any request in flight and becomes
/// the active text only when its first page arrives.
fn act_on_text(state: &mut SearchState, text: String) -> (bool, Vec<Action>) {
    if text.is_empty() {
        tracing::debug!("search text cleared");
        let mut actions = Vec::with_capacity(2);
        if state.request.take().is_some() {
            actions.push(Action::CancelSearch);
        }
        state.pending_text.clear();
        state.active_text.clear();
        state.clear_results();
        actions.push(Action::WatchFavorites { lookup: String::new() });
        return (true, actions);
    }

    let ticket = state.issue_ticket(InFlight::FullSearch);
    let query = SearchQuery::both(text.as_str()).with_request_order(ticket.generation);
    tracing::debug!(text = %text, generation = ticket.generation, "starting full search");
    state.pending_text = text;
    (true, vec![Action::Search { ticket, query }])
}

fn load_more(state: &mut SearchState, kind: InFlight) -> (bool, Vec<Action>) {
    let Some(search_kind) = kind.search_kind() else {
        return (false, vec![]);
    };
    let (has_more, offset) = match search_kind {
        SearchKind::Players => (state.has_more_players, state.players.len()),
        SearchKind::Teams => (state.has_more_teams, state.teams.len()),
    };

    if let Some(busy) = state.in_flight() {
        tracing::debug!(requested = ?kind, in_flight = ?busy, "request already in flight");
        return (false, vec![]);
    }
    if !has_more || state.active_text.is_empty() {
        return (false, vec![]);
    }

    let ticket = state.issue_ticket(kind);
    let query = SearchQuery::more(state.active_text.as_str(), search_kind, offset)
        .with_request_order(ticket.generation);
    tracing::debug!(kind = ?kind, offset, "loading next page");
    (true, vec![Action::Search { ticket, query }])
}

fn page_arrived(
    state: &mut SearchState,
    ticket: RequestTicket,
    result: Result<ResultPage, CatalogError>,
) -> (bool, Vec<Action>) {
    if state.request != Some(ticket) {
        tracing::debug!(
            generation = ticket.generation,
            kind = ?ticket.kind,
            current = ?state.request,
            "dropping stale page"
        );
        return (false, vec![]);
    }
    state.request = None;
    let pending = std::mem::take(&mut state.pending_text);

    let page = match result {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(kind = ?ticket.kind, error = %e, "catalog request failed");
            state.error_visible = true;
            return (true, vec![]);
        }
    };

    let mut actions = Vec::new();
    match ticket.kind {
        InFlight::FullSearch => {
            state.players = page.players;
            state.teams = page.teams;
            state.has_more_players = page.has_more_players;
            state.has_more_teams = page.has_more_teams;
            if pending != state.active_text {
                state.active_text = pending;
                actions.push(Action::WatchFavorites {
                    lookup: state.active_text.clone(),
                });
            }
        }
        InFlight::MorePlayers => {
            state.players.extend(page.players);
            state.has_more_players = page.has_more_players;
        }
        InFlight::MoreTeams => {
            state.teams.extend(page.teams);
            state.has_more_teams = page.has_more_teams;
        }
    }

    tracing::debug!(
        players = state.players.len(),
        teams = state.teams.len(),
        has_more_players = state.has_more_players,
        has_more_teams = state.has_more_teams,
        "page merged"
    );
    (true, actions)
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::TextChanged(_) => "text_changed",
            Self::DebounceElapsed { .. } => "debounce_elapsed",
            Self::LoadMorePlayers => "load_more_players",
            Self::LoadMoreTeams => "load_more_teams",
            Self::Refresh => "refresh",
            Self::PageArrived { .. } => "page_arrived",
            Self::FavoriteToggled { .. } => "favorite_toggled",
            Self::FavoritesChanged { .. } => "favorites_changed",
            Self::ShowFavorites => "show_favorites",
            Self::HideFavorites => "hide_favorites",
            Self::FavoritesListed(_) => "favorites_listed",
            Self::FlagsLoaded(_) => "flags_loaded",
            Self::DismissError => "dismiss_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkError, Team, DEFAULT_PAGE_SIZE};
    use std::time::Duration;

    fn players(prefix: &str, n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("{prefix}{i}"), "First", format!("Last{i}")))
            .collect()
    }

    fn teams(prefix: &str, n: usize) -> Vec<Team> {
        (0..n)
            .map(|i| Team::new(format!("{prefix}{i}"), format!("Team {i}"), "England"))
            .collect()
    }

    fn page(p: usize, t: usize) -> ResultPage {
        ResultPage::new(players("p", p), teams("t", t), DEFAULT_PAGE_SIZE)
    }

    fn failure() -> Result<ResultPage, CatalogError> {
        Err(NetworkError::Transport {
            status: Some(500),
            message: "Internal Server Error".to_string(),
        }
        .into())
    }

    /// Types `text` and lets its debounce timer fire.
    fn type_and_settle(state: &mut SearchState, text: &str) -> Vec<Action> {
        let (_, actions) = handle_event(state, Event::TextChanged(text.to_string()));
        let Some(Action::ScheduleDebounce { generation, .. }) = actions.first().cloned() else {
            panic!("expected a debounce, got {actions:?}");
        };
        handle_event(state, Event::DebounceElapsed { generation }).1
    }

    fn search_action(actions: &[Action]) -> (RequestTicket, SearchQuery) {
        actions
            .iter()
            .find_map(|a| match a {
                Action::Search { ticket, query } => Some((*ticket, query.clone())),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no search in {actions:?}"))
    }

    fn searched(state: &mut SearchState, text: &str, result: ResultPage) {
        let (ticket, _) = search_action(&type_and_settle(state, text));
        handle_event(state, Event::PageArrived { ticket, result: Ok(result) });
    }

    #[test]
    fn text_changed_schedules_debounce_with_configured_delay() {
        let mut state = SearchState::new(Duration::from_millis(250));
        let (changed, actions) = handle_event(&mut state, Event::TextChanged("B".to_string()));
        assert!(changed);
        assert_eq!(
            actions,
            vec![Action::ScheduleDebounce {
                generation: 1,
                delay: Duration::from_millis(250)
            }]
        );
        assert_eq!(state.search_text, "B");
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn rapid_typing_collapses_into_one_search() {
        let mut state = SearchState::default();
        let mut generations = vec![];
        for text in ["B", "Be", "Bec", "Beck"] {
            let (_, actions) = handle_event(&mut state, Event::TextChanged(text.to_string()));
            if let [Action::ScheduleDebounce { generation, .. }] = actions[..] {
                generations.push(generation);
            }
        }

        let mut searches = vec![];
        for generation in generations {
            let (_, actions) = handle_event(&mut state, Event::DebounceElapsed { generation });
            searches.extend(actions.into_iter().filter(|a| matches!(a, Action::Search { .. })));
        }

        assert_eq!(searches.len(), 1);
        let (ticket, query) = search_action(&searches);
        assert_eq!(query.text, "Beck");
        assert_eq!(query.kind, None);
        assert_eq!(query.offset, Some(0));
        assert_eq!(query.request_order, Some(ticket.generation));
        assert_eq!(state.in_flight(), Some(InFlight::FullSearch));
    }

    #[test]
    fn full_search_replaces_results_and_computes_has_more() {
        let mut state = SearchState::default();
        let (ticket, _) = search_action(&type_and_settle(&mut state, "Beck"));
        assert_eq!(state.active_text, "");

        let (changed, actions) = handle_event(&mut state, Event::PageArrived { ticket, result: Ok(page(10, 3)) });
        assert!(changed);
        assert_eq!(state.active_text, "Beck");
        assert_eq!(
            actions,
            vec![Action::WatchFavorites {
                lookup: "Beck".to_string()
            }]
        );
        assert_eq!(state.players.len(), 10);
        assert_eq!(state.teams.len(), 3);
        assert!(state.has_more_players);
        assert!(!state.has_more_teams);
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn empty_page_means_nothing_more() {
        let mut state = SearchState::default();
        searched(&mut state, "zz", page(0, 0));
        assert!(!state.has_more_players);
        assert!(!state.has_more_teams);
        assert!(state.players.is_empty());
    }

    #[test]
    fn duplicate_text_is_suppressed() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(2, 2));

        // Trailing whitespace trims to the same text.
        let actions = type_and_settle(&mut state, "Beck ");
        assert!(actions.is_empty());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn refresh_bypasses_duplicate_suppression() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(2, 2));

        let (_, actions) = handle_event(&mut state, Event::Refresh);
        let (ticket, query) = search_action(&actions);
        assert_eq!(ticket.kind, InFlight::FullSearch);
        assert_eq!(query.text, "Beck");
    }

    #[test]
    fn refresh_supersedes_pending_debounce() {
        let mut state = SearchState::default();
        let (_, actions) = handle_event(&mut state, Event::TextChanged("Rush".to_string()));
        let Some(Action::ScheduleDebounce { generation, .. }) = actions.first().cloned() else {
            panic!("expected a debounce");
        };

        let (_, actions) = handle_event(&mut state, Event::Refresh);
        assert_eq!(search_action(&actions).1.text, "Rush");

        let (changed, actions) = handle_event(&mut state, Event::DebounceElapsed { generation });
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn empty_text_clears_without_network_call() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 10));
        state.favorite_ids.insert("p0".to_string());

        let actions = type_and_settle(&mut state, "   ");
        assert!(!actions.iter().any(|a| matches!(a, Action::Search { .. })));
        assert!(!actions.contains(&Action::CancelSearch));
        assert!(state.players.is_empty());
        assert!(state.teams.is_empty());
        assert!(!state.has_more_players);
        assert!(!state.has_more_teams);
        assert!(state.favorite_ids.is_empty());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn empty_text_cancels_in_flight_search() {
        let mut state = SearchState::default();
        let (ticket, _) = search_action(&type_and_settle(&mut state, "Beck"));

        let actions = type_and_settle(&mut state, "");
        assert!(actions.contains(&Action::CancelSearch));
        assert_eq!(state.in_flight(), None);

        // The cancelled search's answer is ignored if it still shows up.
        let (changed, _) = handle_event(&mut state, Event::PageArrived { ticket, result: Ok(page(5, 5)) });
        assert!(!changed);
        assert!(state.players.is_empty());
    }

    #[test]
    fn failure_keeps_results_and_raises_error() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(4, 2));
        let (ticket, _) = search_action(&type_and_settle(&mut state, "Becks"));

        let (changed, _) = handle_event(&mut state, Event::PageArrived { ticket, result: failure() });
        assert!(changed);
        assert!(state.error_visible);
        assert_eq!(state.in_flight(), None);
        assert_eq!(state.players.len(), 4);
        assert_eq!(state.teams.len(), 2);

        let (changed, _) = handle_event(&mut state, Event::DismissError);
        assert!(changed);
        assert!(!state.error_visible);
        let (changed, _) = handle_event(&mut state, Event::DismissError);
        assert!(!changed);
    }

    #[test]
    fn failed_search_leaves_paging_on_the_shown_results() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 0));
        let (ticket, _) = search_action(&type_and_settle(&mut state, "Zidane"));
        handle_event(&mut state, Event::PageArrived { ticket, result: failure() });
        assert_eq!(state.active_text, "Beck");

        let (_, actions) = handle_event(&mut state, Event::LoadMorePlayers);
        let (_, query) = search_action(&actions);
        assert_eq!(query.text, "Beck");
        assert_eq!(query.offset, Some(10));

        // Lookups for the failed text no longer match what is shown.
        let (changed, _) = handle_event(
            &mut state,
            Event::FavoritesChanged {
                lookup: "Zidane".to_string(),
                ids: ["z1".to_string()].into(),
            },
        );
        assert!(!changed);
    }

    #[test]
    fn failed_text_is_retried_when_typed_again() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(2, 2));
        let (ticket, _) = search_action(&type_and_settle(&mut state, "Zidane"));
        handle_event(&mut state, Event::PageArrived { ticket, result: failure() });

        let (_, query) = search_action(&type_and_settle(&mut state, "Zidane"));
        assert_eq!(query.text, "Zidane");
    }

    #[test]
    fn same_text_as_pending_search_is_suppressed() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(2, 2));
        type_and_settle(&mut state, "Owen");

        assert!(type_and_settle(&mut state, " Owen").is_empty());
        // Going back to the shown text still has to beat the pending search.
        let (_, query) = search_action(&type_and_settle(&mut state, "Beck"));
        assert_eq!(query.text, "Beck");
    }

    #[test]
    fn stale_full_search_is_discarded() {
        let mut state = SearchState::default();
        let (old, _) = search_action(&type_and_settle(&mut state, "Bec"));
        let (new, _) = search_action(&type_and_settle(&mut state, "Beck"));
        assert!(new.generation > old.generation);

        let (changed, _) = handle_event(&mut state, Event::PageArrived { ticket: old, result: Ok(page(1, 1)) });
        assert!(!changed);
        assert!(state.players.is_empty());
        assert_eq!(state.in_flight(), Some(InFlight::FullSearch));

        handle_event(&mut state, Event::PageArrived { ticket: new, result: Ok(page(3, 0)) });
        assert_eq!(state.players.len(), 3);
    }

    #[test]
    fn stale_failure_does_not_raise_error() {
        let mut state = SearchState::default();
        let (old, _) = search_action(&type_and_settle(&mut state, "Bec"));
        type_and_settle(&mut state, "Beck");

        handle_event(&mut state, Event::PageArrived { ticket: old, result: failure() });
        assert!(!state.error_visible);
    }

    #[test]
    fn load_more_players_appends_with_offset() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 2));

        let (changed, actions) = handle_event(&mut state, Event::LoadMorePlayers);
        assert!(changed);
        let (ticket, query) = search_action(&actions);
        assert_eq!(query.text, "Beck");
        assert_eq!(query.kind, Some(SearchKind::Players));
        assert_eq!(query.offset, Some(10));
        assert_eq!(state.in_flight(), Some(InFlight::MorePlayers));

        let more = ResultPage::new(players("q", 4), vec![], DEFAULT_PAGE_SIZE);
        handle_event(&mut state, Event::PageArrived { ticket, result: Ok(more) });
        assert_eq!(state.players.len(), 14);
        assert_eq!(state.players[10].id, "q0");
        assert!(!state.has_more_players);
        // Teams untouched.
        assert_eq!(state.teams.len(), 2);
    }

    #[test]
    fn load_more_teams_uses_team_count() {
        let mut state = SearchState::default();
        searched(&mut state, "United", page(1, 10));

        let (_, actions) = handle_event(&mut state, Event::LoadMoreTeams);
        let (ticket, query) = search_action(&actions);
        assert_eq!(query.kind, Some(SearchKind::Teams));
        assert_eq!(query.offset, Some(10));

        let more = ResultPage::new(vec![], teams("u", 10), DEFAULT_PAGE_SIZE);
        handle_event(&mut state, Event::PageArrived { ticket, result: Ok(more) });
        assert_eq!(state.teams.len(), 20);
        assert!(state.has_more_teams);
        assert_eq!(state.players.len(), 1);
    }

    #[test]
    fn load_more_is_ignored_without_more_or_while_busy() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(3, 10));

        let (changed, actions) = handle_event(&mut state, Event::LoadMorePlayers);
        assert!(!changed);
        assert!(actions.is_empty());

        handle_event(&mut state, Event::LoadMoreTeams);
        assert_eq!(state.in_flight(), Some(InFlight::MoreTeams));
        let (_, actions) = handle_event(&mut state, Event::LoadMoreTeams);
        assert!(actions.is_empty());
    }

    #[test]
    fn load_more_is_ignored_during_full_search() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 10));
        type_and_settle(&mut state, "Becks");

        let (_, actions) = handle_event(&mut state, Event::LoadMorePlayers);
        assert!(actions.is_empty());
        assert_eq!(state.in_flight(), Some(InFlight::FullSearch));
    }

    #[test]
    fn full_search_drops_in_flight_load_more() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 10));
        let (more_ticket, _) = search_action(&handle_event(&mut state, Event::LoadMorePlayers).1);

        let (full_ticket, _) = search_action(&type_and_settle(&mut state, "Owen"));
        let (changed, _) = handle_event(
            &mut state,
            Event::PageArrived {
                ticket: more_ticket,
                result: Ok(ResultPage::new(players("x", 10), vec![], DEFAULT_PAGE_SIZE)),
            },
        );
        assert!(!changed);
        assert_eq!(state.players.len(), 10);

        handle_event(&mut state, Event::PageArrived { ticket: full_ticket, result: Ok(page(2, 0)) });
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn load_more_failure_keeps_accumulated_results() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(10, 0));
        let (ticket, _) = search_action(&handle_event(&mut state, Event::LoadMorePlayers).1);

        handle_event(&mut state, Event::PageArrived { ticket, result: failure() });
        assert!(state.error_visible);
        assert_eq!(state.players.len(), 10);
        assert!(state.has_more_players);
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn favorite_toggle_picks_write() {
        let mut state = SearchState::default();
        let player = Player::new("1", "David", "Beckham");

        let (changed, actions) = handle_event(
            &mut state,
            Event::FavoriteToggled {
                player: player.clone(),
                was_favorite: false,
            },
        );
        assert!(!changed);
        assert_eq!(actions, vec![Action::UpsertFavorite(player.clone())]);

        let (_, actions) = handle_event(
            &mut state,
            Event::FavoriteToggled {
                player: player.clone(),
                was_favorite: true,
            },
        );
        assert_eq!(actions, vec![Action::RemoveFavorite(player)]);
    }

    #[test]
    fn favorites_lookup_for_other_text_is_ignored() {
        let mut state = SearchState::default();
        searched(&mut state, "Beck", page(3, 0));

        let ids: HashSet<String> = ["p1".to_string()].into();
        let (changed, _) = handle_event(
            &mut state,
            Event::FavoritesChanged {
                lookup: "Bec".to_string(),
                ids: ids.clone(),
            },
        );
        assert!(!changed);
        assert!(state.favorite_ids.is_empty());

        let (changed, _) = handle_event(
            &mut state,
            Event::FavoritesChanged {
                lookup: "Beck".to_string(),
                ids: ids.clone(),
            },
        );
        assert!(changed);
        assert_eq!(state.favorite_ids, ids);
        assert!(state.view_model().players[1].is_favourite);

        // Same ids again: nothing to publish.
        let (changed, _) = handle_event(
            &mut state,
            Event::FavoritesChanged {
                lookup: "Beck".to_string(),
                ids,
            },
        );
        assert!(!changed);
    }

    #[test]
    fn favorites_screen_lifecycle() {
        let mut state = SearchState::default();
        let record = FavoriteRecord::from_player(&Player::new("1", "Ian", "Rush"));

        // Listings before the screen opens are ignored.
        let (changed, _) = handle_event(&mut state, Event::FavoritesListed(vec![record.clone()]));
        assert!(!changed);

        let (_, actions) = handle_event(&mut state, Event::ShowFavorites);
        assert_eq!(actions, vec![Action::WatchFavoritesList(true)]);
        let (_, actions) = handle_event(&mut state, Event::ShowFavorites);
        assert!(actions.is_empty());

        handle_event(&mut state, Event::FavoritesListed(vec![record]));
        assert_eq!(state.favorites.len(), 1);

        let (_, actions) = handle_event(&mut state, Event::HideFavorites);
        assert_eq!(actions, vec![Action::WatchFavoritesList(false)]);
        assert!(state.favorites.is_empty());
        assert!(!state.favorites_shown);
    }

    #[test]
    fn flags_loaded_replaces_directory() {
        let mut state = SearchState::default();
        let flags = FlagDirectory::parse(r#"[{"name": "England", "emoji": "E"}]"#).unwrap();
        let (changed, _) = handle_event(&mut state, Event::FlagsLoaded(flags));
        assert!(changed);
        assert_eq!(state.flags.get("England"), Some("E"));
    }
}
