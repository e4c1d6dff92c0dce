//! Display-ready projections of the search state.
//!
//! View models are computed by [`SearchState::view_model`] and hold no
//! behaviour: every string is already formatted, every flag already
//! resolved. Front-ends render them as they see fit.
//!
//! [`SearchState::view_model`]: crate::app::SearchState::view_model

/// Overlay drawn over the result list instead of (or on top of) its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListOverlay {
    /// A full search is running.
    Spinner,
    /// Nothing has been typed yet.
    StartSearching,
    /// The last search matched neither players nor teams.
    NoResults,
}

/// State of a "more players" / "more teams" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoreButton {
    Hidden,
    Shown,
    /// The next page is being fetched.
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCell {
    pub id: String,
    pub name: String,
    pub age: String,
    pub club: String,
    pub is_favourite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCell {
    pub id: String,
    pub name: String,
    pub city: String,
    pub stadium: String,
    /// Flag emoji for the team's nationality, or empty when unknown.
    pub flag: String,
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewModel {
    /// Raw text as typed.
    pub search_text: String,
    pub overlay: Option<ListOverlay>,
    pub players: Vec<PlayerCell>,
    pub teams: Vec<TeamCell>,
    pub more_players: MoreButton,
    pub more_teams: MoreButton,
    /// Favorites screen rows; `None` while the screen is closed.
    pub favorites: Option<Vec<PlayerCell>>,
    /// Whether the network error alert is up.
    pub error_visible: bool,
}
