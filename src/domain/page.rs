//! Outbound queries and decoded result pages.

use super::player::{Player, Team};
use serde::{Deserialize, Serialize};

/// Number of items the catalog returns per full page.
///
/// The server never states its page size; a page holding at least this many
/// items is taken to mean more may follow.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which half of the catalog a query targets. `None` on a query means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Players,
    Teams,
}

/// One outbound catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub kind: Option<SearchKind>,
    pub offset: Option<usize>,
    pub request_order: Option<u64>,
}

impl SearchQuery {
    /// Query for the first page of players and teams.
    pub fn both(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            kind: None,
            offset: Some(0),
            request_order: None,
        }
    }

    /// Query for the next page of one kind, starting at `offset`.
    pub fn more(text: impl Into<String>, kind: SearchKind, offset: usize) -> Self {
        Self {
            text: text.into().trim().to_string(),
            kind: Some(kind),
            offset: Some(offset),
            request_order: None,
        }
    }

    #[must_use]
    pub const fn with_request_order(mut self, order: u64) -> Self {
        self.request_order = Some(order);
        self
    }
}

/// A decoded page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub has_more_players: bool,
    pub has_more_teams: bool,
}

impl ResultPage {
    /// Builds a page and derives both has-more flags from `page_size`.
    #[must_use]
    pub fn new(players: Vec<Player>, teams: Vec<Team>, page_size: usize) -> Self {
        Self {
            has_more_players: has_more(players.len(), page_size),
            has_more_teams: has_more(teams.len(), page_size),
            players,
            teams,
        }
    }
}

/// Page-size heuristic: an empty page never has more, a full one might.
///
/// ```
/// use football_search::domain::page::has_more;
///
/// assert!(has_more(10, 10));
/// assert!(!has_more(3, 10));
/// assert!(!has_more(0, 10));
/// ```
#[must_use]
pub const fn has_more(count: usize, page_size: usize) -> bool {
    count != 0 && count >= page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(i.to_string(), "First", "Last")).collect()
    }

    #[test]
    fn has_more_follows_page_size() {
        assert!(ResultPage::new(players(10), vec![], DEFAULT_PAGE_SIZE).has_more_players);
        assert!(!ResultPage::new(players(3), vec![], DEFAULT_PAGE_SIZE).has_more_players);
        assert!(!ResultPage::new(players(0), vec![], DEFAULT_PAGE_SIZE).has_more_players);
        assert!(!ResultPage::new(players(0), vec![], 0).has_more_players);
    }

    #[test]
    fn queries_trim_their_text() {
        let query = SearchQuery::both("  Beck ");
        assert_eq!(query.text, "Beck");
        assert_eq!(query.offset, Some(0));
        assert_eq!(query.kind, None);

        let more = SearchQuery::more("Beck\n", SearchKind::Teams, 20).with_request_order(3);
        assert_eq!(more.text, "Beck");
        assert_eq!(more.kind, Some(SearchKind::Teams));
        assert_eq!(more.request_order, Some(3));
    }
}
