//! Domain layer: players, teams, queries, result pages and errors.
//!
//! Nothing in here performs I/O. The types are shared by the catalog client,
//! the favorites store and the search coordinator.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`player`]: `Player` and `Team` models
//! - [`page`]: `SearchQuery`, `ResultPage` and the has-more heuristic

pub mod error;
pub mod page;
pub mod player;

pub use error::{CatalogError, FootballError, NetworkError, Result};
pub use page::{ResultPage, SearchKind, SearchQuery, DEFAULT_PAGE_SIZE};
pub use player::{Player, Team};
