//! Remote catalog client.
//!
//! One call issues one paginated search: players and teams together, or a
//! single kind starting at an offset. There is no retry at this layer; a
//! failure goes straight back to the caller.
//!
//! # Modules
//!
//! - `wire`: request body and lenient response envelope
//! - `http`: the `reqwest` implementation

pub mod http;
pub mod wire;

pub use http::HttpCatalogClient;

use crate::domain::{CatalogError, ResultPage, SearchQuery};
use async_trait::async_trait;

/// Anything that can answer a catalog search.
///
/// The coordinator only knows this trait, so tests substitute scripted
/// fakes for the HTTP client.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Runs one search. `query.text` is never empty here: the coordinator
    /// does not call out for blank text.
    async fn search(&self, query: &SearchQuery) -> Result<ResultPage, CatalogError>;
}
