//! `reqwest`-backed catalog client.

use super::wire::{decode_envelope, SearchRequest};
use super::CatalogClient;
use crate::domain::{CatalogError, NetworkError, ResultPage, SearchQuery};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::Instrument;

/// Path of the search endpoint relative to the base URL.
const SEARCH_PATH: &str = "search";

/// Catalog client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    endpoint: Url,
    page_size: usize,
}

impl HttpCatalogClient {
    /// Builds a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if the URL cannot be
    /// parsed or cannot carry a path, and a `RequestConstructionFailed`
    /// network error if the HTTP client cannot be built.
    pub fn new(base_url: &str, page_size: usize, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let endpoint = search_endpoint(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NetworkError::RequestConstructionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            page_size,
        })
    }

    /// Full URL requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolves `<base>/search`, tolerating a base with or without a trailing
/// slash.
fn search_endpoint(base_url: &str) -> Result<Url, CatalogError> {
    let mut base = Url::parse(base_url).map_err(|e| CatalogError::InvalidEndpoint(format!("{base_url}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(CatalogError::InvalidEndpoint(format!("{base_url}: cannot be a base URL")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SEARCH_PATH)
        .map_err(|e| CatalogError::InvalidEndpoint(format!("{base_url}: {e}")))
}

impl HttpCatalogClient {
    async fn execute(&self, query: &SearchQuery) -> Result<ResultPage, CatalogError> {
        let body = SearchRequest::from(query);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "catalog returned an error status");
            return Err(NetworkError::Transport {
                status: Some(status.as_u16()),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(NetworkError::from)?;
        let envelope = decode_envelope(&bytes).map_err(|e| NetworkError::DecodeFailed(e.to_string()))?;

        if let Some(alert) = envelope.result.server_alert.as_deref().filter(|a| !a.is_empty()) {
            tracing::info!(alert, "catalog server alert");
        }

        let page = ResultPage::new(envelope.result.players, envelope.result.teams, self.page_size);
        tracing::debug!(
            players = page.players.len(),
            teams = page.teams.len(),
            has_more_players = page.has_more_players,
            has_more_teams = page.has_more_teams,
            "catalog page decoded"
        );
        Ok(page)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultPage, CatalogError> {
        let span = tracing::debug_span!(
            "catalog_search",
            text = %query.text,
            kind = ?query.kind,
            offset = ?query.offset
        );
        self.execute(query).instrument(span).await
    }
}
