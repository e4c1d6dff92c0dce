//! Error types for the football search client.
//!
//! Errors are layered the same way the crate is: the catalog client reports
//! [`NetworkError`], the coordinator boundary sees [`CatalogError`], and
//! everything that touches configuration, storage or the worker thread
//! reports the crate-wide [`FootballError`]. All of them are built with
//! `thiserror`.

use thiserror::Error;

/// Failure of a single request against the remote catalog.
///
/// None of these are retried by the client. The coordinator collapses all of
/// them into one user-visible error flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The request could not be built (bad endpoint URL, unencodable body).
    #[error("unable to construct request: {0}")]
    RequestConstructionFailed(String),

    /// The response body did not match the expected envelope.
    #[error("unable to decode response: {0}")]
    DecodeFailed(String),

    /// Connectivity failure or a non-success HTTP status.
    #[error("transport error (status {status:?}): {message}")]
    Transport {
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// Anything the transport reported that fits no other category.
    #[error("unknown network error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestConstructionFailed(err.to_string())
        } else if err.is_decode() {
            Self::DecodeFailed(err.to_string())
        } else if err.is_status() || err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Transport {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Error surfaced by a [`CatalogClient`](crate::catalog::CatalogClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The configured base URL is not usable.
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request itself failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Crate-wide error type for configuration, storage and worker failures.
#[derive(Debug, Error)]
pub enum FootballError {
    /// Reading or writing the favorites store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The favorites worker thread or the coordinator task is gone.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A catalog request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, FootballError>;
