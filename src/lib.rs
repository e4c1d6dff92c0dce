//! football-search: search a remote catalog of football players and teams.
//!
//! The crate provides:
//! - Debounced, paginated search over players and teams
//! - Locally persisted favourite players, kept in sync with the results
//! - Country flags next to teams
//! - A message-driven coordinator publishing typed state snapshots

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line driver (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Search Coordinator (app/)                          │  ← State machine
//! │  - Event handling, debounce, stale-response guard   │
//! │  - Action execution on a tokio task                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Favorites     │   │ Flags         │
//! │ (catalog/)    │   │ (worker/,     │   │ (flags)       │
//! │ - HTTP client │   │  storage/)    │   │ - Bundled map │
//! │ - Wire format │   │ - JSON file   │   │ - File map    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths (infrastructure/)                          │
//! │  - Players, teams, pages, errors (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Search coordinator with event/action model
//! - [`catalog`]: Remote catalog client
//! - [`domain`]: Players, teams, queries, pages and errors
//! - [`flags`]: Country flag lookup
//! - [`infrastructure`]: Filesystem locations
//! - [`storage`]: JSON file persistence for favorites
//! - [`worker`]: Thread owning the favorites storage
//! - [`ui`]: View models and a text renderer
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Every field is optional:
//!
//! ```toml
//! base_url = "https://trials.mtcmobile.co.uk/api/football/1.0/"
//! debounce_ms = 400
//! page_size = 10
//! request_timeout_secs = 15
//! data_dir = "~/.local/share/football-search"
//! flags_file = "~/flags.json"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use football_search::{initialize, Config};
//!
//! # async fn run() -> football_search::Result<()> {
//! let coordinator = initialize(&Config::default())?;
//! let mut snapshots = coordinator.subscribe();
//!
//! coordinator.text_changed("Beck")?;
//! while snapshots.changed().await.is_ok() {
//!     let vm = snapshots.borrow_and_update().view_model();
//!     println!("{}", football_search::ui::render(&vm));
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod flags;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, CoordinatorHandle, CoordinatorOptions, Event, SearchCoordinator, SearchState};
pub use catalog::{CatalogClient, HttpCatalogClient};
pub use domain::{CatalogError, FootballError, NetworkError, Player, Result, ResultPage, SearchQuery, Team};
pub use flags::FlagDirectory;
pub use worker::{FavoritesHandle, FavoritesStore};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Catalog used when no `base_url` is configured.
pub const DEFAULT_BASE_URL: &str = "https://trials.mtcmobile.co.uk/api/football/1.0/";

/// Client configuration, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog base URL; requests go to `<base_url>/search`.
    pub base_url: String,

    /// Quiet period after the last keystroke, in milliseconds.
    pub debounce_ms: u64,

    /// Page size the catalog is assumed to use for has-more detection.
    pub page_size: usize,

    /// Per-request timeout. No timeout when unset.
    pub request_timeout_secs: Option<u64>,

    /// Directory for `favorites.json` and trace files. See
    /// [`infrastructure::get_data_dir`] for the default.
    pub data_dir: Option<PathBuf>,

    /// `[{name, emoji}]` JSON file replacing the bundled flags.
    pub flags_file: Option<PathBuf>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: app::DEFAULT_DEBOUNCE.as_millis().try_into().unwrap_or(400),
            page_size: domain::DEFAULT_PAGE_SIZE,
            request_timeout_secs: None,
            data_dir: None,
            flags_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Config`] for malformed TOML, unknown keys or
    /// a zero page size.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| FootballError::Config(e.to_string()))?;
        if config.page_size == 0 {
            return Err(FootballError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Io`] if the file cannot be read, otherwise
    /// as [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(infrastructure::expand_tilde(path))?;
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Configured data directory with `~` expanded, or the default one.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, infrastructure::expand_tilde)
    }

    #[must_use]
    pub fn resolved_flags_file(&self) -> Option<PathBuf> {
        self.flags_file.as_deref().map(infrastructure::expand_tilde)
    }

    #[must_use]
    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            debounce: self.debounce(),
            flags_file: self.resolved_flags_file(),
        }
    }
}

/// Wires the HTTP catalog client and the on-disk favorites store into a
/// running coordinator. Must be called from within a tokio runtime.
///
/// # Errors
///
/// Fails if the base URL is unusable, the data directory cannot be created,
/// or the favorites store cannot be opened.
pub fn initialize(config: &Config) -> Result<CoordinatorHandle> {
    let _span = tracing::debug_span!("initialize", base_url = %config.base_url).entered();

    let catalog = HttpCatalogClient::new(&config.base_url, config.page_size, config.request_timeout())?;

    let data_dir = config.resolved_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let store = FavoritesHandle::open(infrastructure::favorites_file(&data_dir))?;
    tracing::debug!(data_dir = %data_dir.display(), endpoint = %catalog.endpoint(), "search client initialized");

    Ok(SearchCoordinator::spawn(
        Arc::new(catalog),
        Arc::new(store),
        config.coordinator_options(),
    ))
}
