//! Country name to flag emoji lookup.
//!
//! The directory is read-only. The bundled table is compiled into the binary
//! and parsed at most once per process; a configured file replaces it. A
//! source that cannot be read or parsed yields an empty directory and an
//! error log line, never a failure.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const BUNDLED_FLAGS: &str = include_str!("../assets/flags.json");

static BUNDLED: OnceLock<FlagDirectory> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct FlagEntry {
    name: String,
    emoji: String,
}

/// Immutable `country name -> emoji` map. Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagDirectory {
    flags: Arc<HashMap<String, String>>,
}

impl FlagDirectory {
    /// The table shipped with the crate.
    pub fn bundled() -> Self {
        BUNDLED
            .get_or_init(|| Self::parse_or_empty("bundled", BUNDLED_FLAGS))
            .clone()
    }

    /// Reads a `[{name, emoji}]` JSON file.
    pub fn from_file(path: &Path) -> Self {
        let _span = tracing::debug_span!("load_flags", path = %path.display()).entered();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_or_empty(&path.display().to_string(), &contents),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "unable to read flags file");
                Self::default()
            }
        }
    }

    /// The configured file if there is one, else the bundled table.
    pub fn load(path: Option<&Path>) -> Self {
        path.map_or_else(Self::bundled, Self::from_file)
    }

    /// Parses a `[{name, emoji}]` JSON array. Later duplicates win.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<FlagEntry> = serde_json::from_str(json)?;
        let flags = entries.into_iter().map(|e| (e.name, e.emoji)).collect();
        Ok(Self { flags: Arc::new(flags) })
    }

    fn parse_or_empty(source: &str, json: &str) -> Self {
        Self::parse(json).unwrap_or_else(|e| {
            tracing::error!(source, error = %e, "unable to parse flags");
            Self::default()
        })
    }

    /// Emoji for a country name, exact match.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
