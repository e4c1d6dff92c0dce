//! Filesystem locations for the favorites store and trace files.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "football-search";

/// Returns the default data directory.
///
/// Resolves to `$XDG_DATA_HOME/football-search`, then
/// `$HOME/.local/share/football-search`, and finally a `.football-search`
/// directory under the working directory when neither variable is set.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    home.map_or_else(
        || PathBuf::from(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or with no `HOME` set, are returned as-is.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Path of the favorites store inside `data_dir`.
#[must_use]
pub fn favorites_file(data_dir: &Path) -> PathBuf {
    data_dir.join("favorites.json")
}

/// Path of the OTLP trace file inside `data_dir`.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{APP_DIR}-otlp.json"))
}
