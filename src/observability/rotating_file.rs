//! Append-only line writer that rotates by size.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the file grows past this many bytes.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe line writer.
///
/// The file is opened lazily on the first write. Before each write the
/// current size is checked; an oversized file is renamed to
/// `<name>.<unix seconds>` and the oldest backups beyond the retention limit
/// are deleted.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, flushing immediately.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error
    /// if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().timestamp();
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.path, PathBuf::from(backup))?;
        prune_backups(&self.path, MAX_BACKUP_FILES)
    }
}

/// Deletes all but the `keep` newest `<name>.*` siblings of `path`.
fn prune_backups(path: &Path, keep: usize) -> io::Result<()> {
    let (Some(dir), Some(name)) = (path.parent(), path.file_name().and_then(|n| n.to_str())) else {
        return Ok(());
    };
    let prefix = format!("{name}.");

    let mut backups: Vec<(std::time::SystemTime, PathBuf)> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_name().to_str().is_some_and(|n| n.starts_with(&prefix)))
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, entry.path()))
        })
        .collect();

    backups.sort_by(|a, b| b.cmp(a));
    for (_, old) in backups.into_iter().skip(keep) {
        let _ = fs::remove_file(old);
    }
    Ok(())
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
