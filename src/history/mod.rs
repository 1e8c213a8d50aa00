//! Query history cache.
//!
//! Every query the user writes is a `<uuid>.sql` file in the cache
//! directory. The files form a FIFO queue ordered by modification time;
//! once the queue holds `capacity` files, the oldest is deleted to make room.

pub mod editor;

pub use editor::{open_in_editor, resolve_editor, EditorError};

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Extension of query files in the cache.
pub const QUERY_FILE_EXTENSION: &str = "sql";

/// Errors that can occur while maintaining the history cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The cache directory could not be created.
    #[error("Failed to create history directory {path}: {reason}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// The cache directory could not be listed.
    #[error("Failed to list history directory {path}: {reason}")]
    ReadDir {
        /// Directory path.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// An evicted query file could not be deleted.
    #[error("Failed to remove {path}: {reason}")]
    Remove {
        /// File path.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// A new query file could not be created.
    #[error("Failed to create {path}: {reason}")]
    CreateFile {
        /// File path.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// `--last` was requested but the cache holds no query.
    #[error("No previous query in {path}")]
    NoEntries {
        /// Directory path.
        path: PathBuf,
    },
}

/// FIFO queue of query files backed by a directory.
#[derive(Debug)]
pub struct QueryHistory {
    dir: PathBuf,
    capacity: usize,
    /// File names, oldest first.
    entries: VecDeque<String>,
}

impl QueryHistory {
    /// Open the cache at `dir`, creating it when missing.
    ///
    /// Existing files are queued oldest-first by modification time (ties by
    /// name), then the oldest are deleted until at most `capacity` remain.
    pub fn open(dir: impl Into<PathBuf>, capacity: u16) -> Result<Self, HistoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| HistoryError::CreateDir {
            path: dir.clone(),
            reason: e.to_string(),
        })?;

        let mut files = list_files(&dir)?;
        files.sort();

        let mut history = Self {
            dir,
            capacity: usize::from(capacity.max(1)),
            entries: VecDeque::with_capacity(files.len()),
        };
        for (_, name) in files {
            history.enqueue(name);
        }
        while history.entries.len() > history.capacity {
            history.evict_oldest()?;
        }

        info!(
            dir = %history.dir.display(),
            entries = history.entries.len(),
            capacity = history.capacity,
            "Opened query history"
        );
        Ok(history)
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maximum number of kept files.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued file names, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    /// Append `name` as the newest entry. Does not touch the filesystem.
    pub fn enqueue(&mut self, name: impl Into<String>) {
        self.entries.push_back(name.into());
    }

    /// Dequeue the oldest entry and delete its file.
    ///
    /// A file that is already gone is not an error.
    pub fn evict_oldest(&mut self) -> Result<Option<String>, HistoryError> {
        let Some(name) = self.entries.pop_front() else {
            return Ok(None);
        };
        let path = self.dir.join(&name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(HistoryError::Remove {
                    path,
                    reason: e.to_string(),
                })
            }
        }
        debug!(file = %name, "Evicted oldest query");
        Ok(Some(name))
    }

    /// Create an empty `<uuid>.sql` file as the newest entry and return its path.
    ///
    /// When the queue is full the oldest entry is evicted first.
    pub fn create_entry(&mut self) -> Result<PathBuf, HistoryError> {
        if self.entries.len() >= self.capacity {
            self.evict_oldest()?;
        }

        let name = format!("{}.{}", Uuid::new_v4(), QUERY_FILE_EXTENSION);
        let path = self.dir.join(&name);
        fs::File::create(&path).map_err(|e| HistoryError::CreateFile {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        self.enqueue(name);

        debug!(path = %path.display(), "Created query file");
        Ok(path)
    }

    /// Path of the most recent entry.
    pub fn latest(&self) -> Option<PathBuf> {
        self.entries.back().map(|name| self.dir.join(name))
    }

    /// Like [`latest`](Self::latest), but an empty cache is an error.
    pub fn require_latest(&self) -> Result<PathBuf, HistoryError> {
        self.latest().ok_or_else(|| HistoryError::NoEntries {
            path: self.dir.clone(),
        })
    }
}

/// Regular files in `dir` with their modification time.
fn list_files(dir: &Path) -> Result<Vec<(SystemTime, String)>, HistoryError> {
    let read_err = |e: std::io::Error| HistoryError::ReadDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let metadata = entry.metadata().map_err(read_err)?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        files.push((modified, entry.file_name().to_string_lossy().into_owned()));
    }
    Ok(files)
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
