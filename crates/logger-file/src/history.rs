//! Archive history: recovery, ordering and eviction

use crate::{ArchiveNaming, Result};
use chrono::{DateTime, Local};
use rotalog_logger::{Level, internal};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An archived segment on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFile {
    /// Location of the archive
    pub path: PathBuf,
    /// When the segment was archived; archives are evicted oldest first
    pub archived_at: SystemTime,
}

impl ArchivedFile {
    /// An archive rotated at `at`.
    #[must_use]
    pub fn new(path: PathBuf, at: DateTime<Local>) -> Self {
        Self {
            path,
            archived_at: at.into(),
        }
    }

    /// Describe an archive found on disk.
    ///
    /// The timestamp embedded in the file name is authoritative. Names that
    /// do not carry one fall back to the creation time, then the
    /// modification time, then the current time.
    #[must_use]
    pub fn recover(path: PathBuf, naming: &ArchiveNaming) -> Self {
        if let Some(at) = naming.archived_at(&path) {
            return Self::new(path, at);
        }

        let archived_at = fs::metadata(&path)
            .and_then(|metadata| metadata.created().or_else(|_| metadata.modified()))
            .unwrap_or_else(|_| SystemTime::now());
        Self { path, archived_at }
    }
}

/// Archives of one segment, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ArchiveHistory {
    files: Vec<ArchivedFile>,
}

impl ArchiveHistory {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Rebuild the history of `naming` from the archives already on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob pattern cannot be built. Entries that
    /// cannot be read are reported and skipped.
    pub fn scan(naming: &ArchiveNaming) -> Result<Self> {
        let mut history = Self::new();

        for entry in glob::glob(&naming.glob_pattern())? {
            match entry {
                Ok(path) if path.is_file() => history.insert(ArchivedFile::recover(path, naming)),
                Ok(_) => {}
                Err(e) => internal::report(
                    Level::Warn,
                    format_args!("skipping unreadable archive {}: {e}", e.path().display()),
                ),
            }
        }

        Ok(history)
    }

    /// Add an archive, keeping the history sorted by archive time.
    ///
    /// An existing entry for the same path is replaced.
    pub fn insert(&mut self, file: ArchivedFile) {
        self.files.retain(|existing| existing.path != file.path);

        let key = (file.archived_at, &file.path);
        let index = self
            .files
            .partition_point(|existing| (existing.archived_at, &existing.path) <= key);
        self.files.insert(index, file);
    }

    /// Delete the oldest archives until at most `keep` remain.
    ///
    /// Evicted archives leave the history even if deleting them fails; the
    /// failure is reported. Returns the evicted paths, oldest first.
    pub fn evict(&mut self, keep: usize) -> Vec<PathBuf> {
        let excess = self.files.len().saturating_sub(keep);
        let evicted: Vec<PathBuf> = self.files.drain(..excess).map(|file| file.path).collect();

        for path in &evicted {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => internal::report(
                    Level::Error,
                    format_args!(
                        "{}",
                        crate::Error::Evict {
                            path: path.clone(),
                            source,
                        }
                    ),
                ),
            }
        }

        evicted
    }

    /// Number of archives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether there are no archives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Archives, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ArchivedFile> {
        self.files.iter()
    }

    /// Archive paths, oldest first.
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|file| file.path.as_path()).collect()
    }
}
