//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during file logging
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to move the current segment to its archive name
    #[error("failed to archive {from} as {to}: {source}")]
    Rename {
        /// The segment being archived
        from: PathBuf,
        /// The archive name
        to: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open a fresh segment
    #[error("failed to create log segment {path}: {source}")]
    CreateSegment {
        /// The segment path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Something recreated the base path between archiving and reopening it
    #[error("log segment {0} already exists after rotation")]
    SegmentExists(PathBuf),

    /// Failed to delete an evicted archive
    #[error("failed to evict archive {path}: {source}")]
    Evict {
        /// The archive being removed
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Writing or flushing the current segment failed
    #[error("failed to write log segment: {0}")]
    Write(#[source] io::Error),

    /// The archive glob pattern could not be built
    #[error("invalid archive pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}
