//! File logger configuration

use std::path::PathBuf;
use std::time::Duration;

/// Buffered output older than this is flushed by the next write.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Settings for one rotating log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoggerConfig {
    /// Path of the live segment, e.g. `logs/app.log`
    pub path: PathBuf,
    /// Lines per segment before rotating; `0` never rotates on line count
    pub max_lines: u64,
    /// Archives kept after eviction
    pub max_files: usize,
    /// Maximum age of buffered output before a flush
    pub flush_interval: Duration,
}

impl FileLoggerConfig {
    /// Create a configuration for `path` with default limits.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_lines: 100_000,
            max_files: 10,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    /// Set the lines per segment.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: u64) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the number of retained archives.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Set the periodic flush interval.
    #[must_use]
    pub fn with_flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval;
        self
    }
}
