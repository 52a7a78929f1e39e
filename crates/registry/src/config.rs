//! Logger configuration

use crate::{Error, Result};
use rotalog_logger::{CategoryMask, Destinations, DisplayOptions, Level};
use rotalog_logger_file::FileLoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Admission filter of a logger: category mask plus minimum severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEnv {
    /// Categories admitted
    pub mask: CategoryMask,
    /// Lowest severity admitted
    pub level: Level,
}

impl LogEnv {
    /// Create a filter.
    #[must_use]
    pub const fn new(mask: CategoryMask, level: Level) -> Self {
        Self { mask, level }
    }

    /// Whether an entry with `mask` and `level` passes this filter.
    #[inline]
    #[must_use]
    pub fn admits(&self, mask: CategoryMask, level: Level) -> bool {
        mask.intersects(self.mask) && level.admits(self.level)
    }
}

/// Configuration of one logger instance.
///
/// Deserializes from documents such as:
///
/// ```toml
/// log_mask = 4294967295
/// log_level = "info"
/// log_to = "FILE | CONSOLE"
/// log_file_path = "logs/service.log"
/// max_log_count = 50000
/// max_log_files = 5
/// flush_interval_ms = 10000
///
/// [display]
/// show_pid_tid = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Categories admitted
    pub log_mask: CategoryMask,
    /// Lowest severity admitted
    pub log_level: Level,
    /// Destinations each entry is written to
    pub log_to: Destinations,
    /// Live segment path; required when `log_to` contains `FILE`
    pub log_file_path: Option<PathBuf>,
    /// Lines per segment before rotation; `0` disables rotation
    pub max_log_count: u64,
    /// Archives retained after eviction
    pub max_log_files: usize,
    /// Maximum age of unflushed file output, in milliseconds
    pub flush_interval_ms: u64,
    /// Initial display options
    pub display: DisplayOptions,
}

impl LogConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the document is malformed.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Set the category mask.
    #[must_use]
    pub fn with_mask(mut self, mask: CategoryMask) -> Self {
        self.log_mask = mask;
        self
    }

    /// Set the minimum severity.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set the destinations.
    #[must_use]
    pub fn with_destinations(mut self, destinations: Destinations) -> Self {
        self.log_to = destinations;
        self
    }

    /// Set the live segment path.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    /// Set the lines per segment.
    #[must_use]
    pub fn with_max_log_count(mut self, max_log_count: u64) -> Self {
        self.max_log_count = max_log_count;
        self
    }

    /// Set the number of retained archives.
    #[must_use]
    pub fn with_max_log_files(mut self, max_log_files: usize) -> Self {
        self.max_log_files = max_log_files;
        self
    }

    /// Set the maximum age of unflushed file output.
    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the initial display options.
    #[must_use]
    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    /// The admission filter this configuration starts with.
    #[must_use]
    pub const fn env(&self) -> LogEnv {
        LogEnv::new(self.log_mask, self.log_level)
    }

    /// Check the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if file output is requested without a path.
    pub fn validate(&self) -> Result<()> {
        if self.log_to.contains(Destinations::FILE) && self.log_file_path.is_none() {
            return Err(Error::Configuration(
                "file output requested without log_file_path".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings for the rotating file, if file output is enabled.
    #[must_use]
    pub fn file_config(&self) -> Option<FileLoggerConfig> {
        if !self.log_to.contains(Destinations::FILE) {
            return None;
        }

        self.log_file_path.as_ref().map(|path| {
            FileLoggerConfig::new(path)
                .with_max_lines(self.max_log_count)
                .with_max_files(self.max_log_files)
                .with_flush_interval(Duration::from_millis(self.flush_interval_ms))
        })
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_mask: CategoryMask::ALL,
            log_level: Level::Info,
            log_to: Destinations::CONSOLE,
            log_file_path: None,
            max_log_count: 100_000,
            max_log_files: 10,
            flush_interval_ms: 30_000,
            display: DisplayOptions::default(),
        }
    }
}
