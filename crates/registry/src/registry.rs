//! Process-wide map of logger ids to instances

use crate::instance::{LoggerInstance, State};
use crate::{LogConfig, LogEnv, Result};
use parking_lot::RwLock;
use rotalog_logger::{
    CategoryMask, Destinations, DisplayOptions, Formatter, Level, Origin, Sinks, internal,
};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Identifier a logger is registered under.
pub type LogId = u32;

static GLOBAL: LazyLock<LogRegistry> = LazyLock::new(LogRegistry::new);

/// Registry of independently configured loggers.
///
/// Writes take the shared lock for the lookup and enqueue; only
/// registration and removal take the exclusive lock, so an instance is
/// never torn down while a producer is inside it.
#[derive(Debug)]
pub struct LogRegistry {
    loggers: RwLock<HashMap<LogId, LoggerInstance>>,
    fallback_sinks: Sinks,
    fallback_formatter: Formatter,
}

impl LogRegistry {
    /// Create an empty registry whose unknown-id fallback prints to the
    /// console and debugger.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback_sinks(Sinks::default())
    }

    /// Create an empty registry with custom fallback sinks.
    #[must_use]
    pub fn with_fallback_sinks(fallback_sinks: Sinks) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            fallback_sinks,
            fallback_formatter: Formatter::new(),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Register and start a logger using the default console and debugger sinks.
    ///
    /// See [`initialize_with_sinks`](Self::initialize_with_sinks).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the logger fails
    /// to start.
    pub fn initialize(&self, id: LogId, config: LogConfig) -> Result<()> {
        self.initialize_with_sinks(id, config, Sinks::default())
    }

    /// Register and start a logger writing to `sinks`.
    ///
    /// Registering an id that already exists logs a warning and leaves the
    /// existing logger untouched. A logger that fails to start is not
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// configuration is invalid, or the start failure otherwise.
    pub fn initialize_with_sinks(&self, id: LogId, config: LogConfig, sinks: Sinks) -> Result<()> {
        config.validate()?;

        let mut loggers = self.loggers.write();
        if loggers.contains_key(&id) {
            internal::report(
                Level::Warn,
                format_args!("logger {id} already initialized; keeping existing configuration"),
            );
            return Ok(());
        }

        let instance = LoggerInstance::new(id, config, sinks);
        instance.start()?;
        loggers.insert(id, instance);

        Ok(())
    }

    /// Stop and remove a logger, blocking until its queue is written out.
    ///
    /// The exclusive lock is held until the writer has drained and closed
    /// its file, so the id cannot be registered again while the old logger
    /// still owns its path. Writes to `id` issued meanwhile wait, then take
    /// the unknown-id fallback.
    ///
    /// Returns whether a logger was registered under `id`. Must not be
    /// called from that logger's own writer thread.
    pub fn finalize(&self, id: LogId) -> bool {
        let mut loggers = self.loggers.write();

        match loggers.remove(&id) {
            Some(instance) => {
                instance.stop();
                true
            }
            None => false,
        }
    }

    /// Finalize every registered logger.
    pub fn reset(&self) {
        let mut loggers = self.loggers.write();

        for (_, instance) in loggers.drain() {
            instance.stop();
        }
    }

    /// Replace the display options of a logger.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn set_format(&self, id: LogId, display: DisplayOptions) -> bool {
        self.with_logger(id, |logger| logger.set_format(display)).is_some()
    }

    /// Display options of a logger.
    #[must_use]
    pub fn format(&self, id: LogId) -> Option<DisplayOptions> {
        self.with_logger(id, LoggerInstance::format)
    }

    /// Replace the admission filter of a logger.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn set_env(&self, id: LogId, env: LogEnv) -> bool {
        self.with_logger(id, |logger| logger.set_env(env)).is_some()
    }

    /// Admission filter of a logger.
    #[must_use]
    pub fn env(&self, id: LogId) -> Option<LogEnv> {
        self.with_logger(id, LoggerInstance::env)
    }

    /// Lifecycle state of a logger.
    #[must_use]
    pub fn state(&self, id: LogId) -> Option<State> {
        self.with_logger(id, LoggerInstance::state)
    }

    /// Whether a logger is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: LogId) -> bool {
        self.loggers.read().contains_key(&id)
    }

    /// Number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    /// Whether no logger is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Submit an entry to logger `id`.
    ///
    /// Unknown ids fall back to a synchronous print on the fallback sinks so
    /// messages around startup and shutdown are not lost.
    pub fn write_fmt(
        &self,
        id: LogId,
        mask: CategoryMask,
        level: Level,
        origin: &Origin<'_>,
        args: fmt::Arguments<'_>,
    ) {
        let loggers = self.loggers.read();
        match loggers.get(&id) {
            Some(logger) => {
                logger.log_write(mask, level, origin, args);
            }
            None => {
                drop(loggers);
                self.write_fallback(level, origin, args);
            }
        }
    }

    /// Render with default display options and print to the fallback sinks.
    pub fn write_fallback(&self, level: Level, origin: &Origin<'_>, args: fmt::Arguments<'_>) {
        let entry = self
            .fallback_formatter
            .render(&DisplayOptions::default(), level, origin, args);

        let _ = self.fallback_sinks.console.write_entry(&entry);
        let _ = self.fallback_sinks.debugger.write_entry(&entry);
    }

    fn with_logger<R>(&self, id: LogId, f: impl FnOnce(&LoggerInstance) -> R) -> Option<R> {
        self.loggers.read().get(&id).map(f)
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register and start a logger in the process-wide registry.
///
/// Returns `false` if file output is requested without a path or the logger
/// fails to start; the reason is reported through internal diagnostics.
/// Registering an existing id returns `true` and keeps the existing logger.
pub fn initialize_log(
    id: LogId,
    mask: CategoryMask,
    level: Level,
    destinations: Destinations,
    path: Option<&Path>,
    max_lines: u64,
    max_files: usize,
) -> bool {
    let mut config = LogConfig::default()
        .with_mask(mask)
        .with_level(level)
        .with_destinations(destinations)
        .with_max_log_count(max_lines)
        .with_max_log_files(max_files);
    if let Some(path) = path {
        config = config.with_file_path(path);
    }

    initialize_log_with_config(id, config)
}

/// Register and start a logger from a complete configuration in the
/// process-wide registry.
///
/// Behaves like [`initialize_log`].
pub fn initialize_log_with_config(id: LogId, config: LogConfig) -> bool {
    match LogRegistry::global().initialize(id, config) {
        Ok(()) => true,
        Err(e) => {
            internal::report(
                Level::Error,
                format_args!("logger {id} failed to initialize: {e}"),
            );
            false
        }
    }
}

/// Stop and remove a logger from the process-wide registry.
///
/// Unknown ids are ignored.
pub fn finalize_log(id: LogId) {
    LogRegistry::global().finalize(id);
}

/// Replace the display options of a logger in the process-wide registry.
pub fn set_log_format(id: LogId, display: DisplayOptions) -> bool {
    LogRegistry::global().set_format(id, display)
}

/// Display options of a logger in the process-wide registry.
#[must_use]
pub fn get_log_format(id: LogId) -> Option<DisplayOptions> {
    LogRegistry::global().format(id)
}

/// Replace the admission filter of a logger in the process-wide registry.
pub fn set_log_env(id: LogId, mask: CategoryMask, level: Level) -> bool {
    LogRegistry::global().set_env(id, LogEnv::new(mask, level))
}

/// Admission filter of a logger in the process-wide registry.
#[must_use]
pub fn get_log_env(id: LogId) -> Option<LogEnv> {
    LogRegistry::global().env(id)
}

/// Submit an entry to a logger in the process-wide registry.
///
/// This is what the `log_*!` macros expand to.
pub fn log_write_fmt(
    id: LogId,
    mask: CategoryMask,
    level: Level,
    origin: &Origin<'_>,
    args: fmt::Arguments<'_>,
) {
    LogRegistry::global().write_fmt(id, mask, level, origin, args);
}
