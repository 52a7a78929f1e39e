//! Bridge from the `log` crate to a registered logger

use crate::{LogId, LogRegistry};
use rotalog_logger::{CategoryMask, Level, Origin, internal};

/// A `log::Log` implementation that forwards records to one logger.
///
/// The record's module path stands in for the function name. Records from
/// rotalog's own internals go straight to the registry's fallback sinks.
#[derive(Debug, Clone, Copy)]
pub struct LogBridge {
    registry: &'static LogRegistry,
    id: LogId,
    mask: CategoryMask,
}

impl LogBridge {
    /// Forward into logger `id` of the process-wide registry.
    #[must_use]
    pub fn new(id: LogId, mask: CategoryMask) -> Self {
        Self::with_registry(LogRegistry::global(), id, mask)
    }

    /// Forward into logger `id` of `registry`.
    #[must_use]
    pub const fn with_registry(
        registry: &'static LogRegistry,
        id: LogId,
        mask: CategoryMask,
    ) -> Self {
        Self { registry, id, mask }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        internal::is_internal_target(metadata.target())
            || self.registry.env(self.id).is_none_or(|env| {
                env.admits(self.mask, map_level(metadata.level()))
            })
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = map_level(record.level());
        let origin = Origin::new(
            record.module_path().unwrap_or_default(),
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
        );

        if internal::is_internal_target(record.target()) {
            self.registry.write_fallback(level, &origin, *record.args());
        } else {
            self.registry
                .write_fmt(self.id, self.mask, level, &origin, *record.args());
        }
    }

    fn flush(&self) {}
}

/// Map log levels to ours; `Trace` folds into `Debug`.
const fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// Install a global `log` logger that forwards every record to logger `id`
/// of the process-wide registry.
///
/// Filtering is left to the logger's own mask and level, so the `log` max
/// level is opened fully.
///
/// # Errors
///
/// Returns an error if a `log` logger is already installed.
///
/// # Example
/// ```no_run
/// use rotalog_registry::{CategoryMask, compat::init_log_bridge};
///
/// init_log_bridge(1, CategoryMask::ALL).expect("log bridge");
/// log::warn!("disk almost full");
/// ```
pub fn init_log_bridge(id: LogId, mask: CategoryMask) -> Result<(), log::SetLoggerError> {
    // log::set_logger requires 'static
    let bridge = Box::leak(Box::new(LogBridge::new(id, mask)));

    log::set_logger(bridge)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
