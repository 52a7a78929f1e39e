//! Reporting of the logger's own faults
//!
//! A logger cannot rely on itself to report that it is broken. Faults go to
//! the global `tracing` dispatcher when one is installed, and are otherwise
//! printed straight to the debugger channel.

use crate::{DebuggerSink, Level, LogEntry, Sink};
use std::fmt;

/// Target of every `tracing` event emitted for internal faults.
pub const TARGET: &str = "rotalog::internal";

/// Whether events from `target` originate inside rotalog.
///
/// Bridges that feed foreign log events into a logger must skip these so a
/// failing logger does not report into itself.
#[must_use]
pub fn is_internal_target(target: &str) -> bool {
    target.starts_with("rotalog")
}

/// Report an internal fault.
pub fn report(level: Level, args: fmt::Arguments<'_>) {
    if tracing::dispatcher::has_been_set() {
        match level {
            Level::Debug => tracing::debug!(target: "rotalog::internal", "{args}"),
            Level::Info => tracing::info!(target: "rotalog::internal", "{args}"),
            Level::Warn => tracing::warn!(target: "rotalog::internal", "{args}"),
            Level::Error => tracing::error!(target: "rotalog::internal", "{args}"),
        }
        return;
    }

    let entry = LogEntry::new(level, format!("[rotalog] [{}] {args}\n", level.tag()));
    let _ = DebuggerSink.write_entry(&entry);
}
