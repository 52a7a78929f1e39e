//! Output destinations other than the rotating file

use crate::{ConsoleSink, DebuggerSink, LogEntry};
use std::io;
use std::sync::Arc;

/// A destination a background writer can hand rendered entries to.
///
/// Implementations must tolerate being called from any thread; the writer
/// treats every error as local to that destination and moves on.
pub trait Sink: Send + Sync + 'static {
    /// Write one rendered entry.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the entry could not be written.
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()>;

    /// Flush anything buffered.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if flushing failed.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// The console and debugger sinks used by one logger instance.
#[derive(Clone)]
pub struct Sinks {
    /// Receives entries when `CONSOLE` is enabled
    pub console: Arc<dyn Sink>,
    /// Receives entries when `DEBUGGER` is enabled
    pub debugger: Arc<dyn Sink>,
}

impl Sinks {
    /// Create a sink pair.
    #[must_use]
    pub fn new(console: Arc<dyn Sink>, debugger: Arc<dyn Sink>) -> Self {
        Self { console, debugger }
    }
}

impl Default for Sinks {
    fn default() -> Self {
        Self {
            console: Arc::new(ConsoleSink::new()),
            debugger: Arc::new(DebuggerSink),
        }
    }
}

impl std::fmt::Debug for Sinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sinks").finish_non_exhaustive()
    }
}
