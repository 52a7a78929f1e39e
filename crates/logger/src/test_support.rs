//! Test support utilities
//!
//! Sinks that record or reject entries so destination behaviour can be
//! asserted without touching stdout. Only available with the `test-support`
//! feature.

use crate::{LogEntry, Sink};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// A sink that keeps every entry it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Captured text with the trailing newline removed from each entry.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.text.trim_end_matches('\n').to_string())
            .collect()
    }

    /// Number of captured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether any captured entry contains `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|entry| entry.text.contains(text))
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Sink for CaptureSink {
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}

/// A sink whose every write and flush fails, counting the write attempts.
#[derive(Clone, Debug, Default)]
pub struct FailingSink {
    attempts: Arc<Mutex<usize>>,
}

impl FailingSink {
    /// Create a failing sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many writes were attempted.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl Sink for FailingSink {
    fn write_entry(&self, _entry: &LogEntry) -> io::Result<()> {
        *self.attempts.lock() += 1;
        Err(io::Error::other("sink unavailable"))
    }

    fn flush(&self) -> io::Result<()> {
        Err(io::Error::other("sink unavailable"))
    }
}
