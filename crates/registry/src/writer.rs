//! Background writer loop

use crate::instance::Shared;
use rotalog_logger::{Destinations, Level, LogEntry, Sink, internal};
use rotalog_logger_file::RotatingFile;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Longest the writer waits on an empty queue before re-checking the stop flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The single consumer of a logger's queue and sole owner of its file.
pub(crate) struct BackgroundWriter {
    shared: Arc<Shared>,
    file: Option<RotatingFile>,
}

impl BackgroundWriter {
    pub(crate) const fn new(shared: Arc<Shared>, file: Option<RotatingFile>) -> Self {
        Self { shared, file }
    }

    /// Drain the queue until the stop flag is raised, then drain once more.
    ///
    /// Hands itself back so the joining thread can close the file.
    pub(crate) fn run(mut self) -> Self {
        while !self.shared.stop.load(Ordering::Acquire) {
            match self.shared.queue.pop_timeout(POLL_INTERVAL) {
                Some(entry) => self.dispatch(&entry),
                None => self.flush_file_if_due(),
            }
        }

        self.drain();
        self
    }

    /// Write everything still queued.
    pub(crate) fn drain(&mut self) {
        for entry in self.shared.queue.drain() {
            self.dispatch(&entry);
        }
    }

    /// Flush sinks and close the current segment.
    pub(crate) fn close(mut self) {
        let destinations = self.shared.destinations;
        if destinations.contains(Destinations::CONSOLE) {
            self.flush_sink("console", self.shared.sinks.console.as_ref());
        }
        if destinations.contains(Destinations::DEBUGGER) {
            self.flush_sink("debugger", self.shared.sinks.debugger.as_ref());
        }

        if let Some(mut file) = self.file.take() {
            if let Err(e) = file.close() {
                internal::report(
                    Level::Error,
                    format_args!(
                        "logger {}: closing {}: {e}",
                        self.shared.id,
                        file.path().display()
                    ),
                );
            }
        }
    }

    /// Write one entry to every enabled destination.
    ///
    /// A failing destination is reported and skipped; the others still
    /// receive the entry.
    fn dispatch(&mut self, entry: &LogEntry) {
        let destinations = self.shared.destinations;

        if destinations.contains(Destinations::CONSOLE) {
            self.write_sink("console", self.shared.sinks.console.as_ref(), entry);
        }

        if destinations.contains(Destinations::DEBUGGER) {
            self.write_sink("debugger", self.shared.sinks.debugger.as_ref(), entry);
        }

        if destinations.contains(Destinations::FILE) {
            if let Some(file) = self.file.as_mut() {
                if let Err(e) = file.write_line(&entry.text) {
                    internal::report(
                        Level::Error,
                        format_args!("logger {}: file write failed: {e}", self.shared.id),
                    );
                }
            }
            self.flush_file_if_due();
        }
    }

    /// Flush the file if its buffered output has grown older than the flush
    /// interval.
    fn flush_file_if_due(&mut self) {
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush_if_due() {
                internal::report(
                    Level::Error,
                    format_args!("logger {}: periodic flush failed: {e}", self.shared.id),
                );
            }
        }
    }

    fn flush_sink(&self, name: &str, sink: &dyn Sink) {
        if let Err(e) = sink.flush() {
            internal::report(
                Level::Warn,
                format_args!("logger {}: {name} flush failed: {e}", self.shared.id),
            );
        }
    }

    fn write_sink(&self, name: &str, sink: &dyn Sink, entry: &LogEntry) {
        if let Err(e) = sink.write_entry(entry) {
            internal::report(
                Level::Warn,
                format_args!("logger {}: {name} write failed: {e}", self.shared.id),
            );
        }
    }
}
