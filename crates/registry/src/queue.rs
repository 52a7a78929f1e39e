//! Multi-producer, single-consumer entry queue

use parking_lot::{Condvar, Mutex};
use rotalog_logger::LogEntry;
use std::collections::VecDeque;
use std::time::Duration;

/// Unbounded FIFO of rendered entries owned by one logger instance.
///
/// Any number of producers push; exactly one background writer pops.
/// Producers only ever hold the lock for an append. The consumer blocks on
/// a condition variable rather than sleeping, so a push wakes it at once.
#[derive(Debug, Default)]
pub struct AsyncQueue {
    entries: Mutex<VecDeque<LogEntry>>,
    ready: Condvar,
}

impl AsyncQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and wake the consumer.
    pub fn push(&self, entry: LogEntry) {
        self.entries.lock().push_back(entry);
        self.ready.notify_one();
    }

    /// Remove the oldest entry without waiting.
    pub fn pop(&self) -> Option<LogEntry> {
        self.entries.lock().pop_front()
    }

    /// Remove the oldest entry, waiting up to `timeout` for one to arrive.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<LogEntry> {
        let mut entries = self.entries.lock();
        if entries.is_empty() {
            let _ = self.ready.wait_for(&mut entries, timeout);
        }
        entries.pop_front()
    }

    /// Remove every queued entry, oldest first.
    pub fn drain(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock()).into()
    }

    /// Wake a consumer blocked in [`pop_timeout`](Self::pop_timeout).
    pub fn wake(&self) {
        let _entries = self.entries.lock();
        self.ready.notify_all();
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
