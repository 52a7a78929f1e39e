//! One configured logger and its background writer

use crate::queue::AsyncQueue;
use crate::writer::BackgroundWriter;
use crate::{Error, LogConfig, LogEnv, Result};
use parking_lot::{Mutex, RwLock};
use rotalog_logger::{
    CategoryMask, Destinations, DisplayOptions, Formatter, Level, Origin, Sinks, internal,
};
use rotalog_logger_file::RotatingFile;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

/// Lifecycle of a [`LoggerInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// No writer thread; writes are dropped
    Stopped = 0,
    /// Resources are being opened
    Starting = 1,
    /// Accepting writes
    Running = 2,
    /// Draining and joining the writer
    Stopping = 3,
}

impl State {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Starting,
            2 => Self::Running,
            3 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// State shared between producers and the background writer.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) id: u32,
    pub(crate) queue: AsyncQueue,
    pub(crate) stop: AtomicBool,
    pub(crate) sinks: Sinks,
    pub(crate) destinations: Destinations,
}

/// A logger: filter, display options, queue and background writer.
///
/// Producers render on their own thread and only touch the queue; the
/// writer thread owns the rotating file and performs all output.
#[derive(Debug)]
pub struct LoggerInstance {
    id: u32,
    config: LogConfig,
    env: RwLock<LogEnv>,
    display: RwLock<DisplayOptions>,
    formatter: Formatter,
    state: AtomicU8,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<BackgroundWriter>>>,
}

impl LoggerInstance {
    /// Create a stopped logger.
    #[must_use]
    pub fn new(id: u32, config: LogConfig, sinks: Sinks) -> Self {
        let shared = Arc::new(Shared {
            id,
            queue: AsyncQueue::new(),
            stop: AtomicBool::new(false),
            sinks,
            destinations: config.log_to,
        });

        Self {
            id,
            env: RwLock::new(config.env()),
            display: RwLock::new(config.display),
            formatter: Formatter::new(),
            state: AtomicU8::new(State::Stopped as u8),
            shared,
            worker: Mutex::new(None),
            config,
        }
    }

    /// Open the log file and spawn the writer thread.
    ///
    /// Does nothing unless the logger is stopped. On failure the logger
    /// returns to [`State::Stopped`] and holds no resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be prepared or the thread cannot
    /// be spawned.
    pub fn start(&self) -> Result<()> {
        if self.transition(State::Stopped, State::Starting).is_err() {
            return Ok(());
        }

        match self.spawn_writer() {
            Ok(handle) => {
                *self.worker.lock() = Some(handle);
                self.state.store(State::Running as u8, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                self.state.store(State::Stopped as u8, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Stop accepting writes, drain the queue and close the file.
    ///
    /// Blocks until every entry enqueued before the call is written. Does
    /// nothing unless the logger is running.
    pub fn stop(&self) {
        if self.transition(State::Running, State::Stopping).is_err() {
            return;
        }

        self.shared.stop.store(true, Ordering::Release);
        self.shared.queue.wake();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            match handle.join() {
                Ok(mut writer) => {
                    writer.drain();
                    writer.close();
                }
                Err(_) => internal::report(
                    Level::Error,
                    format_args!("logger {}: writer thread panicked", self.id),
                ),
            }
        }

        self.state.store(State::Stopped as u8, Ordering::Release);
    }

    /// Render and enqueue an entry if the logger is running and the filter
    /// admits it.
    ///
    /// Returns whether the entry was enqueued.
    pub fn log_write(
        &self,
        mask: CategoryMask,
        level: Level,
        origin: &Origin<'_>,
        args: fmt::Arguments<'_>,
    ) -> bool {
        if self.state() != State::Running || !self.env.read().admits(mask, level) {
            return false;
        }

        let display = *self.display.read();
        let entry = self.formatter.render(&display, level, origin, args);
        self.shared.queue.push(entry);
        true
    }

    /// Replace the display options for entries rendered from now on.
    pub fn set_format(&self, display: DisplayOptions) {
        *self.display.write() = display;
    }

    /// Current display options.
    #[must_use]
    pub fn format(&self) -> DisplayOptions {
        *self.display.read()
    }

    /// Replace the admission filter.
    pub fn set_env(&self, env: LogEnv) {
        *self.env.write() = env;
    }

    /// Current admission filter.
    #[must_use]
    pub fn env(&self) -> LogEnv {
        *self.env.read()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Identifier this logger was registered under.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Configuration the logger was created with.
    #[must_use]
    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Entries enqueued but not yet written.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.shared.queue.len()
    }

    fn transition(&self, from: State, to: State) -> std::result::Result<u8, u8> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
    }

    fn spawn_writer(&self) -> Result<JoinHandle<BackgroundWriter>> {
        let file = self
            .config
            .file_config()
            .map(RotatingFile::open)
            .transpose()?;

        self.shared.stop.store(false, Ordering::Release);
        let writer = BackgroundWriter::new(Arc::clone(&self.shared), file);

        thread::Builder::new()
            .name(format!("rotalog-writer-{}", self.id))
            .spawn(move || writer.run())
            .map_err(Error::Spawn)
    }
}

impl Drop for LoggerInstance {
    fn drop(&mut self) {
        self.stop();
    }
}
