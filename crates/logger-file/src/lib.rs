//! Rotating segment files for rotalog loggers.
//!
//! This crate owns everything a logger does on disk:
//! - Line-count based rotation into `<stem>.<YYYY-MM-DD_HH-MM-SS>.<ext>` archives
//! - Recovery of archive history from earlier runs by glob enumeration
//! - Eviction of the oldest archives beyond a retention limit
//! - Periodic flushing of buffered output

#![warn(missing_docs, unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod history;
mod naming;
mod segment;

pub use config::{DEFAULT_FLUSH_INTERVAL, FileLoggerConfig};
pub use error::{Error, Result};
pub use history::{ArchiveHistory, ArchivedFile};
pub use naming::{ARCHIVE_TIMESTAMP_FORMAT, ArchiveNaming};
pub use segment::RotatingFile;
