//! Asynchronous rotating loggers addressed by id.
//!
//! A [`LogRegistry`] maps small integer ids to independently configured
//! [`LoggerInstance`]s. Producers render entries on their own thread and
//! push them onto the instance's queue; one background writer per instance
//! fans each entry out to the console, the debugger channel and a rotating
//! log file.
//!
//! ```no_run
//! use rotalog_registry::{CategoryMask, Destinations, Level, finalize_log, initialize_log, log_info};
//! use std::path::Path;
//!
//! initialize_log(
//!     1,
//!     CategoryMask::ALL,
//!     Level::Debug,
//!     Destinations::FILE | Destinations::CONSOLE,
//!     Some(Path::new("logs/service.log")),
//!     100_000,
//!     10,
//! );
//! log_info!(1, 0b0001, "started with {} workers", 4);
//! finalize_log(1);
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod compat;
mod config;
mod error;
mod instance;
mod macros;
mod queue;
mod registry;
mod writer;

pub use config::{LogConfig, LogEnv};
pub use error::{Error, Result};
pub use instance::{LoggerInstance, State};
pub use queue::AsyncQueue;
pub use registry::{
    LogId, LogRegistry, finalize_log, get_log_env, get_log_format, initialize_log,
    initialize_log_with_config, log_write_fmt, set_log_env, set_log_format,
};
pub use writer::POLL_INTERVAL;

pub use rotalog_logger::{
    CategoryMask, Destinations, DisplayOptions, Level, Origin, Sink, Sinks, function_name, origin,
};
