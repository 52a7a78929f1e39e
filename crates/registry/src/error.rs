//! Error types for logger registration and lifecycle

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or starting a logger
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration is inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The log directory or a segment file could not be prepared
    #[error(transparent)]
    Resource(#[from] rotalog_logger_file::Error),

    /// The background writer thread could not be spawned
    #[error("failed to spawn writer thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
