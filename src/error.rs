//! Error types for server startup
//!
//! Request handling never fails outward: every per-request problem becomes an
//! HTTP status. Only startup (configuration, root resolution, bind) produces
//! these errors.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be assembled or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Host/port pair does not parse as a socket address
    #[error("Invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// Refused to bind anything but the loopback interface
    #[error("Refusing to bind non-loopback address {0}")]
    NonLoopback(SocketAddr),

    /// Root directory missing or not a directory
    #[error("Cannot serve root directory '{path}': {source}")]
    RootDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listening socket could not be created or bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
