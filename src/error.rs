//! Error types

use std::io;
use thiserror::Error;

/// Main error type for connection resolution
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid connection parameters, detected before any network I/O
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport to the graph service or discovery service could not be established
    #[error("connection error: {0}")]
    Connection(String),

    /// Discovery service rejected the supplied credentials
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Error raised by an underlying client implementation, passed through untouched
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// I/O error (reading TLS material, configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a foreign transport error without altering its message
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// Whether this error comes from invalid parameters rather than the network
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Short, stable name for this error kind (used as a metrics label)
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Connection(_) => "connection",
            Error::Authentication(_) => "authentication",
            Error::Transport(_) => "transport",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
