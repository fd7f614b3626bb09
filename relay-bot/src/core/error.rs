//! Error types for the relay bot.
//!
//! [`RelayError`] is the single error type for core operations. Failures are isolated to the
//! update being handled; none of them is process-fatal.

use storage::StorageError;
use thiserror::Error;

/// Top-level error for the relay (platform transport, auth, remote sources, storage, config, IO).
#[derive(Error, Debug)]
pub enum RelayError {
    /// Network or API failure calling the platform or a remote document source.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Webhook secret missing or mismatched.
    #[error("Unauthorized request")]
    Auth,

    /// Word-list or start-message document could not be fetched or decoded.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The keyword persistence sink rejected the write.
    #[error("Persist conflict: {0}")]
    PersistConflict(String),

    /// No relay mapping for a reply context.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
