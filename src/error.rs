//! Error types for Filebox.

use thiserror::Error;

/// Common error type for Filebox.
#[derive(Error, Debug)]
pub enum FileboxError {
    /// Bad input from the caller. Nothing was written.
    #[error("validation error: {0}")]
    Validation(String),

    /// Upload exceeds the configured size limit.
    #[error("payload too large: {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        size: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Filesystem failure (disk full, permission denied, I/O error).
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Invariant failure that should never happen in practice.
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Filebox operations.
pub type Result<T> = std::result::Result<T, FileboxError>;
