//! Error types for durable storage operations.

use thiserror::Error;

/// Errors that can occur while reading or writing durable records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be parsed or a record could not be encoded.
    #[error("storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding in-memory records was poisoned.
    #[error("storage lock poisoned")]
    LockPoisoned,
}
