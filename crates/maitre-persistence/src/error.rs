//! Error types for persistence operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file does not exist. Stores are never auto-created;
    /// this is fatal at open time.
    #[error("store unavailable: {path} does not exist")]
    Unavailable { path: PathBuf },

    /// A persisted record failed to decode. A corrupt store is
    /// unrecoverable without operator intervention.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read from the file system.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the file system.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize records to JSON.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;
