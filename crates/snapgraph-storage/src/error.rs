//! Storage error types for snapgraph-storage.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite backend failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the write (used by backends with no durable
    /// medium behind them, e.g. a full or read-only store).
    #[error("write rejected for key '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}
