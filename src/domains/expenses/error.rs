//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the expense store.
///
/// Neither variant is retried; callers report them to the client as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened (missing directory, permissions, ...).
    #[error("Storage unavailable at {path:?}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed after the connection was opened (disk full, locked, ...).
    #[error("Storage query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    /// Create an "unavailable" error for the given database path.
    pub fn unavailable(path: impl Into<PathBuf>, source: rusqlite::Error) -> Self {
        Self::Unavailable {
            path: path.into(),
            source,
        }
    }
}
