//! # Store Error Types
//!
//! Error types for record store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                                 │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds the collection/file context           │
//! │       │                                                                 │
//! │       ├── read path: logged, degraded to an empty collection           │
//! │       │              (the server never crashes on a bad read)          │
//! │       │                                                                 │
//! │       └── write path: surfaced to the API as a generic server failure  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be serialized for writing.
    ///
    /// Deserialization failures are NOT errors: a file that fails to parse
    /// is quarantined and the collection restarts empty.
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates an Io error carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
