//! # Sync Error Types
//!
//! Error types for client-side operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sync Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Server              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http (reqwest) │  │  Api {status, code}     │ │
//! │  │  ConfigLoad     │  │                 │  │  (decoded error body)   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │     Queue       │  Queue (file I/O) / Encode (serialization)        │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Transport and Api errors are exactly the failures that abort a sync   │
//! │  pass and leave the queue untouched.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Client-side error type.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid sync configuration.
    #[error("invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Queue file could not be read or written.
    #[error("queue file error on {path}: {source}")]
    Queue {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Queue entries could not be serialized.
    #[error("failed to encode queue: {0}")]
    Encode(#[from] serde_json::Error),

    /// Transport-level failure (connection refused, timeout, bad TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status. `code` is the
    /// machine-readable error code from the body when one was sent.
    #[error("server rejected the request: {code} (HTTP {status})")]
    Api { status: u16, code: String },
}

impl SyncError {
    /// Creates a Queue error carrying the offending path.
    pub fn queue(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Queue {
            path: path.into(),
            source,
        }
    }

    /// The wire error code, when this error carries one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            SyncError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = SyncError::Api {
            status: 404,
            code: "not_found".into(),
        };
        assert_eq!(
            err.to_string(),
            "server rejected the request: not_found (HTTP 404)"
        );
        assert_eq!(err.api_code(), Some("not_found"));
    }
}
