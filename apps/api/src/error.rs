//! # API Error Type
//!
//! Every failure a handler can produce, mapped onto the wire contract:
//! an HTTP status plus a machine-readable `{"error": "<code>"}` body.
//!
//! ## Code Taxonomy
//! ```text
//! ┌────────────────────┬────────┬───────────────────────────────────────┐
//! │ code               │ status │ produced by                           │
//! ├────────────────────┼────────┼───────────────────────────────────────┤
//! │ invalid_id         │ 400    │ non-numeric {id} path segment         │
//! │ invalid_input      │ 400    │ missing/mistyped product fields,      │
//! │                    │        │ unparseable JSON bodies               │
//! │ invalid_phone      │ 400    │ signup/login phone check              │
//! │ invalid_password   │ 400    │ signup password check                 │
//! │ exists             │ 409    │ duplicate signup phone                │
//! │ not_found          │ 404    │ unknown product id / login phone      │
//! │ wrong_password     │ 401    │ login password mismatch               │
//! │ server_error       │ 500    │ store write failures (internals are   │
//! │                    │        │ logged, never exposed)                │
//! └────────────────────┴────────┴───────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use dukaan_core::ValidationError;
use dukaan_store::StoreError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id segment is not a number.
    #[error("id is not a number")]
    InvalidId,

    /// Required fields missing or of the wrong type.
    #[error("missing or invalid input fields")]
    InvalidInput,

    /// Phone failed the signup/login phone rule.
    #[error("invalid phone number")]
    InvalidPhone,

    /// Password missing, empty, or not a string.
    #[error("invalid password")]
    InvalidPassword,

    /// Signup phone already registered.
    #[error("phone already registered")]
    Exists,

    /// Referenced record does not exist.
    #[error("no matching record")]
    NotFound,

    /// Login password mismatch.
    #[error("password does not match")]
    WrongPassword,

    /// Record store failure (write path).
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId
            | ApiError::InvalidInput
            | ApiError::InvalidPhone
            | ApiError::InvalidPassword => StatusCode::BAD_REQUEST,
            ApiError::Exists => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::WrongPassword => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable wire code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidId => "invalid_id",
            ApiError::InvalidInput => "invalid_input",
            ApiError::InvalidPhone => "invalid_phone",
            ApiError::InvalidPassword => "invalid_password",
            ApiError::Exists => "exists",
            ApiError::NotFound => "not_found",
            ApiError::WrongPassword => "wrong_password",
            ApiError::Store(_) => "server_error",
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { .. } | ValidationError::NotANumber { .. } => {
                ApiError::InvalidInput
            }
            ValidationError::InvalidPhone { .. } => ApiError::InvalidPhone,
            ValidationError::InvalidPassword => ApiError::InvalidPassword,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Store failures carry internals worth logging; the client only
        // ever sees the generic code.
        if let ApiError::Store(err) = &self {
            tracing::error!(%err, "request failed on the record store");
        }
        (self.status(), Json(json!({ "error": self.code() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_mapping() {
        assert_eq!(ApiError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidId.code(), "invalid_id");
        assert_eq!(ApiError::Exists.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::WrongPassword.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.code(), "not_found");
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ApiError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(err, ApiError::InvalidInput));

        let err: ApiError = ValidationError::InvalidPhone { expected: 10 }.into();
        assert!(matches!(err, ApiError::InvalidPhone));
    }
}
