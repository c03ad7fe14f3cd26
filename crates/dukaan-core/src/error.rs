//! # Error Types
//!
//! Domain-specific error types for dukaan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukaan-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dukaan-store errors (separate crate)                                  │
//! │  └── StoreError       - Collection file I/O failures                   │
//! │                                                                         │
//! │  apps/api errors                                                       │
//! │  └── ApiError         - What HTTP clients see (machine-readable code)  │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError → {"error": "<code>"}                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each variant maps onto exactly one wire-level error code

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before records are touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field that must be numeric could not be read as a number.
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// Phone number does not normalize to the required digit count.
    #[error("phone must normalize to {expected} digits")]
    InvalidPhone { expected: usize },

    /// Password is missing, empty or not a string.
    #[error("password must be a non-empty string")]
    InvalidPassword,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidPhone { expected: 10 };
        assert_eq!(err.to_string(), "phone must normalize to 10 digits");
    }
}
