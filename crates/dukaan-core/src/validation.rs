//! # Validation Module
//!
//! Input validation for the write endpoints. Each function maps onto exactly
//! one wire-level error code, enforced at the API layer:
//!
//! | function                | error code on failure |
//! |-------------------------|-----------------------|
//! | `validate_product_name` | `invalid_input`       |
//! | `validate_price`        | `invalid_input`       |
//! | `validate_signup_phone` | `invalid_phone`       |
//! | `validate_password`     | `invalid_password`    |
//!
//! Validation is intentionally loose elsewhere: lookups accept any phone
//! format, and the transactions endpoint applies defaults instead of
//! rejecting.

use crate::error::{ValidationError, ValidationResult};
use crate::phone::normalize_phone;
use crate::PHONE_DIGITS;

/// A product name must be a non-empty string.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    Ok(())
}

/// A price must be an actual number (numeric strings are coerced before this
/// is called; a failed coercion reports the same way).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price.is_nan() {
        return Err(ValidationError::NotANumber { field: "price" });
    }
    Ok(())
}

/// Signup requires a phone that normalizes to exactly [`PHONE_DIGITS`]
/// digits. Returns the normalized phone, which is what gets stored.
pub fn validate_signup_phone(raw: &str) -> ValidationResult<String> {
    let phone = normalize_phone(raw);
    if phone.len() != PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone {
            expected: PHONE_DIGITS,
        });
    }
    Ok(phone)
}

/// A password must be a non-empty string. That is the whole policy: this
/// demo stores and compares passwords in plain text.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Desk Lamp").is_ok());
        // whitespace counts as content, matching the write path's own rule
        assert!(validate_product_name(" ").is_ok());
        assert!(validate_product_name("").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(499.5).is_ok());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_signup_phone() {
        assert_eq!(
            validate_signup_phone("123-456-7890").unwrap(),
            "1234567890"
        );
        assert!(validate_signup_phone("12345").is_err());
        assert!(validate_signup_phone("123456789012").is_err());
        assert!(validate_signup_phone("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());
    }
}
