//! # Domain Operations
//!
//! Lookups, filters and transaction construction. Everything here is a pure
//! function over slices of records - the record store reads a collection,
//! hands it to one of these, and writes the result back.
//!
//! ## Phone Attribution Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              How a transaction gets its phone number                    │
//! │                                                                         │
//! │  1. body.phone        ──┐                                              │
//! │  2. body.phoneNumber  ──┴─► first truthy value, normalized             │
//! │          │ (normalizes to nothing)                                     │
//! │          ▼                                                              │
//! │  3. body.userId ─► user record lookup ─► user.phone, normalized        │
//! │          │ (no user / no digits)                                       │
//! │          ▼                                                              │
//! │  4. the raw phone/phoneNumber value verbatim, if any                   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  5. the literal "guest"                                                │
//! │                                                                         │
//! │  This order is a wire-compatibility contract; do not reorder.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::phone::{normalize_phone, phones_match};
use crate::types::{Product, Transaction, TransactionRequest, User};
use crate::{GUEST_PHONE, STATUS_PAID};

// =============================================================================
// Loose JSON Coercion
// =============================================================================
// The permissive endpoints accept fields as loose JSON values and coerce
// them the way the original clients expect: strings pass through, numbers
// render as decimal text, numeric strings parse as numbers.

/// JS-style truthiness for a JSON value: null, false, 0, NaN and "" are
/// falsy; everything else (including "0" and empty containers) is truthy.
pub fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String-coerces a JSON value: strings pass through, numbers and booleans
/// render as text, anything else becomes empty.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Number-coerces a JSON value: numbers pass through, numeric strings parse,
/// blank strings and null read as 0. Returns `None` for values with no
/// numeric reading (the caller's `invalid_input`).
pub fn coerce_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Linear scan for a product by id.
pub fn find_product_by_id(products: &[Product], id: u64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Linear scan for a user by phone; both sides are normalized, so raw and
/// formatted numbers are interchangeable.
pub fn find_user_by_phone<'a>(users: &'a [User], raw_phone: &str) -> Option<&'a User> {
    users.iter().find(|u| phones_match(&u.phone, raw_phone))
}

/// Linear scan for a user by account id.
pub fn find_user_by_id(users: &[User], id: i64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// Transactions attributed to a user id.
///
/// The query parameter arrives as text and is compared against the stored
/// id rendered as text, so `?userId=42` and `?userId=042` behave like the
/// original wire protocol (only the former matches).
pub fn transactions_for_user(transactions: &[Transaction], user_id_param: &str) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| {
            t.user_id
                .is_some_and(|id| id.to_string() == user_id_param)
        })
        .cloned()
        .collect()
}

/// Transactions attributed to a phone number.
///
/// Normally both sides are normalized; when the query normalizes to nothing
/// (no digits at all) the raw value is compared verbatim instead, so odd
/// legacy values like "guest" remain queryable.
pub fn transactions_for_phone(transactions: &[Transaction], raw_phone: &str) -> Vec<Transaction> {
    let normalized = normalize_phone(raw_phone);
    transactions
        .iter()
        .filter(|t| {
            if normalized.is_empty() {
                t.phone == raw_phone
            } else {
                normalize_phone(&t.phone) == normalized
            }
        })
        .cloned()
        .collect()
}

/// Case-insensitive product search: name substring match, or exact id match
/// when the query parses as an id.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products.to_vec();
    }
    let id_query = query.parse::<u64>().ok();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query) || id_query.is_some_and(|id| p.id == id)
        })
        .cloned()
        .collect()
}

// =============================================================================
// Transaction Construction
// =============================================================================

/// Resolves the phone a transaction is attributed to. See the module-level
/// diagram for the chain; the order is a compatibility contract.
pub fn resolve_transaction_phone(request: &TransactionRequest, users: &[User]) -> String {
    let raw = request
        .phone
        .as_ref()
        .filter(|v| json_truthy(v))
        .or_else(|| request.phone_number.as_ref().filter(|v| json_truthy(v)));

    let mut phone = raw.map(|v| normalize_phone(&coerce_string(v))).unwrap_or_default();

    if phone.is_empty() {
        if let Some(user) = request.user_id.and_then(|id| find_user_by_id(users, id)) {
            phone = normalize_phone(&user.phone);
        }
    }

    if phone.is_empty() {
        phone = raw
            .map(coerce_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| GUEST_PHONE.to_string());
    }

    phone
}

/// Resolves the order total: the first *non-zero* of total/amount, else 0.
/// Zero is skipped: checkout clients historically sent a zero `total`
/// alongside a real `amount`.
pub fn resolve_total(total: Option<f64>, amount: Option<f64>) -> f64 {
    [total, amount]
        .into_iter()
        .flatten()
        .find(|v| *v != 0.0 && !v.is_nan())
        .unwrap_or(0.0)
}

/// Builds the transaction record for a permissive request, applying every
/// documented default. Pure: the assigned id and the clock are passed in.
pub fn build_transaction(
    id: u64,
    request: &TransactionRequest,
    users: &[User],
    now: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id,
        date: iso_timestamp(now),
        status: request
            .status
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| STATUS_PAID.to_string()),
        phone: resolve_transaction_phone(request, users),
        items: request.items.clone(),
        total: resolve_total(request.total, request.amount),
        payment: request.payment.clone(),
        user_id: request.user_id,
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix - the timestamp
/// format used on transactions and the ping endpoint.
pub fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn user(id: i64, phone: &str) -> User {
        User {
            id,
            phone: phone.to_string(),
            password: "pw".to_string(),
            name: String::new(),
        }
    }

    fn product(id: u64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 10.0,
            image: String::new(),
        }
    }

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_price(&json!("12.5")), Some(12.5));
        assert_eq!(coerce_price(&json!("")), Some(0.0));
        assert_eq!(coerce_price(&json!(null)), Some(0.0));
        assert_eq!(coerce_price(&json!("twelve")), None);
        assert_eq!(coerce_price(&json!({})), None);
    }

    #[test]
    fn test_explicit_phone_wins() {
        let req = TransactionRequest {
            phone: Some(json!("123-456-7890")),
            phone_number: Some(json!("999")),
            user_id: Some(1),
            ..Default::default()
        };
        let users = vec![user(1, "5550000000")];
        assert_eq!(resolve_transaction_phone(&req, &users), "1234567890");
    }

    #[test]
    fn test_phone_number_alias_used_when_phone_empty() {
        let req = TransactionRequest {
            phone: Some(json!("")),
            phone_number: Some(json!(9876543210_i64)),
            ..Default::default()
        };
        assert_eq!(resolve_transaction_phone(&req, &[]), "9876543210");
    }

    #[test]
    fn test_user_lookup_fills_missing_phone() {
        let req = TransactionRequest {
            user_id: Some(7),
            ..Default::default()
        };
        let users = vec![user(7, "123-456-7890")];
        assert_eq!(resolve_transaction_phone(&req, &users), "1234567890");
    }

    #[test]
    fn test_raw_value_kept_when_nothing_normalizes() {
        // "abc" has no digits and no user matches, so the raw value is
        // recorded verbatim rather than falling through to "guest".
        let req = TransactionRequest {
            phone: Some(json!("abc")),
            user_id: Some(999),
            ..Default::default()
        };
        assert_eq!(resolve_transaction_phone(&req, &[]), "abc");
    }

    #[test]
    fn test_guest_fallback() {
        let req = TransactionRequest::default();
        assert_eq!(resolve_transaction_phone(&req, &[]), "guest");
    }

    #[test]
    fn test_resolve_total_skips_zero() {
        assert_eq!(resolve_total(Some(150.0), Some(99.0)), 150.0);
        assert_eq!(resolve_total(Some(0.0), Some(99.0)), 99.0);
        assert_eq!(resolve_total(None, Some(99.0)), 99.0);
        assert_eq!(resolve_total(None, None), 0.0);
        assert_eq!(resolve_total(Some(0.0), Some(0.0)), 0.0);
    }

    #[test]
    fn test_build_transaction_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 12, 30, 15).unwrap();
        let tx = build_transaction(3, &TransactionRequest::default(), &[], now);
        assert_eq!(tx.id, 3);
        assert_eq!(tx.status, "PAID");
        assert_eq!(tx.phone, "guest");
        assert_eq!(tx.total, 0.0);
        assert!(tx.items.is_empty());
        assert!(tx.payment.is_none());
        assert_eq!(tx.date, "2024-05-04T12:30:15.000Z");
    }

    #[test]
    fn test_transactions_for_user_compares_as_text() {
        let txs = vec![
            Transaction {
                id: 1,
                user_id: Some(42),
                ..Default::default()
            },
            Transaction {
                id: 2,
                user_id: None,
                ..Default::default()
            },
        ];
        assert_eq!(transactions_for_user(&txs, "42").len(), 1);
        assert_eq!(transactions_for_user(&txs, "042").len(), 0);
        assert_eq!(transactions_for_user(&txs, "abc").len(), 0);
    }

    #[test]
    fn test_transactions_for_phone_normalizes() {
        let txs = vec![
            Transaction {
                id: 1,
                phone: "1234567890".into(),
                ..Default::default()
            },
            Transaction {
                id: 2,
                phone: "guest".into(),
                ..Default::default()
            },
        ];
        assert_eq!(transactions_for_phone(&txs, "123-456-7890").len(), 1);
        // digit-free query falls back to verbatim comparison
        assert_eq!(transactions_for_phone(&txs, "guest").len(), 1);
    }

    #[test]
    fn test_filter_products() {
        let products = vec![product(1, "Desk Lamp"), product(2, "Floor Lamp"), product(12, "Rug")];
        assert_eq!(filter_products(&products, "lamp").len(), 2);
        assert_eq!(filter_products(&products, "  LAMP ").len(), 2);
        assert_eq!(filter_products(&products, "12").len(), 1);
        assert_eq!(filter_products(&products, "12")[0].name, "Rug");
        assert_eq!(filter_products(&products, "").len(), 3);
    }
}
