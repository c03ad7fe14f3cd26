//! # Domain Types
//!
//! Core domain records and request DTOs used throughout Dukaan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (max+1)     │   │  id (epoch ms)  │   │  id (max+1)     │       │
//! │  │  name           │   │  phone (10 dig) │   │  date, status   │       │
//! │  │  price          │   │  password       │   │  phone, items   │       │
//! │  │  image          │   │  name           │   │  total, payment │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Request DTOs: ProductDraft, TransactionRequest (permissive)           │
//! │  Responses:    AccountSummary, PingResponse                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient deserialization
//! Collection files are hand-editable JSON. Every record field carries a
//! serde default and ids go through [`crate::ids::lenient_id`], so a sparse
//! or oddly-typed record degrades to defaults instead of rejecting the whole
//! file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Product
// =============================================================================

/// A product available in the shop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Unique within the product collection; assigned as `max(ids) + 1`.
    #[serde(deserialize_with = "crate::ids::lenient_id")]
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Unit price. Stored as a plain JSON number for wire and file
    /// compatibility with existing data.
    pub price: f64,

    /// Image URL. Never empty on server-created records: blank input is
    /// replaced with a generated placeholder URL.
    pub image: String,
}

/// The writable fields of a product, as sent by clients on create/update
/// and as held in the offline queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductDraft {
    /// Image to store when creating a product: the submitted image when it
    /// has visible content, otherwise a generated placeholder.
    pub fn image_or_placeholder(&self) -> String {
        match &self.image {
            Some(image) if !image.trim().is_empty() => image.clone(),
            _ => placeholder_image_url(&self.name),
        }
    }

    /// Image to store when updating a product: the submitted image when it
    /// has visible content, otherwise the image already on the record.
    pub fn image_or_keep(&self, current: &str) -> String {
        match &self.image {
            Some(image) if !image.trim().is_empty() => image.clone(),
            _ => current.to_string(),
        }
    }
}

/// Placeholder image URL for products created without one.
///
/// The product name travels in the query string, so it is form-encoded and
/// spaces are rewritten to `%20` (the placeholder service renders `+`
/// literally).
pub fn placeholder_image_url(name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!(
        "https://via.placeholder.com/300?text={}",
        encoded.replace('+', "%20")
    )
}

// =============================================================================
// User
// =============================================================================

/// A shopper account.
///
/// Passwords are stored and compared in plain text; the demo has no
/// authentication security.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Epoch milliseconds at signup time.
    pub id: i64,

    /// Normalized (digits-only) phone number; unique within the collection.
    pub phone: String,

    /// Plain-text password.
    pub password: String,

    /// Optional display name; empty string when not given.
    pub name: String,
}

/// The public view of a user, returned by signup and login.
/// The password never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub phone: String,
    pub name: String,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        AccountSummary {
            id: user.id,
            phone: user.phone.clone(),
            name: user.name.clone(),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One line of a recorded order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionItem {
    #[serde(deserialize_with = "crate::ids::lenient_id")]
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// How an order was paid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInfo {
    /// Payment method label, e.g. "CARD", "UPI", "NETBANKING", "COD".
    pub method: String,

    /// Method-specific details as supplied by the client (masked card
    /// number, UPI id, ...). Stored verbatim; the server never inspects it.
    pub details: Option<Value>,
}

/// A recorded order.
///
/// Transactions are append-only: created once, never mutated or deleted
/// through the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned as `max(ids) + 1` over the transaction collection.
    #[serde(deserialize_with = "crate::ids::lenient_id")]
    pub id: u64,

    /// RFC 3339 timestamp with millisecond precision.
    pub date: String,

    /// Enum-like status string: "PAID", "PLACED", ...
    pub status: String,

    /// Phone the order is attributed to; `"guest"` when unattributable.
    pub phone: String,

    pub items: Vec<TransactionItem>,

    pub total: f64,

    pub payment: Option<PaymentInfo>,

    /// Account id when the shopper was logged in.
    pub user_id: Option<i64>,
}

/// The permissive `POST /api/transactions` body.
///
/// Checkout clients send whatever they have; every field is optional and a
/// documented default applies:
///
/// | field       | default / rule                                          |
/// |-------------|---------------------------------------------------------|
/// | phone       | first non-empty of phone / phoneNumber, normalized      |
/// | phoneNumber | legacy alias for phone                                  |
/// | userId      | `None`; used to resolve phone when phone is absent      |
/// | status      | `"PAID"`                                                |
/// | items       | `[]`                                                    |
/// | total       | first *non-zero* of total / amount, else 0              |
/// | amount      | legacy alias for total                                  |
/// | payment     | `None`                                                  |
///
/// `phone`/`phoneNumber` are loose JSON values because clients send both
/// strings and raw numbers; they are string-coerced before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub items: Vec<TransactionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
}

// =============================================================================
// Ping
// =============================================================================

/// `GET /api/ping` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
    /// Server time, RFC 3339 with millisecond precision.
    pub time: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_url_encodes_name() {
        assert_eq!(
            placeholder_image_url("Cool Chair"),
            "https://via.placeholder.com/300?text=Cool%20Chair"
        );
        assert_eq!(
            placeholder_image_url("A&B"),
            "https://via.placeholder.com/300?text=A%26B"
        );
    }

    #[test]
    fn test_draft_image_or_placeholder() {
        let mut draft = ProductDraft {
            name: "Desk Lamp".into(),
            price: 499.0,
            image: None,
        };
        assert_eq!(
            draft.image_or_placeholder(),
            "https://via.placeholder.com/300?text=Desk%20Lamp"
        );

        draft.image = Some("   ".into());
        assert_eq!(
            draft.image_or_placeholder(),
            "https://via.placeholder.com/300?text=Desk%20Lamp"
        );

        draft.image = Some("https://img.example/lamp.png".into());
        assert_eq!(draft.image_or_placeholder(), "https://img.example/lamp.png");
    }

    #[test]
    fn test_draft_image_or_keep() {
        let draft = ProductDraft {
            name: "Desk Lamp".into(),
            price: 499.0,
            image: Some("".into()),
        };
        assert_eq!(draft.image_or_keep("old.png"), "old.png");
    }

    #[test]
    fn test_sparse_record_deserializes_with_defaults() {
        let p: Product = serde_json::from_value(json!({"id": "9"})).unwrap();
        assert_eq!(p.id, 9);
        assert_eq!(p.name, "");
        assert_eq!(p.price, 0.0);
    }

    #[test]
    fn test_transaction_wire_field_names() {
        let tx = Transaction {
            id: 3,
            user_id: Some(17),
            ..Default::default()
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["userId"], json!(17));
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_transaction_request_accepts_numeric_phone() {
        let req: TransactionRequest =
            serde_json::from_value(json!({"phoneNumber": 1234567890_i64, "amount": 99.0}))
                .unwrap();
        assert_eq!(req.phone_number, Some(json!(1234567890_i64)));
        assert_eq!(req.amount, Some(99.0));
        assert!(req.items.is_empty());
    }
}
