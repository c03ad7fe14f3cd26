//! # ID Assignment
//!
//! Record ids are assigned by scanning the whole collection:
//! `max(existing ids, default 0) + 1`.
//!
//! ## Why a scan, not a counter?
//! The backing files are plain JSON arrays that people edit by hand; a stored
//! counter would drift the moment someone pastes in a record. The scan is
//! only correct for a single writer - dukaan-store serializes writers with a
//! per-collection lock, which is what makes this safe.
//!
//! ## Lenient ids
//! Hand-edited files sometimes carry ids like `"7"` or even `"x"`. Records
//! deserialize those through [`lenient_id`]: numeric strings are read as
//! numbers, anything unusable becomes 0 and simply never wins the max scan.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Computes the next id for a collection: `max(ids, default 0) + 1`.
///
/// ## Example
/// ```rust
/// use dukaan_core::ids::next_id;
///
/// assert_eq!(next_id([]), 1);
/// assert_eq!(next_id([5, 2, 3]), 6);
/// ```
pub fn next_id<I>(ids: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    ids.into_iter().max().unwrap_or(0) + 1
}

/// Reads an id out of a loose JSON value: integers pass through, numeric
/// strings parse, everything else (including fractional or negative noise)
/// collapses to 0.
pub fn value_to_id(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Serde field deserializer applying [`value_to_id`].
///
/// Used on the `id` field of records read back from collection files so one
/// malformed id does not reject the whole collection.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_id(&value))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use serde_json::json;

    #[test]
    fn test_next_id_empty_collection() {
        assert_eq!(next_id(std::iter::empty()), 1);
    }

    #[test]
    fn test_next_id_takes_max_plus_one() {
        assert_eq!(next_id([1, 9, 4]), 10);
        assert_eq!(next_id([7]), 8);
    }

    #[test]
    fn test_value_to_id() {
        assert_eq!(value_to_id(&json!(5)), 5);
        assert_eq!(value_to_id(&json!("12")), 12);
        assert_eq!(value_to_id(&json!(" 3 ")), 3);
        assert_eq!(value_to_id(&json!("x")), 0);
        assert_eq!(value_to_id(&json!(null)), 0);
        assert_eq!(value_to_id(&json!(-4)), 0);
        assert_eq!(value_to_id(&json!([1])), 0);
    }

    #[test]
    fn test_non_numeric_id_counts_as_zero_in_scan() {
        // A record with id "x" deserializes with id 0 and loses the max scan.
        let raw = json!([{"id": 5, "name": "a", "price": 1.0, "image": ""},
                         {"id": "x", "name": "b", "price": 2.0, "image": ""}]);
        let products: Vec<Product> = serde_json::from_value(raw).unwrap();
        assert_eq!(next_id(products.iter().map(|p| p.id)), 6);
    }
}
