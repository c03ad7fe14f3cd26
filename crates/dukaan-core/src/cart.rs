//! # Cart
//!
//! Pure shopping-cart math. The cart is a product-id → quantity map; it
//! stores no product data of its own, so prices are always read from the
//! current product list at the moment totals or line items are computed.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Shopper Action            Cart Change                                  │
//! │  ───────────────           ───────────                                  │
//! │  Add to cart        ────►  quantity += 1 (inserted at 1)               │
//! │  Set quantity       ────►  quantity = n (n <= 0 removes the line)      │
//! │  Remove             ────►  line removed                                 │
//! │  Checkout           ────►  line_items() + total() → TransactionRequest │
//! │                                                                         │
//! │  Products deleted on the server since they were added simply drop      │
//! │  out of line_items()/total() - the cart never fails on a stale id.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ops::find_product_by_id;
use crate::types::{Product, TransactionItem};

/// A shopping cart: product id → quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<u64, i64>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product.
    pub fn add(&mut self, product_id: u64) {
        *self.items.entry(product_id).or_insert(0) += 1;
    }

    /// Sets the quantity of a product; zero or negative removes the line.
    pub fn set_quantity(&mut self, product_id: u64, quantity: i64) {
        if quantity <= 0 {
            self.items.remove(&product_id);
        } else {
            self.items.insert(product_id, quantity);
        }
    }

    /// Removes a product line entirely.
    pub fn remove(&mut self, product_id: u64) {
        self.items.remove(&product_id);
    }

    /// Total unit count across all lines (the cart badge number).
    pub fn count(&self) -> i64 {
        self.items.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the cart (after a successful checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Resolves cart lines against the current product list. Lines whose
    /// product has vanished are skipped.
    pub fn line_items(&self, products: &[Product]) -> Vec<TransactionItem> {
        self.items
            .iter()
            .filter_map(|(&id, &quantity)| {
                find_product_by_id(products, id).map(|p| TransactionItem {
                    id: p.id,
                    name: p.name.clone(),
                    price: p.price,
                    quantity,
                })
            })
            .collect()
    }

    /// Order total over the resolvable lines.
    pub fn total(&self, products: &[Product]) -> f64 {
        self.line_items(products)
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Desk Lamp".into(),
                price: 499.0,
                image: String::new(),
            },
            Product {
                id: 2,
                name: "Rug".into(),
                price: 1250.0,
                image: String::new(),
            },
        ]
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(1);
        cart.add(2);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_line_items() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(1);
        cart.add(2);
        let items = cart.line_items(&products());
        assert_eq!(items.len(), 2);
        assert_eq!(cart.total(&products()), 2.0 * 499.0 + 1250.0);
    }

    #[test]
    fn test_vanished_product_drops_out() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(99); // no such product any more
        let items = cart.line_items(&products());
        assert_eq!(items.len(), 1);
        assert_eq!(cart.total(&products()), 499.0);
    }
}
