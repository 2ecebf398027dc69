//! # Cart Types
//!
//! Per-session mutable cart. A session owns at most one open cart; the
//! cart is created lazily on first read/write and deleted on clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line in a cart.
///
/// `unit_price` is captured when the line is first added; a later catalog
/// price change does not retroactively alter an existing line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub product_id: String,

    /// Quantity (always >= 1; zero-quantity updates remove the line)
    pub quantity: u32,

    /// Unit price at add time, in major currency units
    pub unit_price: i64,
}

/// A session's cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Record id
    pub id: String,

    /// Owning session (unique key)
    pub session_id: String,

    /// Ordered line items
    pub items: Vec<CartItem>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a session
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Find a line by product id
    pub fn line(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Add quantity for a product. Quantities merge onto an existing line
    /// and the unit price stays from the first add; otherwise a new line
    /// is appended with the given price.
    pub(crate) fn add_line(&mut self, product_id: &str, quantity: u32, unit_price: i64) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
                unit_price,
            }),
        }
        self.updated_at = Utc::now();
    }

    /// Replace a line's quantity. `quantity <= 0` removes the line.
    /// Returns false if no line exists for the product.
    pub(crate) fn set_line_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = quantity as u32;
        }
        self.updated_at = Utc::now();
        true
    }

    /// Remove a line. Removing a missing line is not an error.
    pub(crate) fn remove_line(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_at_first_price() {
        let mut cart = Cart::new("sess-1");
        cart.add_line("prod-1", 2, 9);
        // Catalog price moved; the line keeps the price from the first add.
        cart.add_line("prod-1", 3, 49);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[0].unit_price, 9);
    }

    #[test]
    fn test_set_quantity_replaces_not_adds() {
        let mut cart = Cart::new("sess-1");
        cart.add_line("prod-1", 2, 9);

        assert!(cart.set_line_quantity("prod-1", 7));
        assert_eq!(cart.items[0].quantity, 7);

        assert!(!cart.set_line_quantity("prod-9", 1));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = Cart::new("sess-1");
        cart.add_line("prod-1", 2, 9);
        cart.add_line("prod-2", 1, 49);

        assert!(cart.set_line_quantity("prod-1", 0));
        assert!(cart.line("prod-1").is_none());
        assert_eq!(cart.items.len(), 1);

        assert!(cart.set_line_quantity("prod-2", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new("sess-1");
        cart.add_line("prod-1", 1, 9);

        cart.remove_line("prod-1");
        cart.remove_line("prod-1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_item_count() {
        let mut cart = Cart::new("sess-1");
        cart.add_line("prod-1", 2, 9);
        cart.add_line("prod-2", 1, 49);
        assert_eq!(cart.item_count(), 3);
    }
}
