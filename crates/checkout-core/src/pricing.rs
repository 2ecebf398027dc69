//! # Pricing Engine
//!
//! Pure computation of subtotal, discount, and total for a set of cart
//! lines resolved against current catalog entries. No side effects.

use crate::cart::CartItem;
use crate::order::OrderLine;
use crate::product::Product;
use serde::Serialize;

/// A cart line paired with its catalog resolution result
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// Current catalog entry, if the product still exists
    pub product: Option<Product>,

    /// Quantity from the cart line
    pub quantity: u32,
}

impl ResolvedLine {
    /// Pair a cart line with its lookup result
    pub fn new(product: Option<Product>, item: &CartItem) -> Self {
        Self {
            product,
            quantity: item.quantity,
        }
    }
}

/// Pricing output: frozen order lines plus the money summary
#[derive(Debug, Clone, Serialize)]
pub struct PricedCart {
    /// Order lines at current catalog prices
    pub lines: Vec<OrderLine>,

    /// Sum of current-price line subtotals
    pub subtotal: i64,

    /// Sum of (original - current) price over all priced lines
    pub discount: i64,

    /// Equals subtotal: unit prices already reflect the discount
    pub total: i64,
}

/// Price a resolved cart.
///
/// Each line contributes `current_price * quantity` to the subtotal and
/// `original_price * quantity` to the pre-discount total; the discount is
/// the difference. A line whose product no longer exists in the catalog
/// is silently dropped from the computation and from the resulting order
/// lines (long-standing storefront behavior, asserted by test).
pub fn price_cart(resolved: &[ResolvedLine]) -> PricedCart {
    let mut lines = Vec::with_capacity(resolved.len());
    let mut subtotal: i64 = 0;
    let mut original_total: i64 = 0;

    for line in resolved {
        let Some(product) = &line.product else {
            continue;
        };
        let quantity = i64::from(line.quantity);
        subtotal += product.current_price * quantity;
        original_total += product.original_price * quantity;
        lines.push(OrderLine {
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            quantity: line.quantity,
            unit_price: product.current_price,
        });
    }

    PricedCart {
        lines,
        subtotal,
        discount: original_total - subtotal,
        total: subtotal,
    }
}
