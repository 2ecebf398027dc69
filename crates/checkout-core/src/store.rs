//! # Store Ports
//!
//! Persistence traits for carts and orders. Stores are injected into the
//! checkout service at construction; nothing reaches for a global client.
//!
//! Mutations are semantic operations applied atomically inside the store
//! (merge a line, flip a payment state) rather than whole-document
//! replacement, so concurrent mutations to the same session or order
//! number cannot lose updates.

use crate::cart::Cart;
use crate::error::CheckoutResult;
use crate::order::{Order, PaymentConfirmation};
use async_trait::async_trait;
use std::sync::Arc;

/// Cart persistence, keyed by session id
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetch a cart if one exists for the session
    async fn get(&self, session_id: &str) -> CheckoutResult<Option<Cart>>;

    /// Fetch the session's cart, creating and persisting an empty one if
    /// absent. Never fails with not-found.
    async fn get_or_create(&self, session_id: &str) -> CheckoutResult<Cart>;

    /// Add quantity for a product, merging onto an existing line at its
    /// first-add price. Creates the cart if absent. Returns the updated
    /// cart.
    async fn add_line(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
        unit_price: i64,
    ) -> CheckoutResult<Cart>;

    /// Replace a line's quantity (`<= 0` removes the line). Missing cart
    /// or line is `CartNotFound`/`ItemNotFound`.
    async fn set_line_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CheckoutResult<Cart>;

    /// Remove a line. Missing cart is `CartNotFound`; a missing line is
    /// not an error.
    async fn remove_line(&self, session_id: &str, product_id: &str) -> CheckoutResult<Cart>;

    /// Delete the cart document entirely. Idempotent.
    async fn clear(&self, session_id: &str) -> CheckoutResult<()>;
}

/// Order persistence, keyed by unique order number
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order. Fails with `DuplicateOrderNumber` if the
    /// order number is already taken (the order builder retries).
    async fn insert(&self, order: Order) -> CheckoutResult<()>;

    /// Fetch an order by order number
    async fn get(&self, order_number: &str) -> CheckoutResult<Option<Order>>;

    /// All orders for a customer email
    async fn list_by_email(&self, email: &str) -> CheckoutResult<Vec<Order>>;

    /// Apply the payment-confirmation transition atomically: load the
    /// order, run the compare-and-swap, and persist the winner's write —
    /// all under the store's lock. Absent order is `OrderNotFound`;
    /// a completed order with differing gateway ids is
    /// `AlreadyConfirmed`.
    async fn confirm_payment(
        &self,
        order_number: &str,
        confirmation: &PaymentConfirmation,
    ) -> CheckoutResult<Order>;
}

/// Shared handles used across the checkout service
pub type SharedCartStore = Arc<dyn CartStore>;
pub type SharedOrderStore = Arc<dyn OrderStore>;
