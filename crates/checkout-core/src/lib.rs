//! # checkout-core
//!
//! Core checkout pipeline for the storefront backend.
//!
//! This crate provides:
//! - `Cart`/`CartItem` and the `CartStore` port for per-session carts
//! - `Order`/`OrderLine` with the one-way payment-confirmation transition
//! - The pure pricing engine (`price_cart`)
//! - `PaymentGateway` and `Notifier` ports for the external collaborators
//! - `CheckoutService`, the coordinator that owns the flow's correctness
//! - In-memory store implementations for tests and single-node serving
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutService, CustomerInfo};
//!
//! let service = CheckoutService::new(catalog, carts, orders, gateway);
//!
//! service.add_cart_item("sess-1", "prod-1", 2).await?;
//! let order = service.create_order("sess-1", customer).await?;
//! let intent = service.create_payment_intent(&order.order_number).await?;
//!
//! // ...customer pays; the gateway reports back...
//! service.confirm_payment(&order.order_number, &gw_order, &gw_payment, &sig).await?;
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod notify;
pub mod order;
pub mod pricing;
pub mod product;
pub mod store;

// Re-exports for convenience
pub use cart::{Cart, CartItem};
pub use checkout::CheckoutService;
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{IntentRequest, PaymentGateway, PaymentIntent, SharedGateway};
pub use memory::{MemoryCartStore, MemoryOrderStore};
pub use notify::{LoggingNotifier, Notifier, SharedNotifier};
pub use order::{
    generate_order_number, ConfirmOutcome, CustomerInfo, Order, OrderLine, OrderStatus,
    PaymentConfirmation, PaymentStatus,
};
pub use pricing::{price_cart, PricedCart, ResolvedLine};
pub use product::{Catalog, Currency, MemoryCatalog, Product, SharedCatalog};
pub use store::{CartStore, OrderStore, SharedCartStore, SharedOrderStore};
