//! # checkout-api
//!
//! HTTP API layer for the storefront checkout pipeline.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for products, carts, orders, and payments
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/products` | List products |
//! | GET | `/api/cart/:session_id` | Get or create cart |
//! | POST | `/api/cart/:session_id/items` | Add cart item |
//! | POST | `/api/orders` | Create order from cart |
//! | POST | `/api/payments/intent` | Create payment intent |
//! | POST | `/api/payments/verify` | Verify payment, complete order |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
