//! # checkout-razorpay
//!
//! Razorpay gateway adapter for the storefront checkout pipeline.
//!
//! This crate provides:
//!
//! 1. **RazorpayGateway** — `PaymentGateway` implementation over the
//!    Razorpay Orders API (payment-intent creation with basic auth).
//! 2. **Signature verification** — HMAC-SHA256 over
//!    `"{order_id}|{payment_id}"`, hex-encoded and compared in constant
//!    time, proving a payment confirmation came from the gateway.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_razorpay::RazorpayGateway;
//! use checkout_core::{Currency, IntentRequest, PaymentGateway};
//!
//! // RAZORPAY_KEY_ID / RAZORPAY_KEY_SECRET from the environment
//! let gateway = RazorpayGateway::from_env()?;
//!
//! let intent = gateway
//!     .create_intent(IntentRequest::for_receipt(18, Currency::INR, "ORD-AB12CD34EF"))
//!     .await?;
//!
//! // Later, when the client reports payment:
//! let ok = gateway.verify_signature(&gw_order_id, &gw_payment_id, &sig)?;
//! ```

pub mod client;
pub mod config;
pub mod signature;

// Re-exports
pub use client::RazorpayGateway;
pub use config::RazorpayConfig;
pub use signature::{compute_signature, verify_signature};
