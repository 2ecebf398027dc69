//! # Payment Gateway Port
//!
//! Trait boundary for the external payment provider. The adapter creates
//! a remote payment intent up front and later proves, via an HMAC
//! signature, that a payment confirmation belongs to that intent.

use crate::error::CheckoutResult;
use crate::product::Currency;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Request to create a payment intent with the gateway
#[derive(Debug, Clone, Serialize)]
pub struct IntentRequest {
    /// Amount in the currency's minor units (paise for INR)
    pub amount_minor_units: i64,

    /// Intent currency
    pub currency: Currency,

    /// Our receipt id for reconciliation (the order number)
    pub receipt: String,

    /// Free-form metadata passed through to the gateway
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

impl IntentRequest {
    /// Build a request for an order total (major units) and receipt id
    pub fn for_receipt(total: i64, currency: Currency, receipt: impl Into<String>) -> Self {
        Self {
            amount_minor_units: currency.to_minor_units(total),
            currency,
            receipt: receipt.into(),
            notes: HashMap::new(),
        }
    }

    /// Builder: attach a metadata note
    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }
}

/// A gateway-created payment intent plus the client-facing fields the
/// frontend needs to collect payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Gateway-assigned intent id
    pub intent_id: String,

    /// Amount in minor units, echoed from the gateway
    pub amount_minor_units: i64,

    /// Currency
    pub currency: Currency,

    /// Our receipt id (the order number)
    pub receipt: String,

    /// Public key id the client widget authenticates with
    pub key_id: String,
}

/// Payment provider boundary.
///
/// Implementations are injected at construction (no ambient clients) and
/// must be safe to share across request handlers.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a remote payment intent. Network, auth, and gateway
    /// rejections surface as `Gateway` errors with the upstream message;
    /// this component never retries on its own.
    async fn create_intent(&self, request: IntentRequest) -> CheckoutResult<PaymentIntent>;

    /// Verify that `signature` is the HMAC-SHA256 of
    /// `"{gateway_order_id}|{gateway_payment_id}"` under the shared
    /// secret. Returns `false` for a mismatch; errors only for malformed
    /// inputs.
    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> CheckoutResult<bool>;

    /// Provider name (for logging and error context)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway handle (dynamic dispatch)
pub type SharedGateway = Arc<dyn PaymentGateway>;
