//! # Razorpay Orders API
//!
//! Implementation of the payment-intent flow against Razorpay's Orders
//! API. An "order" on the Razorpay side is the payment intent the client
//! widget collects against; it is distinct from our own Order record.

use crate::config::RazorpayConfig;
use crate::signature;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, IntentRequest, PaymentGateway, PaymentIntent};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "razorpay";

/// Razorpay gateway adapter
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayGateway {
    /// Create a new gateway from explicit config
    pub fn new(config: RazorpayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn gateway_error(message: impl Into<String>) -> CheckoutError {
        CheckoutError::Gateway {
            provider: PROVIDER.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[instrument(skip(self, request), fields(receipt = %request.receipt))]
    async fn create_intent(&self, request: IntentRequest) -> CheckoutResult<PaymentIntent> {
        if request.amount_minor_units <= 0 {
            return Err(CheckoutError::InvalidRequest(
                "intent amount must be positive".to_string(),
            ));
        }

        let body = RazorpayOrderRequest {
            amount: request.amount_minor_units,
            currency: request.currency.as_str().to_string(),
            receipt: request.receipt.clone(),
            notes: request.notes.clone(),
            payment_capture: 1,
        };

        debug!(amount = body.amount, currency = %body.currency, "creating payment intent");

        let url = format!("{}/v1/orders", self.config.api_base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::gateway_error(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::gateway_error(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, text);

            if let Ok(err_response) = serde_json::from_str::<RazorpayErrorResponse>(&text) {
                return Err(Self::gateway_error(err_response.error.description));
            }
            return Err(Self::gateway_error(format!("HTTP {status}: {text}")));
        }

        let created: RazorpayOrderResponse = serde_json::from_str(&text).map_err(|e| {
            Self::gateway_error(format!("Failed to parse Razorpay response: {e}"))
        })?;

        info!(intent_id = %created.id, "created payment intent");

        Ok(PaymentIntent {
            intent_id: created.id,
            amount_minor_units: created.amount,
            currency: request.currency,
            receipt: created.receipt.unwrap_or(request.receipt),
            key_id: self.config.key_id.clone(),
        })
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> CheckoutResult<bool> {
        signature::verify_signature(
            gateway_order_id,
            gateway_payment_id,
            signature,
            &self.config.key_secret,
        )
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct RazorpayOrderRequest {
    amount: i64,
    currency: String,
    receipt: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    notes: HashMap<String, String>,
    payment_capture: u8,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    amount: i64,
    #[serde(default)]
    receipt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    #[serde(default)]
    code: Option<String>,
    description: String,
}
