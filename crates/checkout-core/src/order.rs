//! # Order Types
//!
//! Immutable (post-creation) order records with frozen pricing. The only
//! mutation after creation is the payment-confirmation transition.

use crate::error::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A frozen copy of catalog data at order-creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product ID
    pub product_id: String,

    /// Product title (denormalized for display)
    pub product_title: String,

    /// Quantity
    pub quantity: u32,

    /// Unit price at order time, in major currency units
    pub unit_price: i64,
}

impl OrderLine {
    /// Line subtotal
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Billing details captured at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

/// Order lifecycle status. One-way: `Pending -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Payment status, flipped by signature-verified confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// Gateway-confirmed payment details, applied by the CAS transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// What applying a confirmation did to the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// This call won the transition and wrote the gateway fields
    Applied,
    /// The order was already completed with identical gateway ids
    AlreadyApplied,
}

/// A customer order with frozen pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Record id
    pub id: String,

    /// Human-readable unique order number ("ORD-" + 10 uppercase alnum)
    pub order_number: String,

    /// Session the order was built from; used to clear the cart after
    /// payment confirmation
    pub session_id: String,

    /// Billing details
    pub customer: CustomerInfo,

    /// Frozen order lines
    pub lines: Vec<OrderLine>,

    /// Sum of line subtotals at current prices
    pub subtotal: i64,

    /// Informational: sum of (original - current) price over all lines
    pub discount: i64,

    /// Equals subtotal; discounted unit prices are already reflected
    pub total: i64,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    #[serde(default)]
    pub gateway_order_id: String,

    #[serde(default)]
    pub gateway_payment_id: String,

    #[serde(default)]
    pub gateway_signature: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order with empty gateway fields
    pub fn new(
        order_number: impl Into<String>,
        session_id: impl Into<String>,
        customer: CustomerInfo,
        lines: Vec<OrderLine>,
        subtotal: i64,
        discount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            order_number: order_number.into(),
            session_id: session_id.into(),
            customer,
            lines,
            subtotal,
            discount,
            total: subtotal,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            gateway_order_id: String::new(),
            gateway_payment_id: String::new(),
            gateway_signature: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the order has been paid and completed
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Apply a payment confirmation as a compare-and-swap transition.
    ///
    /// Only the first confirmation writes: it sets the three gateway
    /// fields, flips `payment_status` to Paid and `status` to Completed,
    /// and refreshes `updated_at`. A repeat with identical gateway ids is
    /// accepted without a second write; differing ids are rejected.
    ///
    /// Callers must hold whatever lock makes the load-apply-store cycle
    /// atomic; the store implementations do.
    pub fn apply_confirmation(
        &mut self,
        confirmation: &PaymentConfirmation,
    ) -> CheckoutResult<ConfirmOutcome> {
        match self.status {
            OrderStatus::Pending => {
                self.gateway_order_id = confirmation.gateway_order_id.clone();
                self.gateway_payment_id = confirmation.gateway_payment_id.clone();
                self.gateway_signature = confirmation.signature.clone();
                self.payment_status = PaymentStatus::Paid;
                self.status = OrderStatus::Completed;
                self.updated_at = Utc::now();
                Ok(ConfirmOutcome::Applied)
            }
            OrderStatus::Completed => {
                if self.gateway_order_id == confirmation.gateway_order_id
                    && self.gateway_payment_id == confirmation.gateway_payment_id
                {
                    Ok(ConfirmOutcome::AlreadyApplied)
                } else {
                    Err(CheckoutError::AlreadyConfirmed {
                        order_number: self.order_number.clone(),
                    })
                }
            }
        }
    }
}

const ORDER_NUMBER_PREFIX: &str = "ORD-";
const ORDER_NUMBER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ORDER_NUMBER_SUFFIX_LEN: usize = 10;

/// Generate a human-readable order number: "ORD-" followed by 10 random
/// uppercase-alphanumeric characters. Collisions (~1/36^10) are handled
/// by the order builder's bounded retry, not here.
pub fn generate_order_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ORDER_NUMBER_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ORDER_NUMBER_ALPHABET.len());
            ORDER_NUMBER_ALPHABET[idx] as char
        })
        .collect();
    format!("{ORDER_NUMBER_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> Order {
        Order::new(
            "ORD-TEST123456",
            "sess-1",
            CustomerInfo {
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                ..CustomerInfo::default()
            },
            vec![OrderLine {
                product_id: "prod-1".into(),
                product_title: "Software System Design".into(),
                quantity: 2,
                unit_price: 9,
            }],
            18,
            2980,
        )
    }

    fn confirmation() -> PaymentConfirmation {
        PaymentConfirmation {
            gateway_order_id: "o1".into(),
            gateway_payment_id: "p1".into(),
            signature: "sig".into(),
        }
    }

    #[test]
    fn test_new_order_invariants() {
        let order = pending_order();
        assert_eq!(order.total, order.subtotal);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(order.gateway_order_id.is_empty());
        assert!(order.gateway_payment_id.is_empty());
        assert!(order.gateway_signature.is_empty());
    }

    #[test]
    fn test_confirmation_transition() {
        let mut order = pending_order();
        let outcome = order.apply_confirmation(&confirmation()).unwrap();

        assert_eq!(outcome, ConfirmOutcome::Applied);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.gateway_order_id, "o1");
        assert_eq!(order.gateway_payment_id, "p1");
    }

    #[test]
    fn test_repeat_confirmation_is_idempotent() {
        let mut order = pending_order();
        order.apply_confirmation(&confirmation()).unwrap();
        let updated_at = order.updated_at;

        let outcome = order.apply_confirmation(&confirmation()).unwrap();
        assert_eq!(outcome, ConfirmOutcome::AlreadyApplied);
        // No second write.
        assert_eq!(order.updated_at, updated_at);
    }

    #[test]
    fn test_conflicting_confirmation_rejected() {
        let mut order = pending_order();
        order.apply_confirmation(&confirmation()).unwrap();

        let other = PaymentConfirmation {
            gateway_order_id: "o2".into(),
            gateway_payment_id: "p2".into(),
            signature: "sig2".into(),
        };
        let err = order.apply_confirmation(&other).unwrap_err();
        assert!(matches!(err, CheckoutError::AlreadyConfirmed { .. }));
        // First winner's fields stand.
        assert_eq!(order.gateway_order_id, "o1");
    }

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 14);
        assert!(number[4..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
