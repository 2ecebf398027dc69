//! # Notification Port
//!
//! Fire-and-forget hook called after a payment confirmation succeeds.
//! Delivery (templated email, etc.) is an external collaborator; a
//! failure here never rolls back the confirmation.

use crate::error::CheckoutResult;
use crate::order::Order;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Notification collaborator
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Called once per successful payment confirmation
    async fn notify_order_confirmed(&self, order: &Order) -> CheckoutResult<()>;
}

/// Default notifier: just logs the confirmation
#[derive(Debug, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify_order_confirmed(&self, order: &Order) -> CheckoutResult<()> {
        info!(
            order_number = %order.order_number,
            email = %order.customer.email,
            total = order.total,
            "order confirmed"
        );
        Ok(())
    }
}

/// Type alias for a shared notifier handle
pub type SharedNotifier = Arc<dyn Notifier>;
