//! # Checkout Coordinator
//!
//! Orchestrates cart store -> order builder -> payment gateway -> order
//! state transition. Owns the correctness contract of the whole flow;
//! every collaborator is injected at construction.

use crate::cart::Cart;
use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{IntentRequest, PaymentGateway, PaymentIntent, SharedGateway};
use crate::notify::{LoggingNotifier, Notifier, SharedNotifier};
use crate::order::{generate_order_number, CustomerInfo, Order, PaymentConfirmation};
use crate::pricing::{price_cart, ResolvedLine};
use crate::product::{Catalog, Currency, SharedCatalog};
use crate::store::{CartStore, OrderStore, SharedCartStore, SharedOrderStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Bounded regeneration attempts for an order-number collision
const ORDER_NUMBER_ATTEMPTS: u32 = 3;

type OrderNumberGen = Arc<dyn Fn() -> String + Send + Sync>;

/// The checkout pipeline service
#[derive(Clone)]
pub struct CheckoutService {
    catalog: SharedCatalog,
    carts: SharedCartStore,
    orders: SharedOrderStore,
    gateway: SharedGateway,
    notifier: SharedNotifier,
    currency: Currency,
    order_numbers: OrderNumberGen,
}

impl CheckoutService {
    /// Create a service with the default currency and logging notifier
    pub fn new(
        catalog: SharedCatalog,
        carts: SharedCartStore,
        orders: SharedOrderStore,
        gateway: SharedGateway,
    ) -> Self {
        Self {
            catalog,
            carts,
            orders,
            gateway,
            notifier: Arc::new(LoggingNotifier),
            currency: Currency::default(),
            order_numbers: Arc::new(generate_order_number),
        }
    }

    /// Builder: replace the notifier
    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Builder: set the storefront currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Builder: replace the order-number generator (tests)
    pub fn with_order_number_gen(
        mut self,
        gen: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.order_numbers = Arc::new(gen);
        self
    }

    // ----- cart operations ---------------------------------------------

    /// Fetch the session's cart, creating an empty one if absent
    pub async fn get_or_create_cart(&self, session_id: &str) -> CheckoutResult<Cart> {
        self.carts.get_or_create(session_id).await
    }

    /// Add a product to the cart. The product must resolve in the
    /// catalog; its current price is captured onto the line at this
    /// moment. Quantities merge onto an existing line at its first-add
    /// price.
    pub async fn add_cart_item(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> CheckoutResult<Cart> {
        if quantity == 0 {
            return Err(CheckoutError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        let product = self
            .catalog
            .lookup(product_id)
            .await?
            .ok_or_else(|| CheckoutError::ProductNotFound {
                product_id: product_id.to_string(),
            })?;
        self.carts
            .add_line(session_id, product_id, quantity, product.current_price)
            .await
    }

    /// Replace a line's quantity; `<= 0` removes the line
    pub async fn update_cart_item(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CheckoutResult<Cart> {
        self.carts
            .set_line_quantity(session_id, product_id, quantity)
            .await
    }

    /// Remove a line (idempotent for a missing line)
    pub async fn remove_cart_item(
        &self,
        session_id: &str,
        product_id: &str,
    ) -> CheckoutResult<Cart> {
        self.carts.remove_line(session_id, product_id).await
    }

    /// Delete the session's cart
    pub async fn clear_cart(&self, session_id: &str) -> CheckoutResult<()> {
        self.carts.clear(session_id).await
    }

    // ----- order builder -----------------------------------------------

    /// Snapshot the session's cart into a pending order.
    ///
    /// The cart is left in place: it stays recoverable until payment is
    /// confirmed. An order-number collision is retried internally with a
    /// fresh number, bounded at [`ORDER_NUMBER_ATTEMPTS`].
    #[instrument(skip(self, customer), fields(session_id = %session_id))]
    pub async fn create_order(
        &self,
        session_id: &str,
        customer: CustomerInfo,
    ) -> CheckoutResult<Order> {
        let cart = self
            .carts
            .get(session_id)
            .await?
            .filter(|c| !c.is_empty())
            .ok_or_else(|| CheckoutError::EmptyCart {
                session_id: session_id.to_string(),
            })?;

        let mut resolved = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            let product = self.catalog.lookup(&item.product_id).await?;
            resolved.push(ResolvedLine::new(product, item));
        }
        let priced = price_cart(&resolved);

        let mut last_err = None;
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let order_number = (self.order_numbers)();
            let order = Order::new(
                &order_number,
                session_id,
                customer.clone(),
                priced.lines.clone(),
                priced.subtotal,
                priced.discount,
            );
            match self.orders.insert(order.clone()).await {
                Ok(()) => {
                    info!(order_number = %order.order_number, total = order.total, "order created");
                    return Ok(order);
                }
                Err(err @ CheckoutError::DuplicateOrderNumber { .. }) => {
                    warn!(order_number = %order_number, "order number collision, regenerating");
                    last_err = Some(err);
                }
                Err(other) => return Err(other),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            CheckoutError::Store("order number generation exhausted".to_string())
        }))
    }

    // ----- payment -----------------------------------------------------

    /// Create a gateway payment intent for a pending order
    #[instrument(skip(self), fields(order_number = %order_number))]
    pub async fn create_payment_intent(&self, order_number: &str) -> CheckoutResult<PaymentIntent> {
        let order = self.get_order(order_number).await?;
        let request = IntentRequest::for_receipt(order.total, self.currency, &order.order_number)
            .with_note("order_number", &order.order_number);
        self.gateway.create_intent(request).await
    }

    /// Confirm a payment against an order.
    ///
    /// The signature is verified before any state is touched; the order
    /// transition itself is a store-atomic compare-and-swap, so duplicate
    /// or racing confirmations with identical gateway ids all observe
    /// success while exactly one write lands. On success the originating
    /// cart is cleared and the notifier fires; neither can roll the
    /// confirmation back.
    #[instrument(skip(self, signature), fields(order_number = %order_number))]
    pub async fn confirm_payment(
        &self,
        order_number: &str,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> CheckoutResult<Order> {
        let verified =
            self.gateway
                .verify_signature(gateway_order_id, gateway_payment_id, signature)?;
        if !verified {
            return Err(CheckoutError::InvalidSignature);
        }

        let confirmation = PaymentConfirmation {
            gateway_order_id: gateway_order_id.to_string(),
            gateway_payment_id: gateway_payment_id.to_string(),
            signature: signature.to_string(),
        };
        let order = self
            .orders
            .confirm_payment(order_number, &confirmation)
            .await?;

        info!(order_number = %order.order_number, "payment confirmed");

        if let Err(err) = self.notifier.notify_order_confirmed(&order).await {
            warn!(order_number = %order.order_number, error = %err, "notification failed");
        }
        if let Err(err) = self.carts.clear(&order.session_id).await {
            warn!(session_id = %order.session_id, error = %err, "cart clear failed");
        }

        Ok(order)
    }

    // ----- order queries -----------------------------------------------

    /// Fetch an order by order number
    pub async fn get_order(&self, order_number: &str) -> CheckoutResult<Order> {
        self.orders
            .get(order_number)
            .await?
            .ok_or_else(|| CheckoutError::OrderNotFound {
                order_number: order_number.to_string(),
            })
    }

    /// All orders for a customer email
    pub async fn list_orders_by_email(&self, email: &str) -> CheckoutResult<Vec<Order>> {
        self.orders.list_by_email(email).await
    }
}
