//! # In-Memory Stores
//!
//! `RwLock<HashMap>` implementations of the store ports. Mutations run
//! under the write lock, which serializes same-key operations and makes
//! each semantic operation atomic.

use crate::cart::Cart;
use crate::error::{CheckoutError, CheckoutResult};
use crate::order::{Order, PaymentConfirmation};
use crate::store::{CartStore, OrderStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory cart store, keyed by session id
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: RwLock<HashMap<String, Cart>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn get(&self, session_id: &str) -> CheckoutResult<Option<Cart>> {
        Ok(self.carts.read().await.get(session_id).cloned())
    }

    async fn get_or_create(&self, session_id: &str) -> CheckoutResult<Cart> {
        let mut carts = self.carts.write().await;
        Ok(carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id))
            .clone())
    }

    async fn add_line(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: u32,
        unit_price: i64,
    ) -> CheckoutResult<Cart> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id));
        cart.add_line(product_id, quantity, unit_price);
        Ok(cart.clone())
    }

    async fn set_line_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CheckoutResult<Cart> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .get_mut(session_id)
            .ok_or_else(|| CheckoutError::CartNotFound {
                session_id: session_id.to_string(),
            })?;
        if !cart.set_line_quantity(product_id, quantity) {
            return Err(CheckoutError::ItemNotFound {
                product_id: product_id.to_string(),
            });
        }
        Ok(cart.clone())
    }

    async fn remove_line(&self, session_id: &str, product_id: &str) -> CheckoutResult<Cart> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .get_mut(session_id)
            .ok_or_else(|| CheckoutError::CartNotFound {
                session_id: session_id.to_string(),
            })?;
        cart.remove_line(product_id);
        Ok(cart.clone())
    }

    async fn clear(&self, session_id: &str) -> CheckoutResult<()> {
        self.carts.write().await.remove(session_id);
        Ok(())
    }
}

/// In-memory order store. Orders are kept by order number (the unique
/// key); the write lock doubles as the uniqueness constraint and as the
/// serialization point for the confirmation compare-and-swap.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: Order) -> CheckoutResult<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.order_number) {
            return Err(CheckoutError::DuplicateOrderNumber {
                order_number: order.order_number,
            });
        }
        orders.insert(order.order_number.clone(), order);
        Ok(())
    }

    async fn get(&self, order_number: &str) -> CheckoutResult<Option<Order>> {
        Ok(self.orders.read().await.get(order_number).cloned())
    }

    async fn list_by_email(&self, email: &str) -> CheckoutResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matched: Vec<Order> = orders
            .values()
            .filter(|o| o.customer.email == email)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matched)
    }

    async fn confirm_payment(
        &self,
        order_number: &str,
        confirmation: &PaymentConfirmation,
    ) -> CheckoutResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(order_number)
            .ok_or_else(|| CheckoutError::OrderNotFound {
                order_number: order_number.to_string(),
            })?;
        order.apply_confirmation(confirmation)?;
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{generate_order_number, ConfirmOutcome, CustomerInfo, OrderStatus};
    use std::sync::Arc;

    fn order_with_number(number: &str) -> Order {
        Order::new(
            number,
            "sess-1",
            CustomerInfo {
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                ..CustomerInfo::default()
            },
            Vec::new(),
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

    #[tokio::test]
    async fn test_get_or_create_persists() {
        let store = MemoryCartStore::new();
        let first = store.get_or_create("sess-1").await.unwrap();
        let second = store.get_or_create("sess-1").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_clear_deletes_document() {
        let store = MemoryCartStore::new();
        store.add_line("sess-1", "prod-1", 1, 9).await.unwrap();
        store.clear("sess-1").await.unwrap();
        assert!(store.get("sess-1").await.unwrap().is_none());
        // Clearing again is fine.
        store.clear("sess-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_mutations_on_missing_cart() {
        let store = MemoryCartStore::new();
        let err = store
            .set_line_quantity("sess-x", "prod-1", 2)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::CartNotFound { .. }));

        let err = store.remove_line("sess-x", "prod-1").await.unwrap_err();
        assert!(matches!(err, CheckoutError::CartNotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_lose_nothing() {
        let store = Arc::new(MemoryCartStore::new());

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_line("sess-1", "prod-1", 1, 9).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let cart = store.get("sess-1").await.unwrap().unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 20);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_rejected() {
        let store = MemoryOrderStore::new();
        store.insert(order_with_number("ORD-SAME000000")).await.unwrap();

        let err = store
            .insert(order_with_number("ORD-SAME000000"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::DuplicateOrderNumber { .. }));
    }

    #[tokio::test]
    async fn test_list_by_email() {
        let store = MemoryOrderStore::new();
        store.insert(order_with_number(&generate_order_number())).await.unwrap();
        store.insert(order_with_number(&generate_order_number())).await.unwrap();

        let orders = store.list_by_email("asha@example.com").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(store
            .list_by_email("other@example.com")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_confirms_apply_once() {
        let store = Arc::new(MemoryOrderStore::new());
        store.insert(order_with_number("ORD-RACE000000")).await.unwrap();

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.confirm_payment("ORD-RACE000000", &confirmation()).await
            })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.confirm_payment("ORD-RACE000000", &confirmation()).await
            })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        // Both callers observe success; exactly one write happened.
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.status, OrderStatus::Completed);
        assert_eq!(b.status, OrderStatus::Completed);
        assert_eq!(a.updated_at, b.updated_at);

        let stored = store.get("ORD-RACE000000").await.unwrap().unwrap();
        assert_eq!(stored.gateway_payment_id, "p1");
    }

    #[tokio::test]
    async fn test_confirm_outcome_sequence() {
        let mut order = order_with_number("ORD-SEQ0000000");
        assert_eq!(
            order.apply_confirmation(&confirmation()).unwrap(),
            ConfirmOutcome::Applied
        );
        assert_eq!(
            order.apply_confirmation(&confirmation()).unwrap(),
            ConfirmOutcome::AlreadyApplied
        );
    }
}
