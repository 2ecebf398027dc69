//! # Checkout Error Types
//!
//! Typed error handling for the checkout pipeline.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// No cart exists for this session
    #[error("Cart not found for session: {session_id}")]
    CartNotFound { session_id: String },

    /// Cart has no line for this product
    #[error("Item not found in cart: {product_id}")]
    ItemNotFound { product_id: String },

    /// Order lookup by order number failed
    #[error("Order not found: {order_number}")]
    OrderNotFound { order_number: String },

    /// Order creation attempted against an absent or empty cart
    #[error("Cart is empty for session: {session_id}")]
    EmptyCart { session_id: String },

    /// Payment signature did not match the expected HMAC
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// A completed order was re-confirmed with different gateway ids
    #[error("Order already confirmed with different payment details: {order_number}")]
    AlreadyConfirmed { order_number: String },

    /// Payment gateway API error
    #[error("Gateway error [{provider}]: {message}")]
    Gateway { provider: String, message: String },

    /// Order number collided with an existing order.
    /// Consumed internally by the bounded regenerate-and-retry loop.
    #[error("Duplicate order number: {order_number}")]
    DuplicateOrderNumber { order_number: String },

    /// Underlying persistence failure
    #[error("Store error: {0}")]
    Store(String),
}

impl CheckoutError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Gateway { .. }
                | CheckoutError::Store(_)
                | CheckoutError::DuplicateOrderNumber { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::ProductNotFound { .. } => 404,
            CheckoutError::CartNotFound { .. } => 404,
            CheckoutError::ItemNotFound { .. } => 404,
            CheckoutError::OrderNotFound { .. } => 404,
            CheckoutError::EmptyCart { .. } => 400,
            CheckoutError::InvalidSignature => 400,
            CheckoutError::AlreadyConfirmed { .. } => 409,
            CheckoutError::Gateway { .. } => 502,
            CheckoutError::DuplicateOrderNumber { .. } => 409,
            CheckoutError::Store(_) => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CheckoutError::Gateway {
            provider: "razorpay".into(),
            message: "timeout".into()
        }
        .is_retryable());
        assert!(CheckoutError::DuplicateOrderNumber {
            order_number: "ORD-AAAAAAAAAA".into()
        }
        .is_retryable());
        assert!(!CheckoutError::InvalidSignature.is_retryable());
        assert!(!CheckoutError::EmptyCart {
            session_id: "s1".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::ProductNotFound {
                product_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            CheckoutError::EmptyCart {
                session_id: "s1".into()
            }
            .status_code(),
            400
        );
        assert_eq!(CheckoutError::InvalidSignature.status_code(), 400);
        assert_eq!(
            CheckoutError::AlreadyConfirmed {
                order_number: "ORD-X".into()
            }
            .status_code(),
            409
        );
        assert_eq!(
            CheckoutError::Gateway {
                provider: "razorpay".into(),
                message: "auth failed".into()
            }
            .status_code(),
            502
        );
    }
}
