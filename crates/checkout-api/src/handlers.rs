//! # Request Handlers
//!
//! Axum request handlers for the storefront API. Route semantics follow
//! the checkout pipeline: cart mutation, cart-to-order conversion,
//! payment-intent creation, and signature-verified confirmation.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{Catalog, CheckoutError, CustomerInfo};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add-to-cart request
#[derive(Debug, Deserialize)]
pub struct CartItemAdd {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Cart line quantity update
#[derive(Debug, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i64,
}

/// Create-order request: session plus billing details
#[derive(Debug, Deserialize)]
pub struct OrderCreate {
    pub session_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

impl OrderCreate {
    fn into_parts(self) -> (String, CustomerInfo) {
        let customer = CustomerInfo {
            name: self.customer_name,
            email: self.customer_email,
            phone: self.customer_phone,
            billing_address: self.billing_address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
        };
        (self.session_id, customer)
    }
}

/// Payment-intent request
#[derive(Debug, Deserialize)]
pub struct IntentCreate {
    pub order_number: String,
}

/// Payment confirmation callback from the client
#[derive(Debug, Deserialize)]
pub struct PaymentVerify {
    pub order_number: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn checkout_error_to_response(err: CheckoutError) -> ApiError {
    let code = err.status_code();
    if code >= 500 {
        error!("checkout error: {err}");
    }
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(err.to_string(), code)),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .catalog
        .list()
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(products))
}

/// Get a single product by slug
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .catalog
        .get_by_slug(&slug)
        .await
        .map_err(checkout_error_to_response)?
        .ok_or_else(|| {
            checkout_error_to_response(CheckoutError::ProductNotFound { product_id: slug })
        })?;
    Ok(Json(product))
}

/// Get (or lazily create) the session's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .checkout
        .get_or_create_cart(&session_id)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(cart))
}

/// Add an item to the session's cart
#[instrument(skip(state, request), fields(session_id = %session_id, product_id = %request.product_id))]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<CartItemAdd>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .checkout
        .add_cart_item(&session_id, &request.product_id, request.quantity)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(cart))
}

/// Update a cart line's quantity (`<= 0` removes the line)
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
    Json(request): Json<CartItemUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .checkout
        .update_cart_item(&session_id, &product_id, request.quantity)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(cart))
}

/// Remove a cart line
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .checkout
        .remove_cart_item(&session_id, &product_id)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(cart))
}

/// Delete the session's cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .checkout
        .clear_cart(&session_id)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(serde_json::json!({
        "message": "Cart cleared successfully"
    })))
}

/// Create an order from the session's cart
#[instrument(skip(state, request), fields(session_id = %request.session_id))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<OrderCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let (session_id, customer) = request.into_parts();
    let order = state
        .checkout
        .create_order(&session_id, customer)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(order))
}

/// Get an order by order number
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .checkout
        .get_order(&order_number)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(order))
}

/// List all orders for an email
pub async fn list_orders_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .checkout
        .list_orders_by_email(&email)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(orders))
}

/// Create a gateway payment intent for an order
#[instrument(skip(state, request), fields(order_number = %request.order_number))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<IntentCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state
        .checkout
        .create_payment_intent(&request.order_number)
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(intent))
}

/// Verify a payment signature and complete the order
#[instrument(skip(state, request), fields(order_number = %request.order_number))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentVerify>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .checkout
        .confirm_payment(
            &request.order_number,
            &request.gateway_order_id,
            &request.gateway_payment_id,
            &request.signature,
        )
        .await
        .map_err(checkout_error_to_response)?;
    Ok(Json(order))
}
