//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Products:
///   - GET    /api/products - List all products
///   - GET    /api/products/{slug} - Get product by slug
///
/// - Cart:
///   - GET    /api/cart/{session_id} - Get or create the session's cart
///   - POST   /api/cart/{session_id}/items - Add item
///   - PUT    /api/cart/{session_id}/items/{product_id} - Update quantity
///   - DELETE /api/cart/{session_id}/items/{product_id} - Remove item
///   - DELETE /api/cart/{session_id} - Clear cart
///
/// - Orders:
///   - POST   /api/orders - Create order from cart
///   - GET    /api/orders/{order_number} - Get order
///   - GET    /api/orders/email/{email} - List orders for email
///
/// - Payments:
///   - POST   /api/payments/intent - Create gateway payment intent
///   - POST   /api/payments/verify - Verify signature, complete order
pub fn create_router(state: AppState) -> Router {
    // CORS: the storefront frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let product_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{slug}", get(handlers::get_product));

    let cart_routes = Router::new()
        .route(
            "/cart/{session_id}",
            get(handlers::get_cart).delete(handlers::clear_cart),
        )
        .route("/cart/{session_id}/items", post(handlers::add_cart_item))
        .route(
            "/cart/{session_id}/items/{product_id}",
            put(handlers::update_cart_item).delete(handlers::remove_cart_item),
        );

    let order_routes = Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/{order_number}", get(handlers::get_order))
        .route("/orders/email/{email}", get(handlers::list_orders_by_email));

    let payment_routes = Router::new()
        .route("/payments/intent", post(handlers::create_payment_intent))
        .route("/payments/verify", post(handlers::verify_payment));

    let api_routes = Router::new()
        .merge(product_routes)
        .merge(cart_routes)
        .merge(order_routes)
        .merge(payment_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
