//! # Storefront
//!
//! Checkout pipeline server for the storefront backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export RAZORPAY_KEY_ID=rzp_test_...
//! export RAZORPAY_KEY_SECRET=...
//!
//! # Run the server
//! storefront
//! ```

use checkout_api::{routes, state::AppState};
use checkout_core::Catalog;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Products loaded: {}",
        state.catalog.list().await.map(|p| p.len()).unwrap_or(0)
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Storefront starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Create order: POST http://{}/api/orders", addr);
        info!("Verify payment: POST http://{}/api/payments/verify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
