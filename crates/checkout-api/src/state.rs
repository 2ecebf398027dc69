//! # Application State
//!
//! Shared state for the Axum application. The checkout service and its
//! collaborators are built here and injected; handlers never reach for
//! global clients.

use checkout_core::{
    CheckoutService, MemoryCartStore, MemoryCatalog, MemoryOrderStore, SharedCatalog,
    SharedGateway,
};
use checkout_razorpay::RazorpayGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for client-facing links
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout pipeline service
    pub checkout: CheckoutService,
    /// Product catalog (read side)
    pub catalog: SharedCatalog,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state from the environment: catalog from config file,
    /// in-memory stores, Razorpay gateway from env vars.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog: SharedCatalog = Arc::new(load_catalog()?);

        let gateway = RazorpayGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {e}"))?;

        Ok(Self::with_parts(config, catalog, Arc::new(gateway)))
    }

    /// Build state from explicit parts (tests inject a stub gateway)
    pub fn with_parts(config: AppConfig, catalog: SharedCatalog, gateway: SharedGateway) -> Self {
        let checkout = CheckoutService::new(
            Arc::clone(&catalog),
            Arc::new(MemoryCartStore::new()),
            Arc::new(MemoryOrderStore::new()),
            gateway,
        );

        Self {
            checkout,
            catalog,
            config,
        }
    }
}

/// Load the product catalog from the config file
fn load_catalog() -> anyhow::Result<MemoryCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = MemoryCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {path}: {e}"))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using empty catalog");
    Ok(MemoryCatalog::new())
}
