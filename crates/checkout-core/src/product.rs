//! # Product Types
//!
//! Catalog entry types for the storefront.
//! The catalog itself is an external collaborator consumed through the
//! [`Catalog`] trait; products are loaded from `config/products.toml`.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    /// Minor units per major unit (paise per rupee, cents per dollar)
    pub fn minor_unit_factor(&self) -> i64 {
        100
    }

    /// Convert a catalog price (major units) to the gateway's minor units
    pub fn to_minor_units(&self, amount: i64) -> i64 {
        amount * self.minor_unit_factor()
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product in the catalog.
///
/// Prices are integer amounts in major currency units, exactly as the
/// catalog defines them. `original_price` is the strike-through price;
/// `current_price` is what the customer pays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "prod-1")
    pub id: String,

    /// Display title
    pub title: String,

    /// URL slug (unique)
    pub slug: String,

    /// Cover image URL
    #[serde(default)]
    pub image: String,

    /// Strike-through list price
    pub original_price: i64,

    /// Current selling price
    pub current_price: i64,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Feature bullet points
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Create a product with the pricing fields that drive checkout
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        original_price: i64,
        current_price: i64,
    ) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            title: title.into(),
            image: String::new(),
            original_price,
            current_price,
            description: String::new(),
            features: Vec::new(),
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// Read-side catalog collaborator.
///
/// Checkout only ever resolves products; catalog writes live elsewhere.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve a product by id
    async fn lookup(&self, product_id: &str) -> CheckoutResult<Option<Product>>;

    /// Resolve a product by slug
    async fn get_by_slug(&self, slug: &str) -> CheckoutResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> CheckoutResult<Vec<Product>>;
}

/// Type alias for a shared catalog handle
pub type SharedCatalog = Arc<dyn Catalog>;

/// In-memory catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    pub products: Vec<Product>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a list of products
    pub fn with_products(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { products, by_id }
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let parsed: MemoryCatalog = toml::from_str(toml_str)?;
        Ok(Self::with_products(parsed.products))
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn lookup(&self, product_id: &str) -> CheckoutResult<Option<Product>> {
        Ok(self
            .by_id
            .get(product_id)
            .and_then(|&i| self.products.get(i))
            .cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> CheckoutResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list(&self) -> CheckoutResult<Vec<Product>> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_minor_units() {
        assert_eq!(Currency::INR.to_minor_units(9), 900);
        assert_eq!(Currency::USD.to_minor_units(1499), 149_900);
        assert_eq!(Currency::default(), Currency::INR);
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("prod-1", "Software System Design", 1499, 9)
            .with_slug("software-system-design")
            .with_description("Master system design fundamentals");

        assert_eq!(product.id, "prod-1");
        assert_eq!(product.slug, "software-system-design");
        assert_eq!(product.original_price, 1499);
        assert_eq!(product.current_price, 9);
    }

    #[tokio::test]
    async fn test_catalog_lookup() {
        let catalog = MemoryCatalog::with_products(vec![
            Product::new("prod-1", "Book A", 1499, 9),
            Product::new("prod-2", "Book B", 999, 49).with_slug("book-b"),
        ]);

        let found = catalog.lookup("prod-2").await.unwrap().unwrap();
        assert_eq!(found.title, "Book B");

        let by_slug = catalog.get_by_slug("book-b").await.unwrap().unwrap();
        assert_eq!(by_slug.id, "prod-2");

        assert!(catalog.lookup("prod-9").await.unwrap().is_none());
        assert_eq!(catalog.list().await.unwrap().len(), 2);
    }

    #[test]
    fn test_catalog_from_toml() {
        let toml_str = r#"
            [[products]]
            id = "prod-1"
            title = "Software Architecture Patterns"
            slug = "software-architecture-patterns"
            original_price = 1499
            current_price = 9
        "#;

        let catalog = MemoryCatalog::from_toml(toml_str).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products[0].current_price, 9);
    }
}
