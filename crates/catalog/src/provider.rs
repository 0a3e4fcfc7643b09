//! Catalog sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{CatalogError, Money, Product, ProductId, Result};

/// A source of catalog products.
///
/// Loading is the only asynchronous step in the storefront; it happens once,
/// before the session starts handling commands.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of this provider, for logs.
    fn name(&self) -> &'static str;

    /// Fetches the full ordered product list.
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// Provider over a fixed in-memory product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Creates a provider returning the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    fn name(&self) -> &'static str {
        "StaticCatalog"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}

/// Provider reading a JSON array of products from disk.
///
/// The expected shape is that of common fake-store feeds:
///
/// ```json
/// [{ "id": 1, "title": "Backpack", "price": 109.95,
///    "category": "men's clothing", "image": "https://..." }]
/// ```
///
/// `id` may be a number or a string, `price` is in decimal dollars, and
/// any other fields are ignored.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Creates a provider for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a feed document into products.
    pub fn parse(json: &str) -> Result<Vec<Product>> {
        let raw: Vec<RawProduct> = serde_json::from_str(json)?;
        raw.into_iter().map(RawProduct::into_product).collect()
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    fn name(&self) -> &'static str {
        "JsonFileCatalog"
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        Self::parse(&json)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    id: RawId,
    title: String,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    category: String,
}

impl RawProduct {
    fn into_product(self) -> Result<Product> {
        let id = match self.id {
            RawId::Number(n) => ProductId::from(n),
            RawId::Text(s) => ProductId::from(s),
        };
        let price = Money::from_decimal_dollars(self.price)
            .filter(|price| !price.is_negative() && *price <= Money::MAX_PRICE)
            .ok_or_else(|| CatalogError::InvalidPrice {
                product_id: id.clone(),
                price: self.price.to_string(),
            })?;

        Ok(Product::new(
            id,
            self.title,
            price,
            self.image,
            self.category.as_str(),
        ))
    }
}
