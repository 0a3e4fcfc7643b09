//! Catalog error types.

use thiserror::Error;

use crate::{Money, ProductId};

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog source is not valid JSON or has the wrong shape.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product carries a negative, non-numeric or oversized price.
    #[error("Invalid price for product {product_id}: {price}")]
    InvalidPrice { product_id: ProductId, price: String },

    /// Two products share the same identity.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

impl CatalogError {
    pub(crate) fn invalid_price(product_id: ProductId, price: Money) -> Self {
        CatalogError::InvalidPrice {
            product_id,
            price: price.to_string(),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
