//! Product catalog for the storefront.
//!
//! The catalog is read-only input to the cart and checkout crates:
//! - [`Product`], [`ProductId`], [`Category`] and [`Money`] value types
//! - [`CatalogProvider`] for loading products from a source
//! - [`Catalog`], the loaded snapshot with lookup and [`CatalogFilter`] support

pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod product;
pub mod provider;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use filter::{CatalogFilter, PriceBand};
pub use money::Money;
pub use product::{Category, Product, ProductId};
pub use provider::{CatalogProvider, JsonFileCatalog, StaticCatalog};
