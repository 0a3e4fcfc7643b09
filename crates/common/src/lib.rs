//! Identifiers shared across the storefront crates.

pub mod types;

pub use types::{CheckoutId, Version};
