//! Checkout policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which cart lines a successful checkout removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearScope {
    /// Empty the whole cart, even after a single-product buy-now.
    #[default]
    EntireCart,

    /// Remove only the lines of the products that were bought.
    PurchasedItems,
}

impl ClearScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearScope::EntireCart => "entire-cart",
            ClearScope::PurchasedItems => "purchased-items",
        }
    }
}

impl std::fmt::Display for ClearScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrecognized clear scope name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown clear scope '{0}', expected 'entire-cart' or 'purchased-items'")]
pub struct ParseClearScopeError(pub String);

impl FromStr for ClearScope {
    type Err = ParseClearScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "entire-cart" | "entire" | "all" => Ok(ClearScope::EntireCart),
            "purchased-items" | "purchased" => Ok(ClearScope::PurchasedItems),
            _ => Err(ParseClearScopeError(s.to_string())),
        }
    }
}

/// Settings for the checkout orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub clear_scope: ClearScope,
}

impl CheckoutConfig {
    pub fn with_clear_scope(mut self, clear_scope: ClearScope) -> Self {
        self.clear_scope = clear_scope;
        self
    }
}
