//! Catalog filters used by the product listing.

use serde::{Deserialize, Serialize};

use crate::{Category, Money, Product};

/// Price bands offered by the product listing.
///
/// ```text
/// Low     price <  $50
/// Medium  $50 <= price <= $100
/// High    price > $100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriceBand {
    const LOW_CEILING: i64 = 5_000;
    const HIGH_FLOOR: i64 = 10_000;

    /// Returns true if the price falls inside this band.
    pub fn contains(&self, price: Money) -> bool {
        let cents = price.cents();
        match self {
            PriceBand::All => true,
            PriceBand::Low => cents < Self::LOW_CEILING,
            PriceBand::Medium => (Self::LOW_CEILING..=Self::HIGH_FLOOR).contains(&cents),
            PriceBand::High => cents > Self::HIGH_FLOOR,
        }
    }

    /// Returns the band name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::All => "all",
            PriceBand::Low => "low",
            PriceBand::Medium => "medium",
            PriceBand::High => "high",
        }
    }
}

impl std::fmt::Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combined category and price filter.
///
/// A `None` category matches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub price_band: PriceBand,
}

impl CatalogFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a single category.
    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to a price band.
    pub fn price_band(mut self, band: PriceBand) -> Self {
        self.price_band = band;
        self
    }

    /// Returns true if the product passes both criteria.
    pub fn matches(&self, product: &Product) -> bool {
        let in_category = self
            .category
            .as_ref()
            .is_none_or(|category| product.category() == category);
        in_category && self.price_band.contains(product.price())
    }
}
