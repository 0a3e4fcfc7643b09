//! Product records supplied by the catalog.

use serde::{Deserialize, Serialize};

use crate::Money;

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product category, e.g. `"electronics"` or `"men's clothing"`.
///
/// Compared exactly; the catalog feed is the source of truth for spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a category from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the category name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A catalog item.
///
/// Products are immutable once built. The cart and the purchase log keep
/// their own clones and never write back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: Money,
    image: String,
    category: Category,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            category: category.into(),
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Image URL or path, passed through untouched.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn category(&self) -> &Category {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_conversions() {
        let id = ProductId::new("SKU-001");
        assert_eq!(id.as_str(), "SKU-001");

        let numeric: ProductId = 7u64.into();
        assert_eq!(numeric.as_str(), "7");
    }

    #[test]
    fn test_product_accessors() {
        let product = Product::new(
            "1",
            "Backpack",
            Money::from_cents(10995),
            "https://img/1.jpg",
            "men's clothing",
        );

        assert_eq!(product.id(), &ProductId::new("1"));
        assert_eq!(product.title(), "Backpack");
        assert_eq!(product.price().cents(), 10995);
        assert_eq!(product.image(), "https://img/1.jpg");
        assert_eq!(product.category().as_str(), "men's clothing");
    }

    #[test]
    fn test_product_serialization() {
        let product = Product::new("1", "Ring", Money::from_cents(999), "ring.png", "jewelery");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["price"], 999);
        assert_eq!(json["category"], "jewelery");

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }
}
