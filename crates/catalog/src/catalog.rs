//! Loaded catalog snapshot.

use std::collections::HashMap;

use crate::{
    Category, CatalogError, CatalogFilter, CatalogProvider, Money, Product, ProductId, Result,
};

/// Read-only snapshot of the product catalog.
///
/// Keeps the provider's ordering for listing and an index for lookups by
/// product identity.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from a product list.
    ///
    /// Fails if two products share an id or a price is negative or above
    /// [`Money::MAX_PRICE`].
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price().is_negative() || product.price() > Money::MAX_PRICE {
                return Err(CatalogError::invalid_price(
                    product.id().clone(),
                    product.price(),
                ));
            }
            if index.insert(product.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id().clone()));
            }
        }

        Ok(Self { products, index })
    }

    /// Fetches products from a provider and builds the snapshot.
    pub async fn load(provider: &dyn CatalogProvider) -> Result<Self> {
        let products = provider.fetch_products().await?;
        let catalog = Self::new(products)?;
        tracing::info!(
            provider = provider.name(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns a product by id.
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.index
            .get(product_id)
            .and_then(|&position| self.products.get(position))
    }

    /// Returns all products in provider order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the products matching a filter, in provider order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Returns the distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category()) {
                seen.push(product.category());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PriceBand, StaticCatalog};

    fn sample() -> Vec<Product> {
        vec![
            Product::new("1", "Backpack", Money::from_cents(10995), "", "men's clothing"),
            Product::new("2", "T-Shirt", Money::from_cents(2230), "", "men's clothing"),
            Product::new("5", "Bracelet", Money::from_cents(69500), "", "jewelery"),
            Product::new("9", "Hard Drive", Money::from_cents(6400), "", "electronics"),
        ]
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(sample()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get(&ProductId::new("5")).map(Product::title),
            Some("Bracelet")
        );
        assert!(catalog.get(&ProductId::new("404")).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = sample();
        products.push(Product::new("1", "Clone", Money::from_cents(1), "", "x"));
        let result = Catalog::new(products);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id.as_str() == "1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let products = vec![Product::new("1", "Bad", Money::from_cents(-1), "", "x")];
        let result = Catalog::new(products);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { .. })));
    }

    #[test]
    fn test_price_above_cap_rejected() {
        let products = vec![Product::new("1", "Yacht", Money::from_cents(i64::MAX / 2), "", "x")];
        let result = Catalog::new(products);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { product_id, .. }) if product_id.as_str() == "1"));

        let at_cap = vec![Product::new("2", "Jet", Money::MAX_PRICE, "", "x")];
        assert!(Catalog::new(at_cap).is_ok());
    }

    #[test]
    fn test_filter_keeps_provider_order() {
        let catalog = Catalog::new(sample()).unwrap();

        let clothing = catalog.filter(&CatalogFilter::new().category("men's clothing"));
        let ids: Vec<_> = clothing.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["1", "2"]);

        let medium = catalog.filter(&CatalogFilter::new().price_band(PriceBand::Medium));
        let ids: Vec<_> = medium.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["9"]);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = Catalog::new(sample()).unwrap();
        let names: Vec<_> = catalog.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["men's clothing", "jewelery", "electronics"]);
    }

    #[tokio::test]
    async fn test_load_from_provider() {
        let provider = StaticCatalog::new(sample());
        let catalog = Catalog::load(&provider).await.unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
    }
}
