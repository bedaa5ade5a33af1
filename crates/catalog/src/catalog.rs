//! Read-only product lookup.

use std::collections::HashMap;
use std::sync::Arc;

use supplyflow_core::{DomainResult, ProductId};

use crate::product::{Product, TemperatureMode};

/// Immutable set of products, keyed by id.
///
/// Products are handed out as shared `Arc`s; orders keep references to them and
/// never own their lifecycle.
#[derive(Debug, Default, Clone)]
pub struct ProductCatalog {
    products: HashMap<ProductId, Arc<Product>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from product records. Later duplicates of an id win.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.id_typed(), Arc::new(p)))
            .collect();
        Self { products }
    }

    /// Restaurant starter catalog used by the HTTP adapter in dev setups.
    pub fn demo() -> DomainResult<Self> {
        let rows = [
            ("Beef", "Meat", TemperatureMode::Chilled, 5),
            ("Chicken", "Meat", TemperatureMode::Chilled, 4),
            ("Potatoes", "Vegetables", TemperatureMode::Ambient, 30),
            ("Tomatoes", "Vegetables", TemperatureMode::Chilled, 7),
            ("Bread", "Bakery", TemperatureMode::Ambient, 3),
            ("Cheese", "Dairy", TemperatureMode::Chilled, 14),
            ("Milk", "Dairy", TemperatureMode::Chilled, 7),
        ];

        let products = rows
            .into_iter()
            .map(|(name, category, mode, days)| {
                Product::new(ProductId::new(), name, category, mode, days)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self::from_products(products))
    }

    pub fn get(&self, id: &ProductId) -> Option<Arc<Product>> {
        self.products.get(id).cloned()
    }

    /// Lookup by exact (case-insensitive) product name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Product>> {
        self.products
            .values()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// All products, sorted by name for stable listings.
    pub fn list(&self) -> Vec<Arc<Product>> {
        let mut all: Vec<_> = self.products.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
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

    #[test]
    fn demo_catalog_contains_the_restaurant_staples() {
        let catalog = ProductCatalog::demo().unwrap();
        assert_eq!(catalog.len(), 7);

        let beef = catalog.find_by_name("beef").unwrap();
        assert_eq!(beef.category(), "Meat");
        assert_eq!(beef.temperature_mode(), TemperatureMode::Chilled);
        assert_eq!(catalog.get(&beef.id_typed()).unwrap().name(), "Beef");
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let catalog = ProductCatalog::demo().unwrap();
        let names: Vec<_> = catalog.list().iter().map(|p| p.name().to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_id_is_absent() {
        let catalog = ProductCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.get(&ProductId::new()).is_none());
    }
}
