use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use supplyflow_core::{OrderId, SupplierId};
use supplyflow_ordering::Order;

use super::r#trait::{OrderRepository, RepositoryError};

/// In-memory order store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<OrderId, Order>>, RepositoryError> {
        self.orders
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<OrderId, Order>>, RepositoryError> {
        self.orders
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut orders = self.write()?;
        orders.insert(order.id_typed(), order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_supplier(&self, supplier_id: &SupplierId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|o| o.supplier_id() == supplier_id)
            .cloned()
            .collect())
    }

    fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        self.write()?.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use supplyflow_catalog::{Product, TemperatureMode};
    use supplyflow_core::ProductId;

    use super::*;

    fn beef() -> Arc<Product> {
        Arc::new(
            Product::new(ProductId::new(), "Beef", "Meat", TemperatureMode::Chilled, 5).unwrap(),
        )
    }

    fn order_for(supplier: &str) -> Order {
        Order::new(
            OrderId::new(),
            SupplierId::new(supplier).unwrap(),
            [(beef(), 5)],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn save_then_find_returns_identical_aggregate() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("S1");

        repo.save(order.clone()).unwrap();
        let loaded = repo.find_by_id(order.id_typed()).unwrap().unwrap();

        assert_eq!(loaded, order);
        assert_eq!(loaded.created_at(), order.created_at());
        assert_eq!(loaded.updated_at(), order.updated_at());
    }

    #[test]
    fn save_overwrites_by_id() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order_for("S1");
        repo.save(order.clone()).unwrap();

        order.confirm(Utc::now()).unwrap();
        repo.save(order.clone()).unwrap();

        assert_eq!(repo.len(), 1);
        let loaded = repo.find_by_id(order.id_typed()).unwrap().unwrap();
        assert_eq!(loaded.status(), order.status());
    }

    #[test]
    fn find_by_supplier_filters() {
        let repo = InMemoryOrderRepository::new();
        repo.save(order_for("S1")).unwrap();
        repo.save(order_for("S1")).unwrap();
        repo.save(order_for("S2")).unwrap();

        let s1 = SupplierId::new("S1").unwrap();
        assert_eq!(repo.find_by_supplier(&s1).unwrap().len(), 2);
        assert_eq!(repo.find_all().unwrap().len(), 3);
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("S1");
        repo.save(order.clone()).unwrap();

        repo.delete(order.id_typed()).unwrap();
        repo.delete(order.id_typed()).unwrap();
        assert!(repo.find_by_id(order.id_typed()).unwrap().is_none());
        assert!(repo.is_empty());
    }
}
