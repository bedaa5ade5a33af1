use std::sync::Arc;

use thiserror::Error;

use supplyflow_core::{OrderId, SupplierId};
use supplyflow_ordering::Order;

/// Storage failure. These are **infrastructure errors**, never business rule
/// violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("order storage unavailable: {0}")]
    Unavailable(String),
}

/// Keyed order storage with plain CRUD semantics.
///
/// ## Contract
///
/// - `save` overwrites by id and hands back what was stored
/// - reads return copies: callers never observe a half-written aggregate
/// - `find_all` / `find_by_supplier` make no ordering promise
/// - calls are synchronous and either return or fail immediately
pub trait OrderRepository: Send + Sync {
    fn save(&self, order: Order) -> Result<Order, RepositoryError>;

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;

    fn find_by_supplier(&self, supplier_id: &SupplierId) -> Result<Vec<Order>, RepositoryError>;

    fn delete(&self, id: OrderId) -> Result<(), RepositoryError>;
}

impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    fn save(&self, order: Order) -> Result<Order, RepositoryError> {
        (**self).save(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        (**self).find_all()
    }

    fn find_by_supplier(&self, supplier_id: &SupplierId) -> Result<Vec<Order>, RepositoryError> {
        (**self).find_by_supplier(supplier_id)
    }

    fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        (**self).delete(id)
    }
}
