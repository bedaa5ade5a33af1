//! Order orchestration (application-level use cases).
//!
//! Every mutating use case follows the same pipeline:
//!
//! ```text
//! use case (order id)
//!   ↓
//! 1. Acquire the per-order slot
//!   ↓
//! 2. Load the order (missing -> OrderNotFound)
//!   ↓
//! 3. Apply the transition on the aggregate (rejected -> error, nothing saved)
//!   ↓
//! 4. Persist (overwrite by id), release the slot
//!   ↓
//! 5. Notify the supplier where the transition calls for it (best effort)
//! ```
//!
//! Notification failures are logged and never reach the caller: the
//! transition has already been committed when the notifier runs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use supplyflow_catalog::Product;
use supplyflow_core::{AggregateRoot, OrderId, ProductId, SupplierId};
use supplyflow_ordering::{Order, OrderError};

use crate::notification::{NotificationFailed, NotificationKind, Notifier};
use crate::order_locks::OrderLocks;
use crate::repository::{OrderRepository, RepositoryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct OrderService<R, N> {
    repository: R,
    notifier: N,
    locks: OrderLocks,
}

impl<R, N> OrderService<R, N>
where
    R: OrderRepository,
    N: Notifier,
{
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            locks: OrderLocks::new(),
        }
    }

    /// Create and persist a new order in `CREATED`. No notification is sent.
    pub fn create_order(
        &self,
        supplier_id: SupplierId,
        items: impl IntoIterator<Item = (Arc<Product>, u32)>,
    ) -> ServiceResult<Order> {
        let order = Order::new(OrderId::new(), supplier_id, items, Utc::now())?;
        let saved = self.repository.save(order)?;
        info!(
            order_id = %saved.id_typed(),
            supplier_id = %saved.supplier_id(),
            items = saved.item_count(),
            "order created"
        );
        Ok(saved)
    }

    pub fn confirm_order(&self, id: OrderId) -> ServiceResult<Order> {
        let order = self.mutate(id, "confirm", |o, at| o.confirm(at))?;
        self.notify(&order, NotificationKind::ConfirmationRequest, |n, o| {
            n.request_order_confirmation(o)
        });
        Ok(order)
    }

    pub fn send_order_to_supplier(&self, id: OrderId) -> ServiceResult<Order> {
        let order = self.mutate(id, "send", |o, at| o.send(at))?;
        self.notify(&order, NotificationKind::OrderSent, |n, o| n.send_order_notification(o));
        Ok(order)
    }

    pub fn mark_order_in_transit(&self, id: OrderId) -> ServiceResult<Order> {
        self.mutate(id, "mark_in_transit", |o, at| o.mark_in_transit(at))
    }

    pub fn mark_order_delivered(&self, id: OrderId) -> ServiceResult<Order> {
        self.mutate(id, "mark_delivered", |o, at| o.mark_delivered(at))
    }

    pub fn start_quality_check(&self, id: OrderId) -> ServiceResult<Order> {
        self.mutate(id, "start_quality_check", |o, at| o.start_quality_check(at))
    }

    pub fn accept_delivery(&self, id: OrderId, result: &str) -> ServiceResult<Order> {
        self.mutate(id, "accept_delivery", |o, at| o.accept_delivery(result, at))
    }

    pub fn reject_delivery(&self, id: OrderId, reason: &str) -> ServiceResult<Order> {
        self.mutate(id, "reject_delivery", |o, at| o.reject_delivery(reason, at))
    }

    pub fn return_to_supplier(&self, id: OrderId, reason: &str) -> ServiceResult<Order> {
        let order = self.mutate(id, "return_to_supplier", |o, at| {
            o.return_to_supplier(reason, at)
        })?;
        self.notify(&order, NotificationKind::Return, |n, o| {
            n.send_return_notification(o, reason)
        });
        Ok(order)
    }

    pub fn cancel_order(&self, id: OrderId, reason: &str) -> ServiceResult<Order> {
        let order = self.mutate(id, "cancel", |o, at| o.cancel(reason, at))?;
        self.notify(&order, NotificationKind::Cancellation, |n, o| {
            n.send_cancellation_notification(o, reason)
        });
        Ok(order)
    }

    pub fn complete_order(&self, id: OrderId) -> ServiceResult<Order> {
        self.mutate(id, "complete", |o, at| o.complete(at))
    }

    pub fn add_item(
        &self,
        id: OrderId,
        product: Arc<Product>,
        quantity: u32,
    ) -> ServiceResult<Order> {
        self.mutate(id, "add_item", |o, at| o.add_item(product, quantity, at))
    }

    /// Removing a product that is not on the order succeeds and changes nothing.
    pub fn remove_item(&self, id: OrderId, product_id: ProductId) -> ServiceResult<Order> {
        self.mutate(id, "remove_item", |o, at| {
            o.remove_item(&product_id, at).map(|_| ())
        })
    }

    pub fn get_order_by_id(&self, id: OrderId) -> ServiceResult<Option<Order>> {
        Ok(self.repository.find_by_id(id)?)
    }

    pub fn get_all_orders(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.repository.find_all()?)
    }

    pub fn get_orders_by_supplier(&self, supplier_id: &SupplierId) -> ServiceResult<Vec<Order>> {
        Ok(self.repository.find_by_supplier(supplier_id)?)
    }

    /// Load, mutate and persist one order under its per-id slot.
    fn mutate<F>(&self, id: OrderId, operation: &'static str, apply: F) -> ServiceResult<Order>
    where
        F: FnOnce(&mut Order, DateTime<Utc>) -> Result<(), OrderError>,
    {
        self.locks.with_lock(id, || {
            let mut order = self
                .repository
                .find_by_id(id)?
                .ok_or(ServiceError::OrderNotFound(id))?;

            if let Err(err) = apply(&mut order, Utc::now()) {
                debug!(order_id = %id, operation, error = %err, "order mutation rejected");
                return Err(err.into());
            }

            let saved = self.repository.save(order)?;
            info!(
                order_id = %id,
                operation,
                status = %saved.status(),
                version = saved.version(),
                "order updated"
            );
            Ok(saved)
        })
    }

    // Runs after the per-order slot is released, so racing calls on one id may
    // deliver their notifications out of commit order. Delivery is best effort.
    fn notify<F>(&self, order: &Order, kind: NotificationKind, send: F)
    where
        F: FnOnce(&N, &Order) -> Result<(), NotificationFailed>,
    {
        if let Err(err) = send(&self.notifier, order) {
            warn!(
                order_id = %order.id_typed(),
                kind = kind.as_str(),
                error = %err,
                "supplier notification failed; transition stays committed"
            );
        }
    }
}
