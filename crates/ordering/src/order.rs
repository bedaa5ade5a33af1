use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use supplyflow_catalog::Product;
use supplyflow_core::{AggregateRoot, OrderId, ProductId, SupplierId, ValueObject};

use crate::error::OrderError;
use crate::status::OrderStatus;
use crate::transition::{Operation, allowed_operations, next_status};

/// Comment prefix written when an order goes back to the supplier.
pub const RETURN_NOTE_PREFIX: &str = "Возврат";

/// Comment prefix written when an order is cancelled.
pub const CANCEL_NOTE_PREFIX: &str = "Отмена";

/// One product on an order and how many units of it were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    product: Arc<Product>,
    quantity: u32,
}

impl OrderLine {
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id_typed()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl ValueObject for OrderLine {}

/// Aggregate root: a supply order placed against one supplier.
///
/// All mutations go through the lifecycle methods below. Each one checks the
/// transition table first and only then touches state, so a failed call
/// leaves the aggregate exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    supplier_id: SupplierId,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    items: HashMap<ProductId, OrderLine>,
    comments: String,
    quality_control_result: Option<String>,
    version: u64,
}

impl Order {
    /// Place a new order in `CREATED`.
    ///
    /// Repeated products are merged by adding their quantities.
    pub fn new(
        id: OrderId,
        supplier_id: SupplierId,
        items: impl IntoIterator<Item = (Arc<Product>, u32)>,
        at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let mut lines: HashMap<ProductId, OrderLine> = HashMap::new();
        for (product, quantity) in items {
            let product_id = product.id_typed();
            if quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id,
                    quantity,
                });
            }
            match lines.get_mut(&product_id) {
                Some(line) => line.quantity = merge_quantity(product_id, line.quantity, quantity)?,
                None => {
                    lines.insert(product_id, OrderLine { product, quantity });
                }
            }
        }

        if lines.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        Ok(Self {
            id,
            supplier_id,
            status: OrderStatus::Created,
            created_at: at,
            updated_at: at,
            items: lines,
            comments: String::new(),
            quality_control_result: None,
            version: 1,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Order lines, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &OrderLine> {
        self.items.values()
    }

    /// Number of distinct products on the order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.items.get(product_id).map(|l| l.quantity)
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn quality_control_result(&self) -> Option<&str> {
        self.quality_control_result.as_deref()
    }

    /// Operations the order accepts right now.
    pub fn available_operations(&self) -> Vec<Operation> {
        allowed_operations(self.status)
    }

    pub fn confirm(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        let next = next_status(Operation::Confirm, self.status)?;
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        self.enter(next, at);
        Ok(())
    }

    pub fn send(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.advance(Operation::Send, at)
    }

    pub fn mark_in_transit(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.advance(Operation::MarkInTransit, at)
    }

    pub fn mark_delivered(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.advance(Operation::MarkDelivered, at)
    }

    pub fn start_quality_check(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.advance(Operation::StartQualityCheck, at)
    }

    pub fn accept_delivery(
        &mut self,
        result: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        let next = next_status(Operation::AcceptDelivery, self.status)?;
        self.quality_control_result = Some(result.into());
        self.enter(next, at);
        Ok(())
    }

    pub fn reject_delivery(
        &mut self,
        reason: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        let next = next_status(Operation::RejectDelivery, self.status)?;
        self.quality_control_result = Some(reason.into());
        self.enter(next, at);
        Ok(())
    }

    pub fn return_to_supplier(&mut self, reason: &str, at: DateTime<Utc>) -> Result<(), OrderError> {
        let next = next_status(Operation::ReturnToSupplier, self.status)?;
        self.append_note(RETURN_NOTE_PREFIX, reason);
        self.enter(next, at);
        Ok(())
    }

    pub fn complete(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.advance(Operation::Complete, at)
    }

    pub fn cancel(&mut self, reason: &str, at: DateTime<Utc>) -> Result<(), OrderError> {
        let next = next_status(Operation::Cancel, self.status)?;
        self.append_note(CANCEL_NOTE_PREFIX, reason);
        self.enter(next, at);
        Ok(())
    }

    /// Add units of a product, merging with an existing line.
    pub fn add_item(
        &mut self,
        product: Arc<Product>,
        quantity: u32,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        self.ensure_unlocked()?;
        let product_id = product.id_typed();
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                product_id,
                quantity,
            });
        }

        match self.items.get_mut(&product_id) {
            Some(line) => line.quantity = merge_quantity(product_id, line.quantity, quantity)?,
            None => {
                self.items.insert(product_id, OrderLine { product, quantity });
            }
        }
        self.touch(at);
        Ok(())
    }

    /// Drop a product line. Returns the removed quantity, `None` if the product
    /// was not on the order (state is left untouched in that case).
    pub fn remove_item(
        &mut self,
        product_id: &ProductId,
        at: DateTime<Utc>,
    ) -> Result<Option<u32>, OrderError> {
        self.ensure_unlocked()?;
        let removed = self.items.remove(product_id).map(|l| l.quantity);
        if removed.is_some() {
            self.touch(at);
        }
        Ok(removed)
    }

    fn ensure_unlocked(&self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Created {
            return Err(OrderError::OrderLocked {
                status: self.status,
            });
        }
        Ok(())
    }

    fn advance(&mut self, operation: Operation, at: DateTime<Utc>) -> Result<(), OrderError> {
        let next = next_status(operation, self.status)?;
        self.enter(next, at);
        Ok(())
    }

    fn enter(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        self.status = status;
        self.touch(at);
    }

    fn append_note(&mut self, prefix: &str, text: &str) {
        self.comments.push('\n');
        self.comments.push_str(prefix);
        self.comments.push_str(": ");
        self.comments.push_str(text);
    }

    // updated_at never goes backwards, even if the caller's clock does.
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(at);
        self.version += 1;
    }
}

fn merge_quantity(product_id: ProductId, current: u32, added: u32) -> Result<u32, OrderError> {
    current
        .checked_add(added)
        .ok_or(OrderError::QuantityOverflow {
            product_id,
            current,
            added,
        })
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
