//! Order business rule errors.

use thiserror::Error;

use supplyflow_core::ProductId;

use crate::status::OrderStatus;
use crate::transition::Operation;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The operation is not legal from the order's current status.
    #[error(
        "cannot {operation} order in status {current} (requires {})",
        list_statuses(.required)
    )]
    InvalidStateTransition {
        operation: Operation,
        current: OrderStatus,
        required: &'static [OrderStatus],
    },

    /// Item composition can only change while the order is `CREATED`.
    #[error("order items are locked in status {status}")]
    OrderLocked { status: OrderStatus },

    #[error("order must contain at least one item")]
    EmptyItems,

    #[error("invalid quantity {quantity} for product {product_id}: must be positive")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// Merging into an existing line would exceed the representable quantity.
    #[error("adding {added} units of product {product_id} to {current} overflows the line quantity")]
    QuantityOverflow {
        product_id: ProductId,
        current: u32,
        added: u32,
    },
}

fn list_statuses(statuses: &[OrderStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_both_states() {
        let err = OrderError::InvalidStateTransition {
            operation: Operation::MarkDelivered,
            current: OrderStatus::Sent,
            required: &[OrderStatus::InTransit],
        };
        assert_eq!(
            err.to_string(),
            "cannot mark_delivered order in status SENT (requires IN_TRANSIT)"
        );
    }
}
