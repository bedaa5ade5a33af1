//! Static transition table for the order lifecycle.
//!
//! Every lifecycle operation is described by exactly one row: the statuses it
//! may start from and the status it leads to. The aggregate consults this
//! table before mutating anything.

use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::status::OrderStatus;

/// Lifecycle operation on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Confirm,
    Send,
    MarkInTransit,
    MarkDelivered,
    StartQualityCheck,
    AcceptDelivery,
    RejectDelivery,
    ReturnToSupplier,
    Complete,
    Cancel,
}

impl Operation {
    /// Every operation, in table order.
    pub const ALL: [Operation; 10] = [
        Operation::Confirm,
        Operation::Send,
        Operation::MarkInTransit,
        Operation::MarkDelivered,
        Operation::StartQualityCheck,
        Operation::AcceptDelivery,
        Operation::RejectDelivery,
        Operation::ReturnToSupplier,
        Operation::Complete,
        Operation::Cancel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Confirm => "confirm",
            Operation::Send => "send",
            Operation::MarkInTransit => "mark_in_transit",
            Operation::MarkDelivered => "mark_delivered",
            Operation::StartQualityCheck => "start_quality_check",
            Operation::AcceptDelivery => "accept_delivery",
            Operation::RejectDelivery => "reject_delivery",
            Operation::ReturnToSupplier => "return_to_supplier",
            Operation::Complete => "complete",
            Operation::Cancel => "cancel",
        }
    }

    /// The table row for this operation.
    pub fn transition(self) -> &'static Transition {
        let idx = match self {
            Operation::Confirm => 0,
            Operation::Send => 1,
            Operation::MarkInTransit => 2,
            Operation::MarkDelivered => 3,
            Operation::StartQualityCheck => 4,
            Operation::AcceptDelivery => 5,
            Operation::RejectDelivery => 6,
            Operation::ReturnToSupplier => 7,
            Operation::Complete => 8,
            Operation::Cancel => 9,
        };
        &TRANSITIONS[idx]
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub operation: Operation,
    pub from: &'static [OrderStatus],
    pub to: OrderStatus,
}

impl Transition {
    pub fn allows(&self, current: OrderStatus) -> bool {
        self.from.contains(&current)
    }
}

const CANCELLABLE: &[OrderStatus] = &[
    OrderStatus::Created,
    OrderStatus::Confirmed,
    OrderStatus::Sent,
    OrderStatus::InTransit,
    OrderStatus::Delivered,
    OrderStatus::QualityCheck,
    OrderStatus::Accepted,
    OrderStatus::Rejected,
    OrderStatus::Returned,
];

/// The lifecycle graph. Row `i` belongs to `Operation::ALL[i]`.
pub const TRANSITIONS: [Transition; 10] = [
    Transition {
        operation: Operation::Confirm,
        from: &[OrderStatus::Created],
        to: OrderStatus::Confirmed,
    },
    Transition {
        operation: Operation::Send,
        from: &[OrderStatus::Confirmed],
        to: OrderStatus::Sent,
    },
    Transition {
        operation: Operation::MarkInTransit,
        from: &[OrderStatus::Sent],
        to: OrderStatus::InTransit,
    },
    Transition {
        operation: Operation::MarkDelivered,
        from: &[OrderStatus::InTransit],
        to: OrderStatus::Delivered,
    },
    Transition {
        operation: Operation::StartQualityCheck,
        from: &[OrderStatus::Delivered],
        to: OrderStatus::QualityCheck,
    },
    Transition {
        operation: Operation::AcceptDelivery,
        from: &[OrderStatus::QualityCheck],
        to: OrderStatus::Accepted,
    },
    Transition {
        operation: Operation::RejectDelivery,
        from: &[OrderStatus::QualityCheck],
        to: OrderStatus::Rejected,
    },
    Transition {
        operation: Operation::ReturnToSupplier,
        from: &[OrderStatus::Rejected],
        to: OrderStatus::Returned,
    },
    Transition {
        operation: Operation::Complete,
        from: &[OrderStatus::Accepted],
        to: OrderStatus::Completed,
    },
    Transition {
        operation: Operation::Cancel,
        from: CANCELLABLE,
        to: OrderStatus::Cancelled,
    },
];

/// Resolve the status `operation` leads to from `current`.
pub fn next_status(operation: Operation, current: OrderStatus) -> Result<OrderStatus, OrderError> {
    let row = operation.transition();
    if row.allows(current) {
        Ok(row.to)
    } else {
        Err(OrderError::InvalidStateTransition {
            operation,
            current,
            required: row.from,
        })
    }
}

/// Operations that are legal from `current`, in table order.
pub fn allowed_operations(current: OrderStatus) -> Vec<Operation> {
    TRANSITIONS
        .iter()
        .filter(|t| t.allows(current))
        .map(|t| t.operation)
        .collect()
}
