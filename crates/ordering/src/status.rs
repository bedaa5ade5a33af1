use serde::{Deserialize, Serialize};

/// Supply order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Confirmed,
    Sent,
    InTransit,
    Delivered,
    QualityCheck,
    Accepted,
    Rejected,
    Returned,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 11] = [
        OrderStatus::Created,
        OrderStatus::Confirmed,
        OrderStatus::Sent,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::QualityCheck,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Returned,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Stable machine name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Sent => "SENT",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::QualityCheck => "QUALITY_CHECK",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label used in supplier messages.
    pub fn description(self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Sent => "Sent to supplier",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::QualityCheck => "Quality check",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Returned => "Returned",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// End of the regular lifecycle.
    ///
    /// `Returned` is terminal for the delivery flow but may still be cancelled.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
