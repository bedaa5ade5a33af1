use std::sync::Arc;

use thiserror::Error;

use supplyflow_ordering::Order;

/// A supplier message could not be delivered.
///
/// Advisory only: the transition that triggered the message has already been
/// committed when this is reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} notification failed: {reason}")]
pub struct NotificationFailed {
    pub kind: NotificationKind,
    pub reason: String,
}

impl NotificationFailed {
    pub fn new(kind: NotificationKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Which supplier message a transition triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    ConfirmationRequest,
    OrderSent,
    Cancellation,
    Return,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::ConfirmationRequest => "confirmation_request",
            NotificationKind::OrderSent => "order_sent",
            NotificationKind::Cancellation => "cancellation",
            NotificationKind::Return => "return",
        }
    }
}

impl core::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier notification port.
///
/// Implementations are synchronous and must either return or fail
/// immediately; there is no retry at this layer.
pub trait Notifier: Send + Sync {
    /// The order has been sent to the supplier.
    fn send_order_notification(&self, order: &Order) -> Result<(), NotificationFailed>;

    fn send_cancellation_notification(
        &self,
        order: &Order,
        reason: &str,
    ) -> Result<(), NotificationFailed>;

    fn send_return_notification(&self, order: &Order, reason: &str)
    -> Result<(), NotificationFailed>;

    /// Ask the supplier to confirm a freshly confirmed order.
    fn request_order_confirmation(&self, order: &Order) -> Result<(), NotificationFailed>;
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn send_order_notification(&self, order: &Order) -> Result<(), NotificationFailed> {
        (**self).send_order_notification(order)
    }

    fn send_cancellation_notification(
        &self,
        order: &Order,
        reason: &str,
    ) -> Result<(), NotificationFailed> {
        (**self).send_cancellation_notification(order, reason)
    }

    fn send_return_notification(
        &self,
        order: &Order,
        reason: &str,
    ) -> Result<(), NotificationFailed> {
        (**self).send_return_notification(order, reason)
    }

    fn request_order_confirmation(&self, order: &Order) -> Result<(), NotificationFailed> {
        (**self).request_order_confirmation(order)
    }
}
