//! Notification adapter that renders supplier messages and emits them through
//! `tracing` on the `supplier_notifications` target.

use chrono::{DateTime, Utc};
use tracing::info;

use supplyflow_ordering::Order;

use super::r#trait::{NotificationFailed, NotificationKind, Notifier};

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Logs every supplier message; delivery always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, kind: NotificationKind, order: &Order, message: String) {
        info!(
            target: "supplier_notifications",
            kind = kind.as_str(),
            order_id = %order.id_typed(),
            supplier_id = %order.supplier_id(),
            "{message}"
        );
    }
}

/// Render the message for `kind`. `reason` is only used by cancellation and
/// return messages.
pub fn render_message(
    kind: NotificationKind,
    order: &Order,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let ts = now.format(TIMESTAMP_FORMAT);
    let supplier = order.supplier_id();
    let id = order.id_typed();
    let reason = reason.unwrap_or("not specified");

    match kind {
        NotificationKind::OrderSent => format!(
            "[{ts}] Notice for supplier {supplier}: new order #{id} sent. Status: {}. Line items: {}",
            order.status().description(),
            order.item_count()
        ),
        NotificationKind::Cancellation => format!(
            "[{ts}] Notice for supplier {supplier}: order #{id} cancelled. Reason: {reason}"
        ),
        NotificationKind::Return => format!(
            "[{ts}] Notice for supplier {supplier}: order #{id} returned. Reason: {reason}"
        ),
        NotificationKind::ConfirmationRequest => format!(
            "[{ts}] Confirmation request for supplier {supplier}: order #{id} awaits confirmation. Line items: {}",
            order.item_count()
        ),
    }
}

impl Notifier for LogNotifier {
    fn send_order_notification(&self, order: &Order) -> Result<(), NotificationFailed> {
        let kind = NotificationKind::OrderSent;
        self.emit(kind, order, render_message(kind, order, None, Utc::now()));
        Ok(())
    }

    fn send_cancellation_notification(
        &self,
        order: &Order,
        reason: &str,
    ) -> Result<(), NotificationFailed> {
        let kind = NotificationKind::Cancellation;
        self.emit(kind, order, render_message(kind, order, Some(reason), Utc::now()));
        Ok(())
    }

    fn send_return_notification(
        &self,
        order: &Order,
        reason: &str,
    ) -> Result<(), NotificationFailed> {
        let kind = NotificationKind::Return;
        self.emit(kind, order, render_message(kind, order, Some(reason), Utc::now()));
        Ok(())
    }

    fn request_order_confirmation(&self, order: &Order) -> Result<(), NotificationFailed> {
        let kind = NotificationKind::ConfirmationRequest;
        self.emit(kind, order, render_message(kind, order, None, Utc::now()));
        Ok(())
    }
}
