//! Outbound supplier communication boundary.

pub mod log;
pub mod r#trait;

pub use log::LogNotifier;
pub use r#trait::{NotificationFailed, NotificationKind, Notifier};
