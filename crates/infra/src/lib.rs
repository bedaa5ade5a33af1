//! Infrastructure layer: order storage, supplier notifications, and the
//! orchestration service that ties them to the ordering domain.

pub mod notification;
pub mod order_locks;
pub mod order_service;
pub mod repository;

pub use notification::{LogNotifier, NotificationFailed, NotificationKind, Notifier};
pub use order_locks::OrderLocks;
pub use order_service::{OrderService, ServiceError, ServiceResult};
pub use repository::{InMemoryOrderRepository, OrderRepository, RepositoryError};

mod integration_tests;
