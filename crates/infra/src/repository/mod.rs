//! Order storage boundary.
//!
//! The orchestration layer only depends on the `OrderRepository` trait; the
//! in-memory adapter is the reference implementation for tests and dev.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryOrderRepository;
pub use r#trait::{OrderRepository, RepositoryError};
