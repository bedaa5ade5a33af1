//! Supply ordering domain module.
//!
//! This crate contains the business rules for supply orders placed against a
//! supplier: the `Order` aggregate, its status vocabulary, and the static
//! transition table every lifecycle operation is checked against. Pure domain
//! logic (no IO, no HTTP, no storage).

pub mod error;
pub mod order;
pub mod status;
pub mod transition;

pub use error::OrderError;
pub use order::{CANCEL_NOTE_PREFIX, Order, OrderLine, RETURN_NOTE_PREFIX};
pub use status::OrderStatus;
pub use transition::{Operation, TRANSITIONS, Transition, allowed_operations, next_status};
