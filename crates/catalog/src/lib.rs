//! Product catalog domain module.
//!
//! Products are immutable value records supplied by an external catalog; this
//! crate only describes them and offers a read-only lookup.

pub mod catalog;
pub mod product;

pub use catalog::ProductCatalog;
pub use product::{Product, TemperatureMode};
