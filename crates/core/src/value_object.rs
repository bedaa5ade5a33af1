//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ShelfLife { days: u32 }
///
/// impl ValueObject for ShelfLife {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
