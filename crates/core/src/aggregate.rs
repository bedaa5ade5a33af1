//! Aggregate root trait for state-based domain models.

/// Aggregate root marker + minimal interface.
///
/// Intentionally small: each domain module decides how it models state
/// transitions. Aggregates never perform IO.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented by one for every successful mutation.
    fn version(&self) -> u64;
}
