//! Errors raised by the shared building blocks.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure to build a domain value from caller input.
///
/// Aggregate-specific failures (illegal transitions, locked items) live next
/// to the aggregate, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input was well-formed but not acceptable, e.g. a blank name.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
