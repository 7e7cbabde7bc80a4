//! Why an inventory or tree operation was refused.
//!
//! The boolean inventory calls (`add_item`, `remove_item`) fold these into
//! `false`; the `try_*` variants and report parsing hand them back as is.

use thiserror::Error;

/// Result of a fallible inventory, report or tree operation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Refusal reasons shared by every lootbag crate.
///
/// Every variant is deterministic: repeating the same call on the same
/// inventory fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An item cannot enter or stay in an inventory (blank name, empty or
    /// overflowing consumable stack).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The tree lost its name ordering or its node count drifted.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A sort attribute or item type name outside the closed set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No item holds the requested name.
    #[error("not found")]
    NotFound,

    /// The name is already held and the candidate cannot merge into it.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
