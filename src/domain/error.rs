//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::id::ItemId;

/// Domain errors represent rejected mutations.
///
/// Every variant is detected before the store is touched, so a failed call
/// leaves registry, index and cache exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("item with id {0} already exists")]
    DuplicateIdentifier(ItemId),

    #[error("item {0} cannot be parent of itself")]
    SelfParent(ItemId),

    #[error("circular dependency detected for id {id}: {parent} is one of its descendants")]
    CircularDependency { id: ItemId, parent: ItemId },
}

/// Result type for store mutations.
pub type DomainResult<T> = Result<T, DomainError>;
