use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors that can occur when validating or manipulating events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event must end after it starts")]
    InvalidTimeRange,
    #[error("Rate cannot be negative")]
    NegativeRate,
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
    #[error("Recurrence frequency must be at least 1")]
    ZeroFrequency,
    #[error("Event does not belong to a series; a group-scoped change is not allowed")]
    ScopeRequiresSeries,
}

/// Errors produced by the scoped mutation coordinator: either the
/// changeset failed validation or the store rejected the write.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
