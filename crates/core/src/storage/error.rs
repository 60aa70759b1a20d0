use thiserror::Error;

/// Errors that can occur when constructing a query window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeWindowError {
    #[error("Invalid time window: start must be before end")]
    InvalidWindow,
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Convenience constructor for an event that failed to resolve.
    pub fn event_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Event",
            id: id.to_string(),
        }
    }

    /// Convenience constructor for a series that failed to resolve.
    pub fn series_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "EventSeries",
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
