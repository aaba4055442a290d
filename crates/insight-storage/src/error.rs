// Storage error type
//
// Everything the gateway can fail with. Handlers never see sqlx::Error
// directly; they get one of these and pass its text on for diagnostics.

use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Pool could not be established (fatal at startup)
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement failed: connectivity loss, constraint violation, bad query
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),

    /// Backend refused the operation without reaching a database
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StorageError::Unavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_from_sqlx() {
        let err: StorageError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StorageError::Query(_)));
        assert!(err.to_string().starts_with("Database error: "));
    }

    #[test]
    fn test_unavailable_message() {
        let err = StorageError::unavailable("connection reset");
        assert_eq!(err.to_string(), "Storage unavailable: connection reset");
    }
}
