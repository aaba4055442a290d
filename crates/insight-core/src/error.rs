// Error types for event validation

use thiserror::Error;

/// Why an incoming event payload was rejected.
///
/// Every variant is a client fault; none of them is ever produced after a
/// storage call has been made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Body is not valid JSON or a field has the wrong JSON type
    #[error("Invalid JSON: {0}")]
    Malformed(String),

    /// Required field absent (or null)
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Required string field present but empty
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    /// Coordinate is NaN or infinite
    #[error("Field must be a finite number: {0}")]
    NonFiniteCoordinate(&'static str),

    /// Timestamp is not RFC 3339
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// String field over its byte limit
    #[error("Field {field} exceeds allowed length: {len} bytes (max: {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl ValidationError {
    /// Create a malformed-payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        ValidationError::Malformed(msg.into())
    }

    /// Name of the offending field, when the error is about a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(f)
            | ValidationError::EmptyField(f)
            | ValidationError::NonFiniteCoordinate(f) => Some(f),
            ValidationError::FieldTooLong { field, .. } => Some(field),
            ValidationError::InvalidTimestamp(_) => Some("timestamp"),
            ValidationError::Malformed(_) => None,
        }
    }
}
