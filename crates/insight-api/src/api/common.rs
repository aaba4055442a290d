// Common DTOs for public API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimal acknowledgment body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "created")]
    pub status: String,
}

impl StatusResponse {
    pub fn created() -> Self {
        Self {
            status: "created".to_string(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    #[schema(example = "ok")]
    pub status: String,
    pub version: String,
    /// Backend kind: "postgres" or "memory"
    #[schema(example = "postgres")]
    pub storage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_body() {
        let json = serde_json::to_string(&StatusResponse::created()).unwrap();
        assert_eq!(json, r#"{"status":"created"}"#);
    }
}
