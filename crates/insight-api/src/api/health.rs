// Liveness and health routes (never prefixed)

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use insight_storage::StorageBackend;

use super::common::HealthResponse;

/// Plain-text body served at `/`
pub const LIVENESS_MESSAGE: &str = "Insight Garden Backend API is alive and listening";

/// State for health endpoint
#[derive(Clone)]
pub struct HealthState {
    pub db: Arc<StorageBackend>,
}

pub fn routes(state: HealthState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .with_state(state)
}

/// GET / - Liveness (no storage access)
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Process is up", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health - Readiness including a storage ping
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code) = match state.db.ping().await {
        Ok(()) => ("ok", StatusCode::OK),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ("degraded", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.db.kind().to_string(),
        }),
    )
}
