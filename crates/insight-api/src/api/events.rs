// Event ingestion and session replay HTTP routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use insight_core::{Event, EventPayload, ValidationError};
use insight_storage::StorageBackend;

use super::common::StatusResponse;
use crate::error::ApiError;
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            event_service: Arc::new(EventService::new(db)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/event", post(create_event))
        .route("/session/:id", get(get_session_events))
        // An empty id has no path segment to capture
        .route("/session/", get(get_empty_session))
        .with_state(state)
}

/// POST /event - Record one interaction
#[utoipa::path(
    post,
    path = "/event",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event stored", body = StatusResponse),
        (status = 400, description = "Payload missing fields or mistyped", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(payload) = payload.map_err(|e| ValidationError::malformed(e.body_text()))?;

    state.event_service.ingest(payload).await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::created())))
}

/// GET /session/{id} - Replay a session in time order
#[utoipa::path(
    get,
    path = "/session/{id}",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Events ordered by timestamp, oldest first", body = Vec<Event>),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tag = "sessions"
)]
pub async fn get_session_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.event_service.session_events(&session_id).await?;

    tracing::debug!(session_id = %session_id, count = events.len(), "Session replayed");
    Ok(Json(events))
}

/// GET /session/ - The empty session id; no event can carry it
pub async fn get_empty_session(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.event_service.session_events("").await?;
    Ok(Json(events))
}
