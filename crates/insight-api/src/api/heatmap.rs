// Heatmap HTTP routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use insight_core::Dot;
use insight_storage::StorageBackend;

use crate::error::ApiError;
use crate::services::HeatmapService;

/// App state for heatmap routes
#[derive(Clone)]
pub struct AppState {
    pub heatmap_service: Arc<HeatmapService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            heatmap_service: Arc::new(HeatmapService::new(db)),
        }
    }
}

/// Create heatmap routes
///
/// Pages usually contain slashes, so clients percent-encode them
/// (`/heatmap/%2Fhome`); the path extractor decodes back to `/home`.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/heatmap/:page", get(get_heatmap))
        .route("/heatmap/", get(get_empty_heatmap))
        .with_state(state)
}

/// GET /heatmap/{page} - Aggregated dots for a page
#[utoipa::path(
    get,
    path = "/heatmap/{page}",
    params(
        ("page" = String, Path, description = "Page identifier, percent-encoded")
    ),
    responses(
        (status = 200, description = "One dot per distinct coordinate, unordered", body = Vec<Dot>),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tag = "heatmap"
)]
pub async fn get_heatmap(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<Vec<Dot>>, ApiError> {
    let dots = state.heatmap_service.dots(&page).await?;
    Ok(Json(dots))
}

/// GET /heatmap/ - The empty page name
pub async fn get_empty_heatmap(
    State(state): State<AppState>,
) -> Result<Json<Vec<Dot>>, ApiError> {
    let dots = state.heatmap_service.dots("").await?;
    Ok(Json(dots))
}
