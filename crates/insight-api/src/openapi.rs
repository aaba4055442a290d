// OpenAPI specification generation
//
// Shared by the API server (Swagger UI) and the export-openapi binary.

use crate::api;
use crate::api::{HealthResponse, StatusResponse};
use insight_core::{Dot, Event, EventPayload};
use utoipa::OpenApi;

/// OpenAPI documentation for the Insight Garden API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::create_event,
        api::events::get_session_events,
        api::heatmap::get_heatmap,
        api::health::liveness,
        api::health::health,
    ),
    components(
        schemas(
            Event, EventPayload, Dot,
            StatusResponse, HealthResponse,
        )
    ),
    tags(
        (name = "events", description = "Interaction event ingestion"),
        (name = "sessions", description = "Chronological session replay"),
        (name = "heatmap", description = "Per-page coordinate aggregation"),
        (name = "health", description = "Liveness and readiness")
    ),
    info(
        title = "Insight Garden API",
        version = "0.1.0",
        description = "Records click/move events and serves session replays and heatmaps",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
