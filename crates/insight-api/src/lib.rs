// Insight Garden API library
// Decision: Router assembly lives here so tests drive the same app the binary serves

pub mod api;
pub mod config;
pub mod error;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use insight_storage::StorageBackend;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ApiConfig;
pub use error::ApiError;
use openapi::ApiDoc;

/// Assemble the full application router over an already-connected backend.
pub fn build_app(db: Arc<StorageBackend>, config: &ApiConfig) -> Router {
    let events_state = api::events::AppState::new(db.clone());
    let heatmap_state = api::heatmap::AppState::new(db.clone());
    let health_state = api::health::HealthState { db };

    let api_routes = Router::new()
        .merge(api::events::routes(events_state))
        .merge(api::heatmap::routes(heatmap_state));

    // Liveness/health are never prefixed
    let app = Router::new()
        .merge(api::health::routes(health_state))
        .merge(build_router_with_prefix(api_routes, &config.api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if !config.cors_origins.is_empty() {
        app.layer(cors_layer(config.cors_origins.clone()))
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
