// HTTP API routes
//
// Thin transport over the services: each submodule decodes its request,
// calls one service method and maps the result to a status + body.
// Each submodule has its own AppState.

pub mod common;
pub mod events;
pub mod health;
pub mod heatmap;

pub use common::{HealthResponse, StatusResponse};
