// Services layer for business logic
// Services own validation and row mapping, calling storage directly

pub mod event;
pub mod heatmap;

pub use event::EventService;
pub use heatmap::HeatmapService;
