// Insight Garden core
//
// Domain types shared by the storage layer and the HTTP API:
// - Event / NewEvent: recorded interactions (persisted / about to be persisted)
// - Dot: heatmap point aggregated from events sharing a coordinate
// - EventPayload: untrusted request body, turned into a NewEvent by validation

pub mod error;
pub mod event;
pub mod validation;

pub use error::ValidationError;
pub use event::{Dot, Event, NewEvent};
pub use validation::EventPayload;
