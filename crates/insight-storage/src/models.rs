// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

// ============================================
// Events
// ============================================

/// One row of the events table. Rows have no id column; identity is the
/// physical row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EventRow {
    pub session_id: String,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub page: String,
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
}

// ============================================
// Heatmap
// ============================================

/// One group of the heatmap aggregation query.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DotRow {
    pub x: f64,
    pub y: f64,
    pub count: i64,
}
