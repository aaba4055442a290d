// Interaction events and heatmap dots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A recorded user interaction.
///
/// Events are immutable once stored. There is no natural key: submitting the
/// same interaction twice stores two rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Opaque identifier grouping the events of one visit.
    #[cfg_attr(feature = "openapi", schema(example = "s1"))]
    pub session_id: String,
    /// Interaction kind (free-form, e.g. "click", "move").
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(example = "click"))]
    pub event_type: String,
    /// Page or view where the interaction happened.
    #[cfg_attr(feature = "openapi", schema(example = "/home"))]
    pub page: String,
    /// Page-relative horizontal coordinate.
    pub x: f64,
    /// Page-relative vertical coordinate.
    pub y: f64,
    /// When the interaction happened.
    pub timestamp: DateTime<Utc>,
}

/// A validated event that has not been persisted yet.
///
/// Only `EventPayload::validate` produces one outside of tests, so holding a
/// `NewEvent` means every field already passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub session_id: String,
    pub event_type: String,
    pub page: String,
    pub x: f64,
    pub y: f64,
    pub timestamp: DateTime<Utc>,
}

impl NewEvent {
    pub fn into_event(self) -> Event {
        Event {
            session_id: self.session_id,
            event_type: self.event_type,
            page: self.page,
            x: self.x,
            y: self.y,
            timestamp: self.timestamp,
        }
    }
}

/// A heatmap point: one distinct coordinate on a page and how many events hit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    /// Number of events recorded at exactly (x, y).
    #[cfg_attr(feature = "openapi", schema(example = 2))]
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Event {
        Event {
            session_id: "s1".to_string(),
            event_type: "click".to_string(),
            page: "/home".to_string(),
            x: 10.0,
            y: 20.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_event_serializes_type_field() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["type"], "click");
        assert!(json.get("event_type").is_none());
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_event_deserializes_from_wire_shape() {
        let json = r#"{
            "session_id": "s1",
            "type": "click",
            "page": "/home",
            "x": 10,
            "y": 20,
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event, sample());
    }

    #[test]
    fn test_new_event_into_event_keeps_fields() {
        let event = sample();
        let new_event = NewEvent {
            session_id: event.session_id.clone(),
            event_type: event.event_type.clone(),
            page: event.page.clone(),
            x: event.x,
            y: event.y,
            timestamp: event.timestamp,
        };
        assert_eq!(new_event.into_event(), event);
    }

    #[test]
    fn test_dot_serialization() {
        let dot = Dot {
            x: 10.0,
            y: 20.0,
            count: 2,
        };
        let json = serde_json::to_value(&dot).unwrap();
        assert_eq!(json["x"], 10.0);
        assert_eq!(json["y"], 20.0);
        assert_eq!(json["count"], 2);
    }
}
