// Event payload validation
//
// Incoming events are decoded into EventPayload first (every field optional,
// so serde only rejects structurally broken JSON), then validated into a
// NewEvent. Keeping the two steps apart lets the rules below be tested
// without going through HTTP.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Deserialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::event::NewEvent;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for the session identifier.
pub const MAX_SESSION_ID_BYTES: usize = 256;

/// Maximum size for the interaction type tag.
pub const MAX_TYPE_BYTES: usize = 64;

/// Maximum size for the page identifier.
/// 2 KB fits any realistic URL path.
pub const MAX_PAGE_BYTES: usize = 2 * 1024;

// =============================================================================
// Payload
// =============================================================================

/// Event as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventPayload {
    /// Session the event belongs to. Must be non-empty.
    #[cfg_attr(feature = "openapi", schema(example = "s1"))]
    pub session_id: Option<String>,
    /// Interaction kind.
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(example = "click"))]
    pub event_type: Option<String>,
    /// Page where the interaction happened.
    #[cfg_attr(feature = "openapi", schema(example = "/home"))]
    pub page: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = 10))]
    pub x: Option<f64>,
    #[cfg_attr(feature = "openapi", schema(example = 20))]
    pub y: Option<f64>,
    /// RFC 3339 timestamp.
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-01T00:00:00Z"))]
    pub timestamp: Option<String>,
}

impl EventPayload {
    /// Decode a raw JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(body).map_err(|e| ValidationError::malformed(e.to_string()))
    }

    /// Check every rule and produce a storable event.
    pub fn validate(self) -> Result<NewEvent, ValidationError> {
        let session_id = required("session_id", self.session_id)?;
        if session_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("session_id"));
        }
        check_len("session_id", &session_id, MAX_SESSION_ID_BYTES)?;

        let event_type = required("type", self.event_type)?;
        check_len("type", &event_type, MAX_TYPE_BYTES)?;

        let page = required("page", self.page)?;
        check_len("page", &page, MAX_PAGE_BYTES)?;

        let x = finite("x", required("x", self.x)?)?;
        let y = finite("y", required("y", self.y)?)?;

        let raw_ts = required("timestamp", self.timestamp)?;
        let timestamp = parse_timestamp(&raw_ts)?;

        Ok(NewEvent {
            session_id,
            event_type,
            page,
            x,
            y,
            timestamp,
        })
    }
}

// =============================================================================
// Validation Functions
// =============================================================================

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        tracing::warn!(
            "Event {} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            max
        );
        return Err(ValidationError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteCoordinate(field));
    }
    Ok(value)
}

/// Parse an RFC 3339 timestamp into UTC, truncated to microseconds
/// (the resolution of a Postgres `TIMESTAMPTZ`).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(6))
        .map_err(|e| ValidationError::InvalidTimestamp(format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_payload() -> EventPayload {
        EventPayload {
            session_id: Some("s1".to_string()),
            event_type: Some("click".to_string()),
            page: Some("/home".to_string()),
            x: Some(10.0),
            y: Some(20.0),
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_valid_payload() {
        let event = valid_payload().validate().unwrap();
        assert_eq!(event.session_id, "s1");
        assert_eq!(event.event_type, "click");
        assert_eq!(event.page, "/home");
        assert_eq!(event.x, 10.0);
        assert_eq!(event.y, 20.0);
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_fields() {
        for (field, payload) in [
            ("session_id", EventPayload { session_id: None, ..valid_payload() }),
            ("type", EventPayload { event_type: None, ..valid_payload() }),
            ("page", EventPayload { page: None, ..valid_payload() }),
            ("x", EventPayload { x: None, ..valid_payload() }),
            ("y", EventPayload { y: None, ..valid_payload() }),
            ("timestamp", EventPayload { timestamp: None, ..valid_payload() }),
        ] {
            assert_eq!(
                payload.validate().unwrap_err(),
                ValidationError::MissingField(field)
            );
        }
    }

    #[test]
    fn test_empty_session_id() {
        let payload = EventPayload {
            session_id: Some("   ".to_string()),
            ..valid_payload()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::EmptyField("session_id")
        );
    }

    #[test]
    fn test_free_form_type_is_accepted() {
        let payload = EventPayload {
            event_type: Some("scroll-ish".to_string()),
            ..valid_payload()
        };
        assert_eq!(payload.validate().unwrap().event_type, "scroll-ish");
    }

    #[test]
    fn test_non_finite_coordinates() {
        let payload = EventPayload {
            x: Some(f64::NAN),
            ..valid_payload()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::NonFiniteCoordinate("x")
        );

        let payload = EventPayload {
            y: Some(f64::INFINITY),
            ..valid_payload()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::NonFiniteCoordinate("y")
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        let payload = EventPayload {
            timestamp: Some("yesterday".to_string()),
            ..valid_payload()
        };
        assert!(matches!(
            payload.validate().unwrap_err(),
            ValidationError::InvalidTimestamp(_)
        ));
    }

    #[test]
    fn test_timestamp_offset_normalized_to_utc() {
        let ts = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_timestamp_truncated_to_micros() {
        let ts = parse_timestamp("2024-01-01T00:00:00.123456789Z").unwrap();
        assert_eq!(ts.timestamp_subsec_nanos(), 123_456_000);

        let ts = parse_timestamp("2024-01-01T00:00:00.5Z").unwrap();
        assert_eq!(ts.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn test_field_limits() {
        let payload = EventPayload {
            session_id: Some("x".repeat(MAX_SESSION_ID_BYTES)),
            event_type: Some("x".repeat(MAX_TYPE_BYTES)),
            page: Some("x".repeat(MAX_PAGE_BYTES)),
            ..valid_payload()
        };
        assert!(payload.validate().is_ok());

        let payload = EventPayload {
            page: Some("x".repeat(MAX_PAGE_BYTES + 1)),
            ..valid_payload()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::FieldTooLong {
                field: "page",
                len: MAX_PAGE_BYTES + 1,
                max: MAX_PAGE_BYTES,
            }
        );
    }

    #[test]
    fn test_from_json_accepts_integer_coordinates() {
        let body = br#"{"session_id":"s1","type":"click","page":"/home","x":10,"y":20,"timestamp":"2024-01-01T00:00:00Z"}"#;
        let event = EventPayload::from_json(body).unwrap().validate().unwrap();
        assert_eq!((event.x, event.y), (10.0, 20.0));
    }

    #[test]
    fn test_from_json_rejects_mistyped_coordinate() {
        let body = br#"{"session_id":"s1","type":"click","page":"/home","x":"ten","y":20,"timestamp":"2024-01-01T00:00:00Z"}"#;
        assert!(matches!(
            EventPayload::from_json(body).unwrap_err(),
            ValidationError::Malformed(_)
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            EventPayload::from_json(b"not json").unwrap_err(),
            ValidationError::Malformed(_)
        ));
    }
}
