// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
//
// Mirrors the Postgres repository closely enough that the API can run (and be
// tested) without a database. Locks are never held across an await point.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use insight_core::NewEvent;
use parking_lot::RwLock;

use crate::error::{Result, StorageError};
use crate::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    events: RwLock<Vec<EventRow>>,
    // When set, every operation fails with this reason
    failure: RwLock<Option<String>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write() = Some(reason.into());
    }

    /// Undo `fail_with`.
    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    fn check_available(&self) -> Result<()> {
        match self.failure.read().as_ref() {
            Some(reason) => Err(StorageError::unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    pub async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    // ============================================
    // Events
    // ============================================

    pub async fn insert_event(&self, input: &NewEvent) -> Result<u64> {
        self.check_available()?;

        let row = EventRow {
            session_id: input.session_id.clone(),
            event_type: input.event_type.clone(),
            page: input.page.clone(),
            x: input.x,
            y: input.y,
            timestamp: input.timestamp,
        };
        self.events.write().push(row);
        Ok(1)
    }

    pub async fn list_session_events(&self, session_id: &str) -> Result<Vec<EventRow>> {
        self.check_available()?;

        let mut rows: Vec<EventRow> = self
            .events
            .read()
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect();
        // Stable: equal timestamps keep insertion order
        rows.sort_by_key(|e| e.timestamp);
        Ok(rows)
    }

    // ============================================
    // Heatmap
    // ============================================

    pub async fn heatmap(&self, page: &str) -> Result<Vec<DotRow>> {
        self.check_available()?;

        let events = self.events.read();
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut dots: Vec<DotRow> = Vec::new();

        for event in events.iter().filter(|e| e.page == page) {
            let key = (coordinate_key(event.x), coordinate_key(event.y));
            match index.entry(key) {
                Entry::Occupied(slot) => dots[*slot.get()].count += 1,
                Entry::Vacant(slot) => {
                    slot.insert(dots.len());
                    dots.push(DotRow {
                        x: event.x,
                        y: event.y,
                        count: 1,
                    });
                }
            }
        }

        Ok(dots)
    }
}

/// Grouping key for a coordinate. SQL equality treats -0.0 and 0.0 as the
/// same value, so fold them together before taking the bit pattern.
fn coordinate_key(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event(session_id: &str, page: &str, x: f64, y: f64, offset_secs: i64) -> NewEvent {
        NewEvent {
            session_id: session_id.to_string(),
            event_type: "click".to_string(),
            page: page.to_string(),
            x,
            y,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_timestamp() {
        let db = InMemoryDatabase::new();
        for offset in [3, 1, 2] {
            assert_eq!(
                db.insert_event(&event("s1", "/home", 0.0, 0.0, offset))
                    .await
                    .unwrap(),
                1
            );
        }
        db.insert_event(&event("other", "/home", 0.0, 0.0, 0))
            .await
            .unwrap();

        let rows = db.list_session_events("s1").await.unwrap();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let offsets: Vec<i64> = rows
            .iter()
            .map(|r| (r.timestamp - base).num_seconds())
            .collect();
        assert_eq!(offsets, vec![1, 2, 3]);
        assert_eq!(db.len(), 4);
    }

    #[tokio::test]
    async fn test_duplicates_are_stored_independently() {
        let db = InMemoryDatabase::new();
        let e = event("s1", "/home", 1.0, 1.0, 0);
        db.insert_event(&e).await.unwrap();
        db.insert_event(&e).await.unwrap();

        assert_eq!(db.list_session_events("s1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_session_and_page_are_empty() {
        let db = InMemoryDatabase::new();
        db.insert_event(&event("s1", "/home", 1.0, 1.0, 0))
            .await
            .unwrap();

        assert!(db.list_session_events("").await.unwrap().is_empty());
        assert!(db.list_session_events("nope").await.unwrap().is_empty());
        assert!(db.heatmap("/nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_heatmap_counts_per_coordinate() {
        let db = InMemoryDatabase::new();
        db.insert_event(&event("a", "/home", 10.0, 20.0, 0)).await.unwrap();
        db.insert_event(&event("b", "/home", 10.0, 20.0, 1)).await.unwrap();
        db.insert_event(&event("c", "/home", 10.0, 20.0, 2)).await.unwrap();
        db.insert_event(&event("a", "/home", 10.0, 21.0, 3)).await.unwrap();
        db.insert_event(&event("a", "/about", 10.0, 20.0, 4)).await.unwrap();

        let dots = db.heatmap("/home").await.unwrap();
        assert_eq!(
            dots,
            vec![
                DotRow { x: 10.0, y: 20.0, count: 3 },
                DotRow { x: 10.0, y: 21.0, count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_heatmap_folds_signed_zero() {
        let db = InMemoryDatabase::new();
        db.insert_event(&event("a", "/home", 0.0, 5.0, 0)).await.unwrap();
        db.insert_event(&event("a", "/home", -0.0, 5.0, 1)).await.unwrap();

        let dots = db.heatmap("/home").await.unwrap();
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0].count, 2);
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let db = InMemoryDatabase::new();
        db.fail_with("connection reset");

        let err = db
            .insert_event(&event("s1", "/home", 1.0, 1.0, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Storage unavailable: connection reset");
        assert!(db.list_session_events("s1").await.is_err());
        assert!(db.heatmap("/home").await.is_err());
        assert!(db.ping().await.is_err());
        assert!(db.is_empty());

        db.recover();
        assert!(db.ping().await.is_ok());
    }
}
