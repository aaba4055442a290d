// Heatmap service
//
// Counting happens in storage (GROUP BY x, y); this layer only maps rows.

use std::sync::Arc;

use insight_core::Dot;
use insight_storage::{DotRow, StorageBackend, StorageError};

pub struct HeatmapService {
    db: Arc<StorageBackend>,
}

impl HeatmapService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// One dot per distinct coordinate on the page. Order is not meaningful.
    pub async fn dots(&self, page: &str) -> Result<Vec<Dot>, StorageError> {
        let rows = self.db.heatmap(page).await?;
        tracing::debug!(page = %page, dots = rows.len(), "Heatmap aggregated");
        Ok(rows.into_iter().map(Self::row_to_dot).collect())
    }

    fn row_to_dot(row: DotRow) -> Dot {
        Dot {
            x: row.x,
            y: row.y,
            count: row.count,
        }
    }
}
