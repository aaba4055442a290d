// Repository layer for database operations
//
// Every statement is parameterized and single: no transaction ever spans
// more than one of them.

use std::time::Duration;

use futures::TryStreamExt;
use insight_core::NewEvent;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::*;

/// Default pool size when DATABASE_MAX_CONNECTIONS is not set
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the Postgres pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the connection pool. Called once at startup; a failure here is fatal.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(StorageError::Connect)?;

        tracing::debug!(
            max_connections = config.max_connections,
            "Database pool established"
        );
        Ok(Self { pool })
    }

    /// Create database connection from URL with default pool settings
    pub async fn from_url(database_url: &str) -> Result<Self> {
        Self::connect(&DatabaseConfig::new(database_url)).await
    }

    /// Close every pooled connection. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Events
    // ============================================

    /// Insert one event. Returns rows affected.
    pub async fn insert_event(&self, input: &NewEvent) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (session_id, type, page, x, y, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&input.session_id)
        .bind(&input.event_type)
        .bind(&input.page)
        .bind(input.x)
        .bind(input.y)
        .bind(input.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// All events of a session, oldest first.
    ///
    /// Rows are pulled off a cursor one at a time; dropping the stream on any
    /// exit path (including `?` on a decode error) returns the connection.
    pub async fn list_session_events(&self, session_id: &str) -> Result<Vec<EventRow>> {
        let mut rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT session_id, type, page, x, y, timestamp
            FROM events
            WHERE session_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(session_id)
        .fetch(&self.pool);

        let mut events = Vec::new();
        while let Some(row) = rows.try_next().await? {
            events.push(row);
        }

        Ok(events)
    }

    // ============================================
    // Heatmap
    // ============================================

    /// One row per distinct (x, y) on the page with its event count.
    /// Row order is whatever the planner's grouping produces.
    pub async fn heatmap(&self, page: &str) -> Result<Vec<DotRow>> {
        let rows = sqlx::query_as::<_, DotRow>(
            r#"
            SELECT x, y, COUNT(*) AS count
            FROM events
            WHERE page = $1
            GROUP BY x, y
            "#,
        )
        .bind(page)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
