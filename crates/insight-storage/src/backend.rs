// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use std::sync::Arc;

use insight_core::NewEvent;

use crate::error::Result;
use crate::memory::InMemoryDatabase;
use crate::models::*;
use crate::repositories::{Database, DatabaseConfig};

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend
    pub async fn postgres(config: &DatabaseConfig) -> Result<Self> {
        let db = Database::connect(config).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Short backend name for logs and health output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.ping().await,
            Self::InMemory(db) => db.ping().await,
        }
    }

    /// Release pooled connections. No-op for in-memory.
    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn insert_event(&self, input: &NewEvent) -> Result<u64> {
        match self {
            Self::Postgres(db) => db.insert_event(input).await,
            Self::InMemory(db) => db.insert_event(input).await,
        }
    }

    pub async fn list_session_events(&self, session_id: &str) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_session_events(session_id).await,
            Self::InMemory(db) => db.list_session_events(session_id).await,
        }
    }

    // ============================================
    // Heatmap
    // ============================================

    pub async fn heatmap(&self, page: &str) -> Result<Vec<DotRow>> {
        match self {
            Self::Postgres(db) => db.heatmap(page).await,
            Self::InMemory(db) => db.heatmap(page).await,
        }
    }
}

impl From<Arc<InMemoryDatabase>> for StorageBackend {
    fn from(db: Arc<InMemoryDatabase>) -> Self {
        Self::InMemory(db)
    }
}
