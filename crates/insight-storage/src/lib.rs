// Postgres storage layer with sqlx
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// This crate is the only place that talks to the events table:
// - Database: PgPool-backed repository
// - InMemoryDatabase: same API over a Vec, for dev mode and tests
// - StorageBackend: enum over the two, handed to services

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
