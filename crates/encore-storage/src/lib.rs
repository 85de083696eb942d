// Storage layer for Encore
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// The schema (events, reviews, notifications, notification_history) is owned by
// the managed backend; this crate only reads and writes rows.
//
// - Database: sqlx repository over PostgreSQL
// - InMemoryDatabase: HashMap-backed stand-in with the same API
// - StorageBackend: enum dispatch over both
// - DbEventSource: implements EventSource on top of the events table

pub mod backend;
pub mod event_source;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use event_source::{event_from_row, DbEventSource};
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
