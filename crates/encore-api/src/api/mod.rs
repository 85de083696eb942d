// Public API routes
//
// Each module owns its routes and route state; `main` merges them.

pub mod admin;
pub mod common;
pub mod events;
pub mod notifications;
pub mod reviews;

pub use common::{ApiError, ErrorResponse, ListResponse};
