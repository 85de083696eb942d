// Encore core domain
//
// DB-agnostic domain types and logic shared by the API and storage crates.
//
// Key design decisions:
// - Events carry timestamps as text; the HTTP source is untrusted and coerced per field
// - Event sources are pluggable via the EventSource trait (HTTP API or database)
// - Catalog filtering and review ordering are pure in-memory passes over fetched data
// - The push provider is reached only through the PushCapability trait, and only
//   after it has been initialized

// Domain entity types
pub mod event;
pub mod notification;
pub mod review;

pub mod catalog;
pub mod coerce;
pub mod error;
pub mod events_api;
pub mod intake;
pub mod traits;
pub mod view;

// In-memory implementations for examples and testing
pub mod memory;

// Re-exports for convenience
pub use catalog::{CatalogFilter, Genre};
pub use error::{EncoreError, Result};
pub use event::{format_timestamp, parse_timestamp, sort_by_start, Event, NewEvent};
pub use events_api::HttpEventSource;
pub use intake::EventIntakeForm;
pub use notification::{
    DeliveryStatus, NewNotification, Notification, NotificationEntry, NotificationEventSummary,
    NotificationHistory, NotificationHistoryEntry, NotificationKind, ShiftOffset,
};
pub use review::{review_views, sort_reviews, NewReview, Review, ReviewSort, ReviewView};
pub use traits::{EventSource, PushCapability};
pub use view::{CatalogView, EventDetail, EventInfo, GenreOption};
