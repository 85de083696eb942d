// OpenAPI document
//
// Served by the API server through Swagger UI.

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use encore_core::{
    CatalogView, DeliveryStatus, Event, EventDetail, EventInfo, EventIntakeForm, Genre,
    GenreOption, NewNotification, NewReview, Notification, NotificationEntry,
    NotificationEventSummary, NotificationHistory, NotificationHistoryEntry, NotificationKind,
    Review, ReviewSort, ReviewView, ShiftOffset,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Encore API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::list_events,
        api::events::get_event,
        api::reviews::list_reviews,
        api::reviews::create_review,
        api::reviews::delete_review,
        api::notifications::list_notifications,
        api::notifications::create_notification,
        api::notifications::shift_notification,
        api::notifications::delete_notification,
        api::notifications::list_history,
        api::admin::create_event,
    ),
    components(
        schemas(
            Event, EventInfo, EventDetail, CatalogView, Genre, GenreOption,
            Review, ReviewView, ReviewSort, NewReview,
            Notification, NotificationKind, NotificationEntry, NotificationEventSummary,
            NewNotification, ShiftOffset,
            NotificationHistory, NotificationHistoryEntry, DeliveryStatus,
            EventIntakeForm,
            api::notifications::ShiftNotificationRequest,
            ErrorResponse,
            ListResponse<ReviewView>,
            ListResponse<NotificationEntry>,
            ListResponse<NotificationHistoryEntry>,
        )
    ),
    tags(
        (name = "events", description = "Event catalog and detail"),
        (name = "reviews", description = "Event reviews"),
        (name = "notifications", description = "Ticket-open and event-start alerts"),
        (name = "admin", description = "Event registration")
    ),
    info(
        title = "Encore API",
        version = "0.1.0",
        description = "API for browsing live-performance events, reviewing them and scheduling alerts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;
