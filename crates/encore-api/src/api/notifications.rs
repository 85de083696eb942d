// Notification HTTP routes
// Decision: All routes act on the signed-in viewer's own records

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use encore_core::{
    NewNotification, Notification, NotificationEntry, NotificationHistoryEntry, ShiftOffset,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ApiJson, ApiPath, ErrorResponse, ListResponse};
use crate::auth::{AuthState, AuthUser, FromRef};
use crate::services::NotificationService;

/// Request to move a notification earlier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShiftNotificationRequest {
    /// `1h` or `1d`
    pub offset: ShiftOffset,
}

/// App state for notification routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NotificationService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create notification routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/notifications",
            get(list_notifications).post(create_notification),
        )
        .route("/v1/notifications/history", get(list_history))
        .route(
            "/v1/notifications/:notification_id",
            delete(delete_notification),
        )
        .route(
            "/v1/notifications/:notification_id/shift",
            post(shift_notification),
        )
        .with_state(state)
}

/// GET /v1/notifications - Own subscriptions
#[utoipa::path(
    get,
    path = "/v1/notifications",
    responses(
        (status = 200, description = "Subscriptions with their event, newest first", body = ListResponse<NotificationEntry>),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ListResponse<NotificationEntry>>, ApiError> {
    let entries = state.service.list(user.id).await.map_err(|e| {
        tracing::error!("Failed to list notifications: {}", e);
        ApiError(e)
    })?;

    Ok(Json(ListResponse::new(entries)))
}

/// POST /v1/notifications - Subscribe to an event alert
///
/// Checks push support and permission for the viewer before anything is stored.
#[utoipa::path(
    post,
    path = "/v1/notifications",
    request_body = NewNotification,
    responses(
        (status = 201, description = "Notification scheduled", body = Notification),
        (status = 400, description = "Missing event_id or push not supported for this user", body = ErrorResponse),
        (status = 401, description = "Sign-in required"),
        (status = 403, description = "Push permission not granted", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 503, description = "Push service unavailable", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<NewNotification>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let notification = state.service.subscribe(user.id, req).await.map_err(|e| {
        tracing::error!("Failed to set notification: {}", e);
        ApiError(e)
    })?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /v1/notifications/{notification_id}/shift - Move the alert earlier
#[utoipa::path(
    post,
    path = "/v1/notifications/{notification_id}/shift",
    params(
        ("notification_id" = Uuid, Path, description = "Notification ID")
    ),
    request_body = ShiftNotificationRequest,
    responses(
        (status = 200, description = "Updated notification", body = Notification),
        (status = 401, description = "Sign-in required"),
        (status = 403, description = "Notification belongs to another user", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse),
        (status = 422, description = "Unknown offset", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn shift_notification(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(notification_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ShiftNotificationRequest>,
) -> Result<Json<Notification>, ApiError> {
    let notification = state
        .service
        .shift(notification_id, user.id, req.offset)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update notification time: {}", e);
            ApiError(e)
        })?;

    Ok(Json(notification))
}

/// DELETE /v1/notifications/{notification_id} - Delete own subscription
#[utoipa::path(
    delete,
    path = "/v1/notifications/{notification_id}",
    params(
        ("notification_id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 401, description = "Sign-in required"),
        (status = 403, description = "Notification belongs to another user", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(notification_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete(notification_id, user.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete notification: {}", e);
            ApiError(e)
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/notifications/history - Own delivery history
#[utoipa::path(
    get,
    path = "/v1/notifications/history",
    responses(
        (status = 200, description = "Delivery attempts, most recently sent first", body = ListResponse<NotificationHistoryEntry>),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn list_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ListResponse<NotificationHistoryEntry>>, ApiError> {
    let history = state.service.history(user.id).await.map_err(|e| {
        tracing::error!("Failed to list notification history: {}", e);
        ApiError(e)
    })?;

    Ok(Json(ListResponse::new(history)))
}
