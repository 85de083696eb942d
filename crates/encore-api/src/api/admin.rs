// Admin intake HTTP routes
// Decision: Intake requires a signed-in user; role management lives in the backend

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use encore_core::{Event, EventIntakeForm};
use std::sync::Arc;

use super::common::{ApiError, ApiJson, ErrorResponse};
use crate::auth::{AuthState, AuthUser, FromRef};
use crate::services::IntakeService;

/// App state for admin routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IntakeService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create admin routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/admin/events", post(create_event))
        .with_state(state)
}

/// POST /v1/admin/events - Register an event from the intake form
///
/// Empty optional fields are stored as absent; coordinates are parsed from text.
#[utoipa::path(
    post,
    path = "/v1/admin/events",
    request_body = EventIntakeForm,
    responses(
        (status = 201, description = "Event registered", body = Event),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(form): ApiJson<EventIntakeForm>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.service.submit(form).await.map_err(|e| {
        tracing::error!(user_id = %user.id, "Failed to register event: {}", e);
        ApiError(e)
    })?;

    Ok((StatusCode::CREATED, Json(event)))
}
