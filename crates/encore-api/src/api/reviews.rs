// Review HTTP routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use encore_core::{NewReview, Review, ReviewView};
use std::sync::Arc;
use uuid::Uuid;

use super::common::{ApiError, ApiJson, ApiPath, ApiQuery, ErrorResponse, ListResponse};
use super::events::DetailQuery;
use crate::auth::{AuthState, AuthUser, FromRef, OptionalAuthUser};
use crate::services::ReviewService;

/// App state for review routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReviewService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create review routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events/:event_id/reviews",
            get(list_reviews).post(create_review),
        )
        .route("/v1/reviews/:review_id", delete(delete_review))
        .with_state(state)
}

/// GET /v1/events/{event_id}/reviews - Reviews of an event
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}/reviews",
    params(
        ("event_id" = String, Path, description = "Event ID"),
        DetailQuery
    ),
    responses(
        (status = 200, description = "Reviews in the requested order", body = ListResponse<ReviewView>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(event_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<DetailQuery>,
) -> Result<Json<ListResponse<ReviewView>>, ApiError> {
    let reviews = state
        .service
        .list_for_viewer(&event_id, query.sort.unwrap_or_default(), viewer.user_id())
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews: {}", e);
            ApiError(e)
        })?;

    Ok(Json(ListResponse::new(reviews)))
}

/// POST /v1/events/{event_id}/reviews - Write a review
#[utoipa::path(
    post,
    path = "/v1/events/{event_id}/reviews",
    params(
        ("event_id" = String, Path, description = "Event ID")
    ),
    request_body = NewReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid rating or content", body = ErrorResponse),
        (status = 401, description = "Sign-in required"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(event_id): ApiPath<String>,
    ApiJson(req): ApiJson<NewReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state
        .service
        .create(&event_id, user.id, req)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create review: {}", e);
            ApiError(e)
        })?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// DELETE /v1/reviews/{review_id} - Delete own review
#[utoipa::path(
    delete,
    path = "/v1/reviews/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Sign-in required"),
        (status = 403, description = "Review belongs to another user", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(review_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete(review_id, user.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete review: {}", e);
            ApiError(e)
        })?;

    Ok(StatusCode::NO_CONTENT)
}
