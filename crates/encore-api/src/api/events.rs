// Event catalog and detail HTTP routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use encore_core::{CatalogView, EventDetail, Genre, ReviewSort};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::common::{ApiPath, ApiQuery, ErrorResponse};
use crate::auth::{AuthState, FromRef, OptionalAuthUser};
use crate::services::EventService;

/// Catalog filter
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive substring of title or artist
    #[serde(default)]
    pub q: Option<String>,
    /// Genre to show (default: all)
    #[serde(default)]
    pub genre: Option<Genre>,
}

/// Review ordering on the detail page
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailQuery {
    /// `latest` (default) or `rating`
    #[serde(default)]
    pub sort: Option<ReviewSort>,
}

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", get(list_events))
        .route("/v1/events/:event_id", get(get_event))
        .with_state(state)
}

/// GET /v1/events - Catalog view
///
/// Fetches all events once and filters them in memory. A failed fetch is
/// rendered as an empty catalog.
#[utoipa::path(
    get,
    path = "/v1/events",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Filtered catalog", body = CatalogView),
        (status = 400, description = "Unknown genre", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogQuery>,
) -> Json<CatalogView> {
    let search = query.q.unwrap_or_default();
    let genre = query.genre.unwrap_or_default();
    Json(state.service.catalog(&search, genre).await)
}

/// GET /v1/events/{event_id} - Detail view
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event ID"),
        DetailQuery
    ),
    responses(
        (status = 200, description = "Event with info box and reviews", body = EventDetail),
        (status = 400, description = "Unknown sort order", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(event_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<DetailQuery>,
) -> Result<Json<EventDetail>, (StatusCode, Json<ErrorResponse>)> {
    let sort = query.sort.unwrap_or_default();
    state
        .service
        .detail(&event_id, sort, viewer.user_id())
        .await
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Event not found")),
            )
        })
}
