// Router assembly
// Decision: Collaborators are constructed by the caller and injected, no globals

use axum::{extract::State, routing::get, Json, Router};
use encore_core::{EventSource, PushCapability};
use encore_storage::StorageBackend;
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::auth::AuthState;
use crate::openapi::ApiDoc;
use crate::services::{EventService, IntakeService, NotificationService, ReviewService};

/// Collaborators the routes are wired with
#[derive(Clone)]
pub struct AppContext {
    pub db: StorageBackend,
    pub events: Arc<dyn EventSource>,
    pub push: Option<Arc<dyn PushCapability>>,
    pub auth: AuthState,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
    event_source: &'static str,
    push: bool,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
    event_source: &'static str,
    push: bool,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
        event_source: state.event_source,
        push: state.push,
    })
}

/// Build the complete application router (without outer layers)
pub fn build_app(ctx: AppContext, api_prefix: &str) -> Router {
    let review_service = Arc::new(ReviewService::new(ctx.db.clone()));
    let event_service = Arc::new(EventService::new(
        ctx.events.clone(),
        review_service.clone(),
    ));
    let notification_service = Arc::new(NotificationService::new(
        ctx.db.clone(),
        ctx.push.clone(),
    ));
    let intake_service = Arc::new(IntakeService::new(ctx.db.clone()));

    let health_state = HealthState {
        storage: if ctx.db.is_dev_mode() {
            "memory"
        } else {
            "postgres"
        },
        event_source: ctx.events.kind(),
        push: notification_service.push_enabled(),
    };

    // Create module-specific states
    let events_state = api::events::AppState {
        service: event_service,
        auth: ctx.auth.clone(),
    };
    let reviews_state = api::reviews::AppState {
        service: review_service,
        auth: ctx.auth.clone(),
    };
    let notifications_state = api::notifications::AppState {
        service: notification_service,
        auth: ctx.auth.clone(),
    };
    let admin_state = api::admin::AppState {
        service: intake_service,
        auth: ctx.auth,
    };

    let api_routes = Router::new()
        .merge(api::events::routes(events_state))
        .merge(api::reviews::routes(reviews_state))
        .merge(api::notifications::routes(notifications_state))
        .merge(api::admin::routes(admin_state));

    // Health is never prefixed
    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(build_router_with_prefix(api_routes, api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// Build router with optional API prefix
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
