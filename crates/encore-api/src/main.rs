// Encore API server
// Decision: Storage, event source and push capability are chosen from the
// environment at startup and degrade to in-process defaults when unset

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use encore_api::{build_app, AppConfig, AppContext};
use encore_core::{EventSource, HttpEventSource, PushCapability};
use encore_onesignal::OneSignalClient;
use encore_storage::{DbEventSource, StorageBackend};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encore_api::auth::AuthState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("encore-api starting...");

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // Initialize storage
    let db = match &config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set, using in-memory storage (data is lost on restart)"
            );
            StorageBackend::in_memory()
        }
    };

    // Select the event source
    let events: Arc<dyn EventSource> = match &config.events_api_url {
        Some(url) => {
            let source = HttpEventSource::new(url).context("Invalid EVENTS_API_URL")?;
            tracing::info!(url = %source.base_url(), "Reading events from ingestion API");
            Arc::new(source)
        }
        None => {
            tracing::info!("Reading events from the database");
            Arc::new(DbEventSource::new(db.clone()))
        }
    };

    // Initialize the push capability (optional)
    let push: Option<Arc<dyn PushCapability>> = match config.onesignal.clone() {
        Some(onesignal) => match OneSignalClient::new(onesignal).init().await {
            Ok(ready) => Some(Arc::new(ready)),
            Err(e) => {
                tracing::warn!(
                    "OneSignal initialization failed: {}. Notifications disabled.",
                    e
                );
                None
            }
        },
        None => {
            tracing::warn!(
                "OneSignal not configured (ONESIGNAL_APP_ID/ONESIGNAL_API_KEY). \
                 Notifications disabled."
            );
            None
        }
    };

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let ctx = AppContext {
        db,
        events,
        push,
        auth: AuthState::new(config.auth.clone()),
    };
    let app = build_app(ctx, &config.api_prefix);

    // Add CORS layer only if origins are configured
    let cors_origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let app = if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
