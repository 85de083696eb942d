// Route tests against the in-memory backend

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use encore_api::auth::{AuthConfig, AuthState};
use encore_api::{build_app, AppContext};
use encore_core::memory::{InMemoryEventSource, StaticPushCapability};
use encore_core::Event;
use encore_storage::{DbEventSource, StorageBackend};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "route-test-secret";

struct TestApp {
    app: Router,
    auth: AuthState,
    push: StaticPushCapability,
}

impl TestApp {
    fn token(&self, user_id: Uuid) -> String {
        self.auth
            .jwt_service
            .generate_access_token(user_id, None)
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        // Every response with a body is JSON, including rejections
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str, user: Option<Uuid>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn send_json(
        &self,
        method: &str,
        uri: &str,
        user: Option<Uuid>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn delete(&self, uri: &str, user: Uuid) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

fn test_app(events: Arc<dyn encore_core::EventSource>, db: StorageBackend) -> TestApp {
    let auth = AuthState::new(AuthConfig::with_secret(SECRET));
    let push = StaticPushCapability::new("test-app");
    let ctx = AppContext {
        db,
        events,
        push: Some(Arc::new(push.clone())),
        auth: auth.clone(),
    };
    TestApp {
        app: build_app(ctx, ""),
        auth,
        push,
    }
}

fn db_app() -> TestApp {
    let db = StorageBackend::in_memory();
    test_app(Arc::new(DbEventSource::new(db.clone())), db)
}

fn intake_form() -> Value {
    json!({
        "title": "Summer Jazz Night",
        "artist": "Quartet",
        "description": "Standards under the stars",
        "start_date": "2025-07-01T19:00",
        "end_date": "2025-07-01T22:00",
        "venue": "Riverside Park",
        "venue_address": "",
        "venue_lat": "37.52",
        "venue_lng": "127.12",
        "genre": "jazz",
        "ticket_open_time": "2025-06-01T10:00",
        "price_range": ""
    })
}

async fn register_event(app: &TestApp, admin: Uuid) -> String {
    let (status, body) = app
        .send_json("POST", "/v1/admin/events", Some(admin), intake_form())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = db_app();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["event_source"], "database");
    assert_eq!(body["push"], true);
}

#[tokio::test]
async fn test_catalog_filters() {
    let events = vec![
        Event {
            id: "1".to_string(),
            title: "Summer Jazz".to_string(),
            artist: "Trio".to_string(),
            genre: "jazz".to_string(),
            start_date: "2025-06-01".to_string(),
            ..Default::default()
        },
        Event {
            id: "2".to_string(),
            title: "Loud Night".to_string(),
            artist: "The Amps".to_string(),
            genre: "rock".to_string(),
            start_date: "2025-05-01".to_string(),
            ..Default::default()
        },
    ];
    let app = test_app(
        Arc::new(InMemoryEventSource::new(events)),
        StorageBackend::in_memory(),
    );

    let (status, body) = app.get("/v1/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["id"], "2");
    assert_eq!(body["events"][1]["id"], "1");
    assert_eq!(body["genre"], "all");

    let (_, body) = app.get("/v1/events?genre=rock", None).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 1);
    assert_eq!(body["events"][0]["title"], "Loud Night");

    let (_, body) = app.get("/v1/events?q=AMPS", None).await;
    assert_eq!(body["events"][0]["id"], "2");

    let (status, body) = app.get("/v1/events?genre=polka", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("query string"));
}

#[tokio::test]
async fn test_catalog_fetch_failure_is_empty() {
    let source = InMemoryEventSource::new(vec![Event {
        id: "1".to_string(),
        ..Default::default()
    }]);
    source.set_failing(true).await;
    let app = test_app(Arc::new(source), StorageBackend::in_memory());

    let (status, body) = app.get("/v1/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_intake_then_detail() {
    let app = db_app();
    let admin = Uuid::now_v7();

    let (status, _) = app
        .send_json("POST", "/v1/admin/events", None, intake_form())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut invalid = intake_form();
    invalid["end_date"] = json!("2025-06-30T19:00");
    let (status, body) = app
        .send_json("POST", "/v1/admin/events", Some(admin), invalid)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("start_date"));

    let id = register_event(&app, admin).await;

    let (status, body) = app.get(&format!("/v1/events/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Summer Jazz Night");
    assert_eq!(body["info"]["coordinates"], json!([37.52, 127.12]));
    assert!(body["event"].get("venue_address").is_none());
    assert!(body["event"].get("price_range").is_none());
    assert_eq!(body["sort"], "latest");
    assert!(body["reviews"].as_array().unwrap().is_empty());

    let (status, body) = app.get("/v1/events/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = db_app();
    let author = Uuid::now_v7();
    let other = Uuid::now_v7();
    let id = register_event(&app, author).await;
    let reviews_uri = format!("/v1/events/{}/reviews", id);

    let (status, _) = app
        .send_json("POST", &reviews_uri, None, json!({ "rating": 5, "content": "wow" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send_json("POST", &reviews_uri, Some(author), json!({ "rating": 0, "content": "x" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, mine) = app
        .send_json("POST", &reviews_uri, Some(author), json!({ "rating": 2, "content": "meh" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(mine["user_id"], author.to_string());
    app.send_json("POST", &reviews_uri, Some(other), json!({ "rating": 5, "content": "great" }))
        .await;

    let (_, body) = app
        .get(&format!("/v1/events/{}?sort=rating", id), Some(author))
        .await;
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews[0]["rating"], 5);
    assert_eq!(reviews[0]["can_delete"], false);
    assert_eq!(reviews[1]["can_delete"], true);

    let (_, body) = app.get(&reviews_uri, None).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["can_delete"] == false));

    let review_uri = format!("/v1/reviews/{}", mine["id"].as_str().unwrap());
    let (status, _) = app.delete(&review_uri, other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&review_uri, author).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get(&reviews_uri, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_notification_lifecycle() {
    let app = db_app();
    let user = Uuid::now_v7();
    let id = register_event(&app, user).await;
    let target = Utc.with_ymd_and_hms(2025, 7, 1, 19, 0, 0).unwrap();
    let request = json!({
        "event_id": id,
        "type": "event",
        "notification_date": target,
    });

    let (status, _) = app
        .send_json("POST", "/v1/notifications", None, request.clone())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown to the push provider
    let (status, _) = app
        .send_json("POST", "/v1/notifications", Some(user), request.clone())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.push.deny(user).await;
    let (status, _) = app
        .send_json("POST", "/v1/notifications", Some(user), request.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.push.grant(user).await;
    let (status, created) = app
        .send_json("POST", "/v1/notifications", Some(user), request)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], "event");

    let (status, body) = app.get("/v1/notifications", Some(user)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["event"]["title"], "Summer Jazz Night");
    assert_eq!(entries[0]["event"]["venue"], "Riverside Park");

    let shift_uri = format!("/v1/notifications/{}/shift", created["id"].as_str().unwrap());
    app.send_json("POST", &shift_uri, Some(user), json!({ "offset": "1h" }))
        .await;
    let (status, shifted) = app
        .send_json("POST", &shift_uri, Some(user), json!({ "offset": "1d" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let shifted_at: chrono::DateTime<Utc> =
        serde_json::from_value(shifted["notification_date"].clone()).unwrap();
    assert_eq!(shifted_at, target - Duration::hours(25));

    let (status, body) = app
        .send_json("POST", &shift_uri, Some(user), json!({ "offset": "2h" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, history) = app.get("/v1/notifications/history", Some(user)).await;
    assert!(history["data"].as_array().unwrap().is_empty());

    let notification_uri = format!("/v1/notifications/{}", created["id"].as_str().unwrap());
    let (status, _) = app.delete(&notification_uri, Uuid::now_v7()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&notification_uri, user).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get("/v1/notifications", Some(user)).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_event_ids_support_reviews_and_notifications() {
    let source = InMemoryEventSource::new(vec![Event {
        id: "42".to_string(),
        title: "Upstream Show".to_string(),
        start_date: "2025-06-01".to_string(),
        ..Default::default()
    }]);
    let app = test_app(Arc::new(source), StorageBackend::in_memory());
    let user = Uuid::now_v7();

    let (status, _) = app.get("/v1/events/42", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, review) = app
        .send_json(
            "POST",
            "/v1/events/42/reviews",
            Some(user),
            json!({ "rating": 4, "content": "solid" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["event_id"], "42");

    let (_, body) = app.get("/v1/events/42", Some(user)).await;
    assert_eq!(body["reviews"][0]["content"], "solid");
    assert_eq!(body["reviews"][0]["can_delete"], true);

    app.push.grant(user).await;
    let (status, created) = app
        .send_json(
            "POST",
            "/v1/notifications",
            Some(user),
            json!({
                "event_id": "42",
                "type": "ticket",
                "notification_date": Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["event_id"], "42");
}

#[tokio::test]
async fn test_malformed_path_is_json_error() {
    let app = db_app();
    let (status, body) = app.delete("/v1/reviews/not-a-uuid", Uuid::now_v7()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let app = db_app();
    let user = Uuid::now_v7();
    let request = Request::builder()
        .uri("/v1/notifications")
        .header(header::COOKIE, format!("sb-access-token={}", app.token(user)))
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = db_app();
    let (status, body) = app.get("/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Encore API");
}
