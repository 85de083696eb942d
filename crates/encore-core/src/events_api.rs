// HTTP ingestion API event source
//
// GET {base} returns a JSON array of events, GET {base}/{id} a single event.
// The response shape is untrusted and coerced field by field; only a
// non-success status or a transport failure fails the call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::coerce::{event_from_value, events_from_payload};
use crate::error::{EncoreError, Result};
use crate::event::{sort_by_start, Event};
use crate::traits::EventSource;

/// Event source backed by the upstream ingestion API
///
/// # Example
///
/// ```ignore
/// use encore_core::events_api::HttpEventSource;
///
/// let source = HttpEventSource::new("https://ingest.example.com/events")?;
/// let events = source.fetch_events().await?;
/// ```
#[derive(Clone)]
pub struct HttpEventSource {
    client: Client,
    base_url: Url,
}

impl HttpEventSource {
    /// Create a source for the given collection URL
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a source reusing an existing HTTP client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EncoreError::config(format!("invalid events API URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(EncoreError::config("events API URL cannot be a base URL"));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn event_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<(StatusCode, Option<Value>)> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::error!(url = %url, "Events API request failed: {}", e);
            EncoreError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, None));
        }

        let payload = response.json::<Value>().await.map_err(|e| {
            tracing::error!(url = %url, "Events API returned an unreadable body: {}", e);
            EncoreError::transport(e.to_string())
        })?;
        Ok((status, Some(payload)))
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        let (status, payload) = self.get_json(self.base_url.clone()).await?;
        let Some(payload) = payload else {
            tracing::error!(status = %status, "Failed to fetch events from API");
            return Err(EncoreError::Upstream {
                status: status.as_u16(),
            });
        };

        let mut events = events_from_payload(&payload);
        sort_by_start(&mut events);
        tracing::debug!(count = events.len(), "Fetched events from API");
        Ok(events)
    }

    async fn fetch_event_by_id(&self, id: &str) -> Result<Option<Event>> {
        let (status, payload) = self.get_json(self.event_url(id)).await?;
        match payload {
            Some(payload) => Ok(event_from_value(&payload)),
            None if status == StatusCode::NOT_FOUND => Ok(None),
            None => {
                tracing::error!(status = %status, event_id = %id, "Failed to fetch event from API");
                Err(EncoreError::Upstream {
                    status: status.as_u16(),
                })
            }
        }
    }

    fn kind(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source_for(server: &MockServer) -> HttpEventSource {
        HttpEventSource::new(&format!("{}/events", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_events_orders_by_start() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "title": "June", "start_date": "2025-06-01" },
                { "id": 2, "title": "May", "start_date": "2025-05-01" }
            ])))
            .mount(&server)
            .await;

        let events = source_for(&server).await.fetch_events().await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_fetch_events_tolerates_malformed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "a", "title": { "ko": "x" }, "venue_lat": "37.5" },
                { "id": "b", "start_date": 20250601, "genre": null },
                {}
            ])))
            .mount(&server)
            .await;

        let events = source_for(&server).await.fetch_events().await.unwrap();
        assert_eq!(events.len(), 3);
        let a = events.iter().find(|e| e.id == "a").unwrap();
        assert_eq!(a.title, "");
        assert_eq!(a.venue_lat, None);
    }

    #[tokio::test]
    async fn test_fetch_events_non_array_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
            .mount(&server)
            .await;

        let events = source_for(&server).await.fetch_events().await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_events_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).await.fetch_events().await.unwrap_err();
        assert!(matches!(err, EncoreError::Upstream { status: 503 }));
    }

    #[tokio::test]
    async fn test_fetch_event_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/abc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc-1",
                "title": "Jazz Brunch",
                "image_url": ""
            })))
            .mount(&server)
            .await;

        let event = source_for(&server)
            .await
            .fetch_event_by_id("abc-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.title, "Jazz Brunch");
        assert_eq!(event.image_url, None);
    }

    #[tokio::test]
    async fn test_fetch_event_by_id_not_found_and_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/events/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/events/scalar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("nope")))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        assert!(source.fetch_event_by_id("missing").await.unwrap().is_none());
        assert!(source.fetch_event_by_id("scalar").await.unwrap().is_none());
        assert!(matches!(
            source.fetch_event_by_id("broken").await,
            Err(EncoreError::Upstream { status: 500 })
        ));
    }

    #[test]
    fn test_event_url_joins_and_encodes() {
        let source = HttpEventSource::new("https://ingest.example.com/v2/events/").unwrap();
        assert_eq!(
            source.event_url("a b").as_str(),
            "https://ingest.example.com/v2/events/a%20b"
        );

        let source = HttpEventSource::new("https://ingest.example.com/events").unwrap();
        assert_eq!(
            source.event_url("42").as_str(),
            "https://ingest.example.com/events/42"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpEventSource::new("not a url"),
            Err(EncoreError::Configuration(_))
        ));
        assert!(matches!(
            HttpEventSource::new("mailto:events@example.com"),
            Err(EncoreError::Configuration(_))
        ));
    }
}
