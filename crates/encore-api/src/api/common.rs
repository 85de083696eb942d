// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_core::EncoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Domain error rendered as a JSON error response
#[derive(Debug)]
pub struct ApiError(pub EncoreError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            EncoreError::Validation(_) | EncoreError::PushUnsupported => StatusCode::BAD_REQUEST,
            EncoreError::Forbidden(_) | EncoreError::PermissionDenied => StatusCode::FORBIDDEN,
            EncoreError::NotFound(_) => StatusCode::NOT_FOUND,
            EncoreError::Upstream { .. } | EncoreError::Transport(_) => StatusCode::BAD_GATEWAY,
            EncoreError::PushUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            EncoreError::Store(_) | EncoreError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<EncoreError> for ApiError {
    fn from(err: EncoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Store and configuration details stay in the logs
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Extractor rejection rendered as a JSON error response
pub type Rejection = (StatusCode, Json<ErrorResponse>);

fn rejection(status: StatusCode, body_text: String) -> Rejection {
    tracing::warn!(status = %status, "Rejected request: {}", body_text);
    (status, Json(ErrorResponse::new(body_text)))
}

/// `Query` extractor answering malformed query strings with an `ErrorResponse`
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(e) => Err(rejection(e.status(), e.body_text())),
        }
    }
}

/// `Path` extractor answering malformed path parameters with an `ErrorResponse`
pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(e) => Err(rejection(e.status(), e.body_text())),
        }
    }
}

/// `Json` body extractor answering malformed bodies with an `ErrorResponse`
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(e) => Err(rejection(e.status(), e.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EncoreError::validation("x"), StatusCode::BAD_REQUEST),
            (EncoreError::PushUnsupported, StatusCode::BAD_REQUEST),
            (EncoreError::PermissionDenied, StatusCode::FORBIDDEN),
            (EncoreError::forbidden("x"), StatusCode::FORBIDDEN),
            (EncoreError::not_found("event"), StatusCode::NOT_FOUND),
            (EncoreError::Upstream { status: 500 }, StatusCode::BAD_GATEWAY),
            (EncoreError::push_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE),
            (EncoreError::store("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_query_rejection_is_json() {
        use axum::http::Request as HttpRequest;

        #[derive(Debug, Deserialize)]
        struct Paging {
            #[allow(dead_code)]
            limit: u32,
        }

        let (mut parts, _) = HttpRequest::builder()
            .uri("/items?limit=many")
            .body(())
            .unwrap()
            .into_parts();
        let Err((status, Json(body))) =
            ApiQuery::<Paging>::from_request_parts(&mut parts, &()).await
        else {
            panic!("expected a rejection");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.starts_with("Failed to deserialize query string"));
    }

    #[test]
    fn test_list_response_serialization() {
        let list: ListResponse<i32> = vec![1, 2].into();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
