//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("provider error: {0}")]
  Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<holiday_sync::Error> for ApiError {
  fn from(e: holiday_sync::Error) -> Self {
    use holiday_core::Error as Core;
    use holiday_sync::Error as SyncError;

    match e {
      SyncError::Core(ref c @ (Core::YearOutOfRange { .. } | Core::InvalidSort(_))) => {
        ApiError::BadRequest(c.to_string())
      }
      SyncError::Core(ref c @ Core::UnknownCountry(_)) => ApiError::NotFound(c.to_string()),
      SyncError::Provider(inner) => ApiError::Provider(inner),
      SyncError::Store(inner) => ApiError::Store(inner),
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Provider(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    if status.is_server_error() {
      tracing::error!(%status, "request failed: {message}");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
