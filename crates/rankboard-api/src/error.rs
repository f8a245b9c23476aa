//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rankboard_core::{InvalidProgressionError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  InvalidProgression(#[from] InvalidProgressionError),

  #[error("session error: {0}")]
  Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    match self {
      ApiError::BadRequest(_) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
          .into_response()
      }
      ApiError::Validation(e) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
          "error":  message,
          "field":  e.field,
          "reason": e.reason,
        })),
      )
        .into_response(),
      ApiError::InvalidProgression(_) => {
        tracing::warn!(%message, "refusing to render progression");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": message })))
          .into_response()
      }
      ApiError::Session(_) => {
        tracing::error!(%message, "profile session failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
          .into_response()
      }
    }
  }
}
