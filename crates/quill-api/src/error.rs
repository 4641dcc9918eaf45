//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{StatusCode, header},
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

  #[error("authentication required")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("password hashing failed")]
  Hash,

  #[error("store error: {0}")]
  Store(#[source] quill_core::Error),
}

impl From<quill_core::Error> for ApiError {
  fn from(err: quill_core::Error) -> Self {
    use quill_core::Error;
    match &err {
      Error::UserNotFound(_)
      | Error::PostNotFound(_)
      | Error::CommentNotFound(_)
      | Error::ParentCommentNotFound(_) => Self::NotFound(err.to_string()),
      Error::EmptyField(_) => Self::BadRequest(err.to_string()),
      Error::EmailTaken | Error::NicknameTaken => Self::Conflict(err.to_string()),
      Error::Storage(_) => Self::Store(err),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized => {
        return (
          StatusCode::UNAUTHORIZED,
          [(header::WWW_AUTHENTICATE, "Bearer")],
          Json(json!({ "error": "authentication required" })),
        )
          .into_response();
      }
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Hash | ApiError::Store(_) => {
        tracing::error!(error = %self, "internal error");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal error".to_owned(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
