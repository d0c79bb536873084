//! Error types for extraction, sessions and the HTTP surface.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

/// Upload/decoding failures from the text extraction step.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
  #[error("unsupported file type: {content_type}")]
  Unsupported { content_type: String },

  #[error("document is not valid UTF-8: {0}")]
  Decode(#[from] std::string::FromUtf8Error),

  #[error("failed to read PDF: {0}")]
  Pdf(String),

  #[error("no text found in document")]
  NoText,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
  #[error("unknown session: {0}")]
  UnknownSession(String),

  #[error("no document uploaded for this session")]
  NoDocument,

  #[error("no active challenge; generate one first")]
  NoChallenge,

  #[error(transparent)]
  Extraction(#[from] ExtractionError),
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error(transparent)]
  Session(#[from] SessionError),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Session(SessionError::UnknownSession(_)) => StatusCode::NOT_FOUND,
      ApiError::Session(SessionError::NoDocument | SessionError::NoChallenge) => StatusCode::CONFLICT,
      ApiError::Session(SessionError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl From<ExtractionError> for ApiError {
  fn from(err: ExtractionError) -> Self {
    ApiError::Session(SessionError::Extraction(err))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    tracing::warn!(target: "docassist", %status, error = %self, "Request failed");
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
