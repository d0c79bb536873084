//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::error::{ApiError, SessionError};
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let session_id = state.create_session().await;
  (StatusCode::CREATED, Json(SessionOut { session_id }))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  if state.drop_session(&id).await {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(SessionError::UnknownSession(id).into())
  }
}

/// Multipart upload; the first field named `file` is used.
#[instrument(level = "info", skip(state, multipart), fields(%id))]
pub async fn http_upload_document(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  mut multipart: Multipart,
) -> Result<Json<DocumentOut>, ApiError> {
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(e.to_string()))?
  {
    if field.name() != Some("file") {
      continue;
    }
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let doc = logic::upload_document(&state, &id, &file_name, &content_type, &bytes).await?;
    info!(target: "docassist", session = %id, %file_name, chars = doc.chars, "HTTP document uploaded");
    return Ok(Json(doc));
  }
  Err(ApiError::BadRequest("multipart field 'file' is required".into()))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_summary(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SummaryOut>, ApiError> {
  let summary = logic::summarize(&state, &id).await?;
  Ok(Json(SummaryOut { summary }))
}

#[instrument(level = "info", skip(state, body), fields(%id, question_len = body.question.len()))]
pub async fn http_post_ask(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AskIn>,
) -> Result<Json<AskOut>, ApiError> {
  let qa = logic::ask(&state, &id, &body.question).await?;
  Ok(Json(AskOut { answer: qa.answer, justification: qa.justification }))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_challenge(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ChallengeOut>, ApiError> {
  let challenge = logic::generate_challenge(&state, &id).await?;
  info!(target: "challenge", session = %id, challenge = %challenge.id, "HTTP challenge generated");
  Ok(Json(challenge))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_challenge(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ChallengeOut>, ApiError> {
  Ok(Json(logic::current_challenge(&state, &id).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_regenerate(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ClearedOut>, ApiError> {
  logic::regenerate_challenge(&state, &id).await?;
  Ok(Json(ClearedOut { cleared: true }))
}

#[instrument(level = "info", skip(state, body), fields(%id, answers = body.answers.len()))]
pub async fn http_post_answers(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswersIn>,
) -> Result<Json<EvaluationOut>, ApiError> {
  let out = logic::submit_answers(&state, &id, &body.answers).await?;
  info!(target: "challenge", session = %id, results = out.results.len(), "HTTP answers evaluated");
  Ok(Json(out))
}
