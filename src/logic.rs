//! Core session operations shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Installing an uploaded document (extraction + preview)
//!   - Auto summary and ask-anything (collaborator calls happen outside the session lock)
//!   - Generating, clearing and evaluating challenge sets

use tracing::{info, instrument};

use crate::assist::{ask_question, preview, summarize_document, QaAnswer};
use crate::error::{ApiError, SessionError};
use crate::extract::extract;
use crate::protocol::{to_out, to_results_out, ChallengeOut, DocumentOut, EvaluationOut, GENERAL_TIP};
use crate::state::AppState;

#[instrument(level = "info", skip(state, bytes), fields(%session_id, bytes = bytes.len()))]
pub async fn upload_document(
  state: &AppState,
  session_id: &str,
  file_name: &str,
  content_type: &str,
  bytes: &[u8],
) -> Result<DocumentOut, SessionError> {
  let extracted = extract(file_name, content_type, bytes);
  state
    .with_session(session_id, |s| {
      s.load_document(file_name, extracted).map(|doc| DocumentOut {
        file_name: doc.file_name.clone(),
        chars: doc.char_count(),
        preview: preview(&doc.text).to_string(),
      })
    })
    .await?
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn summarize(state: &AppState, session_id: &str) -> Result<String, SessionError> {
  let text = state.document_text(session_id).await?;
  Ok(summarize_document(state, &text).await)
}

#[instrument(level = "info", skip(state, question), fields(%session_id, question_len = question.len()))]
pub async fn ask(state: &AppState, session_id: &str, question: &str) -> Result<QaAnswer, ApiError> {
  let question = question.trim();
  if question.is_empty() {
    return Err(ApiError::BadRequest("question must not be empty".into()));
  }
  let text = state.document_text(session_id).await?;
  Ok(ask_question(state, &text, question).await)
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn generate_challenge(state: &AppState, session_id: &str) -> Result<ChallengeOut, SessionError> {
  let out = state
    .with_session(session_id, |s| s.generate_challenge().map(to_out))
    .await??;
  info!(target: "challenge", %session_id, id = %out.id, "Challenge served");
  Ok(out)
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn current_challenge(state: &AppState, session_id: &str) -> Result<ChallengeOut, SessionError> {
  state
    .with_session(session_id, |s| s.challenge().map(to_out).ok_or(SessionError::NoChallenge))
    .await?
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn regenerate_challenge(state: &AppState, session_id: &str) -> Result<(), SessionError> {
  state.with_session(session_id, |s| s.regenerate_challenge()).await
}

#[instrument(level = "info", skip(state, answers), fields(%session_id, answers = answers.len()))]
pub async fn submit_answers(
  state: &AppState,
  session_id: &str,
  answers: &[String],
) -> Result<EvaluationOut, SessionError> {
  state
    .with_session(session_id, |s| -> Result<EvaluationOut, SessionError> {
      let evaluations = s.submit_answers(answers)?;
      let set = s.challenge().ok_or(SessionError::NoChallenge)?;
      Ok(EvaluationOut {
        results: to_results_out(set, answers, evaluations),
        tip: GENERAL_TIP.to_string(),
      })
    })
    .await?
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assist::JUSTIFICATION_NOT_FOUND;
  use crate::config::Prompts;
  use crate::domain::{Tier, CHALLENGE_SIZE};

  const DOC: &str = "\
Rainfall declined by a third because a persistent high pressure system blocked incoming storms. \
Farmers responded by switching to drought tolerant crops and shortening their planting seasons. \
Groundwater levels, however, continued falling while demand from nearby cities kept increasing. \
Regional planners now treat water storage as the central issue for the next two decades. \
New reservoirs are proposed, but their ecological costs remain poorly understood by officials.";

  async fn loaded() -> (AppState, String) {
    let state = AppState::with_parts(Prompts::default(), None);
    let id = state.create_session().await;
    upload_document(&state, &id, "report.txt", "text/plain", DOC.as_bytes())
      .await
      .expect("upload");
    (state, id)
  }

  #[tokio::test]
  async fn full_challenge_round_trip() {
    let (state, id) = loaded().await;
    let challenge = generate_challenge(&state, &id).await.expect("challenge");
    assert_eq!(challenge.questions.len(), CHALLENGE_SIZE);
    assert_eq!(current_challenge(&state, &id).await.expect("current").id, challenge.id);

    let answers = vec!["".to_string(), "because therefore".to_string()];
    let out = submit_answers(&state, &id, &answers).await.expect("evaluated");
    assert_eq!(out.results.len(), CHALLENGE_SIZE);
    assert_eq!(out.results[0].evaluation.tier, Tier::None);
    assert_eq!(out.results[1].answer, "because therefore");
    assert_eq!(out.results[2].answer, "");
    assert_eq!(out.tip, GENERAL_TIP);

    regenerate_challenge(&state, &id).await.expect("cleared");
    assert!(matches!(current_challenge(&state, &id).await, Err(SessionError::NoChallenge)));
  }

  #[tokio::test]
  async fn failed_upload_leaves_engine_idle() {
    let (state, id) = loaded().await;
    let err = upload_document(&state, &id, "scan.png", "image/png", b"\x89PNG").await.unwrap_err();
    assert!(matches!(err, SessionError::Extraction(_)));
    assert!(matches!(generate_challenge(&state, &id).await, Err(SessionError::NoDocument)));
  }

  #[tokio::test]
  async fn upload_reports_preview() {
    let state = AppState::with_parts(Prompts::default(), None);
    let id = state.create_session().await;
    let long = "x".repeat(800);
    let doc = upload_document(&state, &id, "long.txt", "text/plain", long.as_bytes()).await.expect("upload");
    assert_eq!(doc.chars, 800);
    assert_eq!(doc.preview.len(), 500);
  }

  #[tokio::test]
  async fn ask_uses_local_fallback_with_justification() {
    let (state, id) = loaded().await;
    let qa = ask(&state, &id, "What did farmers switch to?").await.expect("answer");
    assert!(qa.answer.starts_with("Farmers responded"));
    assert_eq!(qa.justification, qa.answer);
    assert_ne!(qa.justification, JUSTIFICATION_NOT_FOUND);

    assert!(matches!(ask(&state, &id, "   ").await, Err(ApiError::BadRequest(_))));
  }

  #[tokio::test]
  async fn summary_without_document_is_an_error() {
    let state = AppState::with_parts(Prompts::default(), None);
    let id = state.create_session().await;
    assert!(matches!(summarize(&state, &id).await, Err(SessionError::NoDocument)));
  }

  #[tokio::test]
  async fn local_summary_is_capped() {
    let (state, id) = loaded().await;
    let summary = summarize(&state, &id).await.expect("summary");
    assert!(!summary.is_empty());
    assert!(summary.split_whitespace().count() <= 151);
  }
}
