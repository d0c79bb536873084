//! WebSocket upgrade + message loop. Each connection owns one session for its lifetime.
//! Each client message is parsed as JSON and forwarded to core logic; we reply with a
//! single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, error, info, instrument};

use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage, GENERAL_TIP};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "docassist", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  if let Err(e) = socket.send(Message::Text(out)).await {
    error!(target: "docassist", error = %e, "WS send error");
    return false;
  }
  true
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let session_id = state.create_session().await;
  info!(target: "docassist", session = %session_id, "WebSocket connected");

  if send(&mut socket, &ServerWsMessage::Session { session_id: session_id.clone() }).await {
    while let Some(Ok(msg)) = socket.recv().await {
      match msg {
        Message::Text(txt) => {
          // Parse, dispatch, serialize response.
          let reply = match serde_json::from_str::<ClientWsMessage>(&txt) {
            Ok(incoming) => {
              debug!(target: "docassist", session = %session_id, "WS received: {:?}", message_kind(&incoming));
              handle_client_ws(incoming, &state, &session_id).await
            }
            Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
          };
          if !send(&mut socket, &reply).await {
            break;
          }
        }
        Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
        Message::Close(_) => break,
        _ => {}
      }
    }
  }

  state.drop_session(&session_id).await;
  info!(target: "docassist", session = %session_id, "WebSocket disconnected");
}

/// Message name for logs; payloads carry document bytes and answers.
fn message_kind(msg: &ClientWsMessage) -> &'static str {
  match msg {
    ClientWsMessage::Ping => "ping",
    ClientWsMessage::UploadDocument { .. } => "upload_document",
    ClientWsMessage::Summarize => "summarize",
    ClientWsMessage::Ask { .. } => "ask",
    ClientWsMessage::GenerateChallenge => "generate_challenge",
    ClientWsMessage::RegenerateChallenge => "regenerate_challenge",
    ClientWsMessage::SubmitAnswers { .. } => "submit_answers",
  }
}

fn error_msg(e: impl std::fmt::Display) -> ServerWsMessage {
  ServerWsMessage::Error { message: e.to_string() }
}

#[instrument(level = "info", skip(msg, state), fields(kind = message_kind(&msg)))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState, session_id: &str) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::UploadDocument { file_name, mime, content_base64 } => {
      let bytes = match STANDARD.decode(content_base64.trim()) {
        Ok(b) => b,
        Err(e) => return error_msg(format!("Invalid base64 content: {}", e)),
      };
      match logic::upload_document(state, session_id, &file_name, &mime, &bytes).await {
        Ok(document) => ServerWsMessage::Document { document },
        Err(e) => error_msg(e),
      }
    }

    ClientWsMessage::Summarize => match logic::summarize(state, session_id).await {
      Ok(summary) => ServerWsMessage::Summary { summary },
      Err(e) => error_msg(e),
    },

    ClientWsMessage::Ask { question } => match logic::ask(state, session_id, &question).await {
      Ok(qa) => ServerWsMessage::Answer { answer: qa.answer, justification: qa.justification },
      Err(e) => error_msg(e),
    },

    ClientWsMessage::GenerateChallenge => match logic::generate_challenge(state, session_id).await {
      Ok(challenge) => {
        info!(target: "challenge", session = %session_id, challenge = %challenge.id, "WS challenge generated");
        ServerWsMessage::Challenge { challenge }
      }
      Err(e) => error_msg(e),
    },

    ClientWsMessage::RegenerateChallenge => match logic::regenerate_challenge(state, session_id).await {
      Ok(()) => ServerWsMessage::ChallengeCleared,
      Err(e) => error_msg(e),
    },

    ClientWsMessage::SubmitAnswers { answers } => match logic::submit_answers(state, session_id, &answers).await {
      Ok(out) => ServerWsMessage::Evaluation { results: out.results, tip: GENERAL_TIP.to_string() },
      Err(e) => error_msg(e),
    },
  }
}
