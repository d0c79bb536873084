//! DocAssist · Research Document Assistant Backend
//!
//! - Axum HTTP + WebSocket API, one session per client
//! - Upload a PDF/TXT, read an auto summary, ask questions with a justification sentence
//! - "Challenge me": three analytical questions synthesized from the document, scored locally
//! - Optional OpenAI-backed summarizer and extractive QA (via environment variables)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   OPENAI_API_KEY        : enables OpenAI collaborators if present
//!   OPENAI_BASE_URL       : default "https://api.openai.com/v1"
//!   OPENAI_FAST_MODEL     : default "gpt-4o-mini" (summaries)
//!   OPENAI_STRONG_MODEL   : default "gpt-4o" (question answering)
//!   ASSISTANT_CONFIG_PATH : path to TOML config (prompt overrides)
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod assist;
mod challenge;
mod config;
mod domain;
mod error;
mod extract;
mod logic;
mod openai;
mod protocol;
mod routes;
mod session;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (session store, OpenAI client, prompts).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "docassist", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "docassist", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "docassist", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "docassist", "Shutdown signal received");
}
