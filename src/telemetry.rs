//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL is the EnvFilter directive string, e.g. "debug" or
//!   "info,challenge=debug,docassist=debug,tower_http=info,axum=info".
//! - LOG_FORMAT=json switches to structured JSON lines; anything else is the pretty formatter.
//!
//! Targets in use: `docassist` (server, sessions, collaborators) and `challenge`
//! (question generation and answer evaluation). HTTP request spans come from TraceLayer.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,challenge=debug,docassist=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
  Pretty,
  Json,
}

impl LogFormat {
  fn parse(raw: Option<&str>) -> Self {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
      Some(s) if s == "json" => LogFormat::Json,
      _ => LogFormat::Pretty,
    }
  }
}

pub fn init_tracing() {
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  // The two formatters are different types, so each branch finishes its own init.
  match LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()) {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}
