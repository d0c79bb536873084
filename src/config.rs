//! Loading assistant configuration (collaborator prompts) from TOML.
//!
//! See `AssistantConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AssistantConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the OpenAI client for summarization and extractive QA.
/// Any key left out of the TOML keeps its default.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub summarize_system: String,
  pub summarize_user_template: String,
  pub qa_system: String,
  pub qa_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      summarize_system: "You are a research summarization engine. Output ONLY the summary text, no preamble.".into(),
      summarize_user_template: "Summarize the following passage in {min_words} to {max_words} words. Stay faithful to the text.\n\n{text}".into(),
      qa_system: "You are an extractive question answering engine. Reply as compact JSON.".into(),
      qa_user_template: "Context:\n{context}\n\nQuestion: {question}\n\nReturn JSON {\"answer\": string}. The answer MUST be a short span copied verbatim from the context.".into(),
    }
  }
}

fn parse(s: &str) -> Result<AssistantConfig, toml::de::Error> {
  toml::from_str::<AssistantConfig>(s)
}

/// Attempt to load `AssistantConfig` from ASSISTANT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AssistantConfig> {
  let path = std::env::var("ASSISTANT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse(&s) {
      Ok(cfg) => {
        info!(target: "docassist", %path, "Loaded assistant config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "docassist", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "docassist", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
