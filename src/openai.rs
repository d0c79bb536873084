//! Minimal OpenAI client backing the summarization and extractive-QA collaborators.
//!
//! We only call chat.completions and request either plain text or a strict JSON object.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key or document text.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  async fn chat(&self, req: &ChatCompletionRequest) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let res = self.client.post(&url)
      .header(USER_AGENT, "docassist-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    Ok(body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default())
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_plain(&self, model: &str, system: &str, user: &str, temperature: f32) -> Result<String, String> {
    let req = ChatCompletionRequest::new(model, system, user, temperature, None);
    Ok(self.chat(&req).await?.trim().to_string())
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let req = ChatCompletionRequest::new(
      model,
      system,
      user,
      temperature,
      Some(ResponseFormat { r#type: "json_object".into() }),
    );
    let text = self.chat(&req).await?;
    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  // --- High-level helpers (collaborator contracts) ---

  /// Summarize one chunk of a document to roughly `min_words..=max_words` words.
  #[instrument(level = "info", skip(self, prompts, chunk), fields(chunk_len = chunk.len(), model = %self.fast_model))]
  pub async fn summarize(
    &self,
    prompts: &Prompts,
    chunk: &str,
    min_words: usize,
    max_words: usize,
  ) -> Result<String, String> {
    let (min_s, max_s) = (min_words.to_string(), max_words.to_string());
    let user = fill_template(
      &prompts.summarize_user_template,
      &[("min_words", &min_s), ("max_words", &max_s), ("text", chunk)],
    );
    let start = Instant::now();
    let result = self.chat_plain(&self.fast_model, &prompts.summarize_system, &user, 0.0).await;
    match &result {
      Ok(s) => info!(elapsed = ?start.elapsed(), summary_len = s.len(), "Summary chunk received"),
      Err(e) => error!(elapsed = ?start.elapsed(), error = %e, "Summary chunk failed"),
    }
    result
  }

  /// Extractive QA: returns an answer span that should appear verbatim in `context`.
  #[instrument(level = "info", skip(self, prompts, question, context), fields(question_len = question.len(), context_len = context.len(), model = %self.strong_model))]
  pub async fn answer(&self, prompts: &Prompts, question: &str, context: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct Span { answer: String }

    let user = fill_template(&prompts.qa_user_template, &[("context", context), ("question", question)]);
    let span: Span = self.chat_json(&self.strong_model, &prompts.qa_system, &user, 0.0).await?;
    Ok(span.answer.trim().to_string())
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
  fn new(model: &str, system: &str, user: &str, temperature: f32, response_format: Option<ResponseFormat>) -> Self {
    Self {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format,
    }
  }
}

#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
