//! Summary and ask-anything behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Chunked auto-summary (remote summarizer, extractive local fallback)
//!   - Extractive question answering with a justification sentence
//!
//! Remote collaborator failures are logged and replaced by the local heuristics.

use std::collections::HashSet;

use tracing::{debug, error, instrument};

use crate::state::AppState;
use crate::util::{cap_words, char_prefix, char_windows};

/// Characters per summarization window.
const SUMMARY_CHUNK_CHARS: usize = 1000;
/// Only the leading windows are summarized.
const SUMMARY_MAX_CHUNKS: usize = 3;
const SUMMARY_MIN_WORDS: usize = 50;
const SUMMARY_MAX_WORDS: usize = 150;

/// Characters of the document used as QA context.
const QA_CONTEXT_CHARS: usize = 2000;
/// Characters returned as an upload preview.
pub const PREVIEW_CHARS: usize = 500;

pub const JUSTIFICATION_NOT_FOUND: &str = "(Reference not found in preview)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QaAnswer {
  pub answer: String,
  pub justification: String,
}

pub fn preview(text: &str) -> &str {
  char_prefix(text, PREVIEW_CHARS)
}

/// Summarize the first windows of `text` and cap the joined result.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn summarize_document(state: &AppState, text: &str) -> String {
  let mut parts: Vec<String> = Vec::new();
  for chunk in char_windows(text, SUMMARY_CHUNK_CHARS).into_iter().take(SUMMARY_MAX_CHUNKS) {
    let part = match &state.openai {
      Some(oa) => match oa.summarize(&state.prompts, chunk, SUMMARY_MIN_WORDS, SUMMARY_MAX_WORDS).await {
        Ok(s) => s,
        Err(e) => {
          error!(target: "docassist", error = %e, "OpenAI summarize failed; using extractive fallback.");
          summarize_local(chunk, SUMMARY_MIN_WORDS, SUMMARY_MAX_WORDS)
        }
      },
      None => summarize_local(chunk, SUMMARY_MIN_WORDS, SUMMARY_MAX_WORDS),
    };
    parts.push(part);
  }
  cap_words(&parts.join(" "), SUMMARY_MAX_WORDS)
}

/// Answer `question` from the leading context of `text`, with a verbatim justification sentence.
#[instrument(level = "info", skip(state, text, question), fields(text_len = text.len(), question_len = question.len()))]
pub async fn ask_question(state: &AppState, text: &str, question: &str) -> QaAnswer {
  let context = char_prefix(text, QA_CONTEXT_CHARS);
  let answer = match &state.openai {
    Some(oa) => match oa.answer(&state.prompts, question, context).await {
      Ok(a) => a,
      Err(e) => {
        error!(target: "docassist", error = %e, "OpenAI answer failed; using overlap fallback.");
        answer_local(question, context)
      }
    },
    None => answer_local(question, context),
  };
  let justification = find_justification(context, &answer);
  debug!(target: "docassist", answer_len = answer.len(), found = justification != JUSTIFICATION_NOT_FOUND, "Question answered");
  QaAnswer { answer, justification }
}

/// First context sentence containing `answer` verbatim, or the not-found placeholder.
pub fn find_justification(context: &str, answer: &str) -> String {
  if answer.is_empty() {
    return JUSTIFICATION_NOT_FOUND.to_string();
  }
  split_sentences(context)
    .into_iter()
    .find(|s| s.contains(answer))
    .map(str::to_string)
    .unwrap_or_else(|| JUSTIFICATION_NOT_FOUND.to_string())
}

/// Sentences end at '.', '!' or '?' followed by whitespace or end of text.
/// Terminal punctuation stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
  let mut out = Vec::new();
  let mut start = 0;
  let mut chars = text.char_indices().peekable();
  while let Some((i, ch)) = chars.next() {
    if matches!(ch, '.' | '!' | '?') {
      let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
      if at_boundary {
        let end = i + ch.len_utf8();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
          out.push(sentence);
        }
        start = end;
      }
    }
  }
  let tail = text[start..].trim();
  if !tail.is_empty() {
    out.push(tail);
  }
  out
}

// -------- Local fallbacks --------

/// Leading sentences until `min_words` is reached, capped at `max_words`.
fn summarize_local(chunk: &str, min_words: usize, max_words: usize) -> String {
  let mut picked: Vec<&str> = Vec::new();
  let mut words = 0;
  for sentence in split_sentences(chunk) {
    if words >= min_words {
      break;
    }
    words += sentence.split_whitespace().count();
    picked.push(sentence);
  }
  let joined = picked.join(" ");
  let capped: Vec<&str> = joined.split_whitespace().take(max_words).collect();
  capped.join(" ")
}

/// Sentence with the most lowercase word overlap with the question (earliest wins ties).
fn answer_local(question: &str, context: &str) -> String {
  let q_lower = question.to_lowercase();
  let q_words: HashSet<&str> = q_lower
    .split_whitespace()
    .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
    .filter(|w| !w.is_empty())
    .collect();

  let sentences = split_sentences(context);
  let mut best: Option<(&str, usize)> = None;
  for &sentence in &sentences {
    let s_lower = sentence.to_lowercase();
    let overlap = s_lower
      .split_whitespace()
      .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
      .filter(|w| q_words.contains(w))
      .collect::<HashSet<_>>()
      .len();
    if best.map_or(true, |(_, n)| overlap > n) {
      best = Some((sentence, overlap));
    }
  }
  best.map(|(s, _)| s.to_string()).unwrap_or_default()
}
