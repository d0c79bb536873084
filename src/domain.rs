//! Domain models: uploaded documents, question archetypes, challenge items/sets and evaluation results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Number of items in every challenge set.
pub const CHALLENGE_SIZE: usize = 3;

/// Prefix prepended to a document sentence to form the text answers are compared against.
pub const REFERENCE_PREFIX: &str = "Analysis should focus on: ";

/// Reference text attached to fallback items (no document excerpt available).
pub const FALLBACK_REFERENCE: &str =
  "(Answer should analyze the logical structure and reasoning in the document)";

/// Extracted document text. Immutable for the lifetime of one upload.
#[derive(Clone, Debug)]
pub struct Document {
  pub file_name: String,
  pub text: Arc<str>,
}

impl Document {
  pub fn new(file_name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
    Self { file_name: file_name.into(), text: text.into() }
  }

  pub fn char_count(&self) -> usize {
    self.text.chars().count()
  }
}

/// Analytical question categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
  CauseEffect,
  Comparison,
  Inference,
  Analysis,
  Evaluation,
  Synthesis,
}

impl Archetype {
  pub const ALL: [Archetype; 6] = [
    Archetype::CauseEffect,
    Archetype::Comparison,
    Archetype::Inference,
    Archetype::Analysis,
    Archetype::Evaluation,
    Archetype::Synthesis,
  ];
}

/// Where a challenge item came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
  /// Synthesized from a document sentence with the given archetype.
  Document { archetype: Archetype },
  /// Taken from the generic fallback bank.
  Fallback,
}

/// A generated question plus the grounding excerpt used for self-evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChallengeItem {
  pub question: String,
  /// Originating sentence (untruncated), or the fallback placeholder.
  pub reference_snippet: String,
  pub source: ItemSource,
}

impl ChallengeItem {
  pub fn from_sentence(question: String, sentence: &str, archetype: Archetype) -> Self {
    Self {
      question,
      reference_snippet: sentence.to_string(),
      source: ItemSource::Document { archetype },
    }
  }

  pub fn fallback(question: &str) -> Self {
    Self {
      question: question.to_string(),
      reference_snippet: FALLBACK_REFERENCE.to_string(),
      source: ItemSource::Fallback,
    }
  }

  /// Text an answer is scored against and shown back as reference.
  pub fn rubric_text(&self) -> String {
    match self.source {
      ItemSource::Document { .. } => format!("{}{}", REFERENCE_PREFIX, self.reference_snippet),
      ItemSource::Fallback => self.reference_snippet.clone(),
    }
  }

  pub fn is_fallback(&self) -> bool {
    matches!(self.source, ItemSource::Fallback)
  }
}

/// Exactly `CHALLENGE_SIZE` items for one quiz round.
#[derive(Clone, Debug, Serialize)]
pub struct ChallengeSet {
  pub id: String,
  items: Vec<ChallengeItem>,
}

impl ChallengeSet {
  /// Only the challenge pipeline builds sets; it guarantees the item count.
  pub(crate) fn new(id: String, items: Vec<ChallengeItem>) -> Self {
    debug_assert_eq!(items.len(), CHALLENGE_SIZE);
    Self { id, items }
  }

  pub fn items(&self) -> &[ChallengeItem] {
    &self.items
  }
}

/// Qualitative verdict for one answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  None,
  Basic,
  Partial,
  Good,
  Excellent,
}

/// Result of scoring one answer. Derived on every submission, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Evaluation {
  pub tier: Tier,
  /// Internal 0..=5 score; absent for empty answers.
  #[serde(skip)]
  pub score: Option<u8>,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tip: Option<String>,
  pub reference: String,
}
