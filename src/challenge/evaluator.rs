//! Rubric scoring of free-text answers: logical connectors, content overlap and length.

use std::collections::HashSet;

use crate::domain::{Evaluation, Tier};

pub const LOGIC_CONNECTORS: [&str; 25] = [
  "because", "therefore", "consequently", "as a result", "due to",
  "leads to", "implies", "suggests", "indicates", "shows that",
  "logically", "reasoning", "analysis", "conclusion", "inference",
  "relationship", "connection", "cause", "effect", "impact",
  "compare", "contrast", "however", "while", "whereas",
];

const MIN_CONNECTORS: usize = 2;
const MIN_OVERLAP_EXCLUSIVE: usize = 3;
const MIN_WORDS_EXCLUSIVE: usize = 15;

pub const NO_ANSWER_MESSAGE: &str = "No answer provided.";
pub const CONNECTOR_TIP: &str =
  "Try using logical connectors like 'because', 'therefore', 'consequently' to strengthen your reasoning.";

/// Raw signals behind a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signals {
  pub connectors: usize,
  pub overlap: usize,
  pub word_count: usize,
}

impl Signals {
  pub fn measure(answer: &str, reference: &str) -> Self {
    let lower = answer.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let connectors = words.iter().filter(|w| LOGIC_CONNECTORS.contains(*w)).count();

    let reference_lower = reference.to_lowercase();
    let reference_words: HashSet<&str> = reference_lower.split_whitespace().collect();
    let answer_words: HashSet<&str> = words.iter().copied().collect();
    let overlap = answer_words.intersection(&reference_words).count();

    Self { connectors, overlap, word_count: words.len() }
  }

  pub fn score(&self) -> u8 {
    let mut score = 0;
    if self.connectors >= MIN_CONNECTORS {
      score += 2;
    }
    if self.overlap > MIN_OVERLAP_EXCLUSIVE {
      score += 2;
    }
    if self.word_count > MIN_WORDS_EXCLUSIVE {
      score += 1;
    }
    score
  }
}

pub fn tier_for(score: u8) -> Tier {
  match score {
    4.. => Tier::Excellent,
    2..=3 => Tier::Good,
    1 => Tier::Partial,
    0 => Tier::Basic,
  }
}

fn verdict(tier: Tier) -> &'static str {
  match tier {
    Tier::Excellent => "Excellent logic-based answer! Your response demonstrates strong analytical thinking and logical reasoning.",
    Tier::Good => "Good logic-based answer! Your response shows logical reasoning and aligns with the document content.",
    Tier::Partial => "Partial logic-based answer. Consider including more logical reasoning and analytical thinking.",
    Tier::Basic => "Basic answer. Try to include logical reasoning and analytical connections.",
    Tier::None => NO_ANSWER_MESSAGE,
  }
}

/// Score `answer` against `reference` (the rubric text of a challenge item).
/// Total and deterministic: the same inputs always give the same result.
pub fn evaluate(answer: &str, reference: &str) -> Evaluation {
  if answer.trim().is_empty() {
    return Evaluation {
      tier: Tier::None,
      score: None,
      message: NO_ANSWER_MESSAGE.to_string(),
      tip: None,
      reference: reference.to_string(),
    };
  }

  let signals = Signals::measure(answer, reference);
  let score = signals.score();
  let tier = tier_for(score);
  Evaluation {
    tier,
    score: Some(score),
    message: verdict(tier).to_string(),
    tip: (signals.connectors < MIN_CONNECTORS).then(|| CONNECTOR_TIP.to_string()),
    reference: reference.to_string(),
  }
}
