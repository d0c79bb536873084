//! Question synthesis: archetype + slot templates, with rhetorical cue detection.
//!
//! Each slot has its own phrasing per archetype so the three questions of a set read
//! differently even when two archetypes are close. The first slot additionally
//! switches phrasing when the sentence carries cause/effect or comparison cues.

use crate::domain::{Archetype, ChallengeItem};
use crate::util::{char_prefix, fill_template};

/// Characters of the sentence embedded into the question text.
const EXCERPT_CHARS: usize = 100;

/// Words longer than this are treated as key terms for comparison questions.
const KEY_TERM_MIN_CHARS: usize = 4;
const MAX_KEY_TERMS: usize = 2;

pub const CAUSE_CUES: [&str; 7] = [
  "because", "due to", "as a result", "therefore", "consequently", "leads to", "causes",
];
pub const EFFECT_CUES: [&str; 5] = ["result", "outcome", "impact", "effect", "consequence"];
pub const COMPARISON_CUES: [&str; 8] = [
  "however", "but", "while", "whereas", "compared to", "unlike", "similar to", "different from",
];

/// Position of a question within a challenge set.
/// Later slots accept shorter sentences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
  First,
  Second,
  Third,
}

impl Slot {
  pub const ALL: [Slot; 3] = [Slot::First, Slot::Second, Slot::Third];

  /// A sentence needs strictly more words than this to fill the slot.
  pub fn min_words(self) -> usize {
    match self {
      Slot::First => 8,
      Slot::Second => 6,
      Slot::Third => 5,
    }
  }
}

/// Build a challenge item for `sentence`, or None when it is too short for `slot`.
pub fn synthesize(sentence: &str, archetype: Archetype, slot: Slot) -> Option<ChallengeItem> {
  if sentence.split_whitespace().count() <= slot.min_words() {
    return None;
  }
  let question = render_question(sentence, archetype, slot);
  Some(ChallengeItem::from_sentence(question, sentence, archetype))
}

/// Render the question text without applying the word-count gate.
pub fn render_question(sentence: &str, archetype: Archetype, slot: Slot) -> String {
  let lower = sentence.to_lowercase();

  // Cue-free comparisons ask about key terms, even when none qualify.
  if slot == Slot::First && archetype == Archetype::Comparison && !has_any_cue(&lower, &COMPARISON_CUES) {
    return fill_template(
      "How do the concepts of '{terms}' relate to each other logically in the context of this document?",
      &[("terms", &key_terms(sentence).join(" and "))],
    );
  }

  let excerpt = char_prefix(sentence, EXCERPT_CHARS);
  fill_template(template_for(archetype, slot, &lower), &[("excerpt", excerpt)])
}

fn template_for(archetype: Archetype, slot: Slot, lower: &str) -> &'static str {
  use Archetype::*;
  match (slot, archetype) {
    (Slot::First, CauseEffect) => {
      if has_any_cue(lower, &CAUSE_CUES) || has_any_cue(lower, &EFFECT_CUES) {
        "Based on the document, what is the logical relationship between the main concepts mentioned in this statement: '{excerpt}...'?"
      } else {
        "What logical cause-and-effect relationship can be identified in this statement: '{excerpt}...'?"
      }
    }
    // Reached only with a comparison cue present.
    (Slot::First, Comparison) => "What logical comparison or contrast is being made in this statement: '{excerpt}...'?",
    (Slot::First, Inference) => "What logical inference can be drawn from this statement: '{excerpt}...'?",
    (Slot::First, Analysis) => "How does this statement contribute to the overall logical structure of the document: '{excerpt}...'?",
    (Slot::First, Evaluation) => "What logical strengths or weaknesses can be identified in this statement: '{excerpt}...'?",
    (Slot::First, Synthesis) => "How does this statement logically connect to the broader themes in the document: '{excerpt}...'?",

    (Slot::Second, CauseEffect) => "What logical consequences or implications can be derived from this statement: '{excerpt}...'?",
    (Slot::Second, Comparison) => "What logical similarities or differences are implied in this statement: '{excerpt}...'?",
    (Slot::Second, Inference) => "Based on this statement, what logical conclusion can be reached: '{excerpt}...'?",
    (Slot::Second, Analysis) => "What logical reasoning is demonstrated in this statement: '{excerpt}...'?",
    (Slot::Second, Evaluation) => "What logical criteria or standards are suggested by this statement: '{excerpt}...'?",
    (Slot::Second, Synthesis) => "How does this statement logically integrate with the document's main argument: '{excerpt}...'?",

    (Slot::Third, CauseEffect) => "What logical chain of reasoning connects this statement to the document's conclusions: '{excerpt}...'?",
    (Slot::Third, Comparison) => "What logical framework is established by this statement in relation to other parts of the document: '{excerpt}...'?",
    (Slot::Third, Inference) => "What logical implications can be extrapolated from this statement: '{excerpt}...'?",
    (Slot::Third, Analysis) => "How does this statement logically support or challenge the document's main thesis: '{excerpt}...'?",
    (Slot::Third, Evaluation) => "What logical validity or reliability can be assessed from this statement: '{excerpt}...'?",
    (Slot::Third, Synthesis) => "How does this statement logically contribute to the overall coherence of the document: '{excerpt}...'?",
  }
}

/// Substring membership on an already lowercased sentence.
fn has_any_cue(lower: &str, cues: &[&str]) -> bool {
  cues.iter().any(|cue| lower.contains(cue))
}

fn key_terms(sentence: &str) -> Vec<&str> {
  sentence
    .split_whitespace()
    .filter(|w| w.chars().count() > KEY_TERM_MIN_CHARS)
    .take(MAX_KEY_TERMS)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ItemSource;

  const CAUSAL: &str =
    "The experiment failed because the temperature was not controlled properly during testing phases";

  #[test]
  fn cause_effect_with_cue_uses_cue_aware_phrasing() {
    let item = synthesize(CAUSAL, Archetype::CauseEffect, Slot::First).expect("long enough");
    assert!(
      item.question.starts_with("Based on the document, what is the logical relationship"),
      "got: {}",
      item.question
    );
    assert!(!item.question.contains("cause-and-effect relationship can be identified"));
    assert_eq!(item.reference_snippet, CAUSAL);
    assert_eq!(item.source, ItemSource::Document { archetype: Archetype::CauseEffect });
  }

  #[test]
  fn cause_effect_without_cue_uses_generic_phrasing() {
    let s = "Researchers collected samples from twelve distinct coastal regions over two years";
    let q = render_question(s, Archetype::CauseEffect, Slot::First);
    assert!(q.starts_with("What logical cause-and-effect relationship can be identified"));
  }

  #[test]
  fn comparison_without_cue_asks_about_key_terms() {
    let s = "Photosynthesis converts light energy into chemical energy for plants";
    let q = render_question(s, Archetype::Comparison, Slot::First);
    assert_eq!(
      q,
      "How do the concepts of 'Photosynthesis and converts' relate to each other logically in the context of this document?"
    );
  }

  #[test]
  fn comparison_without_key_terms_still_asks_about_concepts() {
    let s = "It is a big day for all of us and we go on";
    let item = synthesize(s, Archetype::Comparison, Slot::First).expect("long enough");
    assert_eq!(
      item.question,
      "How do the concepts of '' relate to each other logically in the context of this document?"
    );
  }

  #[test]
  fn effect_cue_alone_triggers_cue_aware_phrasing() {
    let s = "The outcome of the vote surprised nearly every analyst in the region";
    let lower = s.to_lowercase();
    assert!(!has_any_cue(&lower, &CAUSE_CUES));
    let q = render_question(s, Archetype::CauseEffect, Slot::First);
    assert!(
      q.starts_with("Based on the document, what is the logical relationship"),
      "got: {q}"
    );
  }

  #[test]
  fn comparison_with_cue_embeds_excerpt() {
    let s = "Urban areas grew quickly, whereas rural regions lost a large share of residents";
    let q = render_question(s, Archetype::Comparison, Slot::First);
    assert!(q.starts_with("What logical comparison or contrast is being made"));
    assert!(q.contains(s));
  }

  #[test]
  fn cue_match_is_substring_based() {
    // "button" contains "but"
    let s = "Press the button twice to reset the counter in the device";
    let q = render_question(s, Archetype::Comparison, Slot::First);
    assert!(q.starts_with("What logical comparison or contrast is being made"));
  }

  #[test]
  fn excerpt_is_truncated_to_one_hundred_chars() {
    let s = "word ".repeat(40);
    let s = s.trim();
    let q = render_question(s, Archetype::Inference, Slot::Second);
    let excerpt = char_prefix(s, 100);
    assert!(q.contains(&format!("'{excerpt}...'")));
    assert!(!q.contains(s));
  }

  #[test]
  fn each_slot_has_distinct_phrasing() {
    let s = "The committee reviewed several proposals before selecting the final design";
    for archetype in Archetype::ALL {
      let a = render_question(s, archetype, Slot::First);
      let b = render_question(s, archetype, Slot::Second);
      let c = render_question(s, archetype, Slot::Third);
      assert_ne!(b, c, "{archetype:?}");
      assert_ne!(a, c, "{archetype:?}");
    }
  }

  #[test]
  fn word_thresholds_relax_per_slot() {
    // seven words
    let s = "Markets reacted sharply to unexpected policy changes";
    assert_eq!(s.split_whitespace().count(), 7);
    assert!(synthesize(s, Archetype::Analysis, Slot::First).is_none());
    assert!(synthesize(s, Archetype::Analysis, Slot::Second).is_some());
    assert!(synthesize(s, Archetype::Analysis, Slot::Third).is_some());

    // six words
    let s = "Markets reacted sharply to unexpected changes";
    assert!(synthesize(s, Archetype::Analysis, Slot::Second).is_none());
    assert!(synthesize(s, Archetype::Analysis, Slot::Third).is_some());

    // five words
    let s = "Markets reacted sharply to changes";
    assert!(synthesize(s, Archetype::Analysis, Slot::Third).is_none());
  }
}
