//! Challenge engine: sentence selection, question synthesis and answer scoring.
//!
//! Flow:
//! 1) `segmenter` picks substantial sentences from the raw document text.
//! 2) Sentences are shuffled and `selector` assigns archetypes to the three slots.
//! 3) `synthesizer` renders a question per slot when the sentence is long enough.
//! 4) `fallback` pads the set with generic prompts until it holds exactly three items.
//! 5) `evaluator` scores submitted answers against each item's rubric text.

pub mod evaluator;
pub mod fallback;
pub mod segmenter;
pub mod selector;
pub mod synthesizer;

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{ChallengeItem, ChallengeSet, CHALLENGE_SIZE};
use synthesizer::Slot;

/// Build a fresh challenge set for `text`. Always returns exactly `CHALLENGE_SIZE` items.
#[instrument(level = "info", skip(rng, text), fields(text_len = text.len()))]
pub fn generate<R: Rng + ?Sized>(rng: &mut R, text: &str) -> ChallengeSet {
  let mut sentences = segmenter::segment(text);
  sentences.shuffle(rng);
  let types = selector::select_types(rng, CHALLENGE_SIZE);

  // Too little material: every slot comes from the fallback bank.
  let synthesized: Vec<ChallengeItem> = if sentences.len() >= CHALLENGE_SIZE {
    Slot::ALL
      .iter()
      .zip(sentences.iter())
      .zip(types.iter())
      .filter_map(|((slot, sentence), archetype)| synthesizer::synthesize(sentence, *archetype, *slot))
      .collect()
  } else {
    debug!(target: "challenge", substantial = sentences.len(), "Insufficient material; using fallback bank only");
    Vec::new()
  };

  let from_document = synthesized.len();
  let missing = CHALLENGE_SIZE - from_document;
  let items: Vec<ChallengeItem> = synthesized
    .into_iter()
    .chain(fallback::fill(rng, missing))
    .take(CHALLENGE_SIZE)
    .collect();

  let set = ChallengeSet::new(Uuid::new_v4().to_string(), items);
  info!(
    target: "challenge",
    id = %set.id,
    substantial = sentences.len(),
    from_document,
    from_fallback = missing,
    archetypes = ?types,
    "Challenge set generated"
  );
  set
}
