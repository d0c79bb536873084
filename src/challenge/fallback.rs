//! Generic analytical prompts used when the document cannot fill every slot.

use rand::{seq::SliceRandom, Rng};

use crate::domain::ChallengeItem;

pub const FALLBACK_QUESTIONS: [&str; 10] = [
  "What is the logical structure of the main argument presented in this document?",
  "How do the different sections of this document logically connect to support the central thesis?",
  "What logical assumptions underlie the conclusions drawn in this document?",
  "How does the methodology described logically lead to the findings presented?",
  "What logical gaps or limitations exist in the reasoning presented in this document?",
  "How do the evidence and conclusions logically support each other in this document?",
  "What logical framework guides the organization of ideas in this document?",
  "How does the logical flow of the document contribute to its persuasiveness?",
  "What logical counterarguments could be raised against the main points in this document?",
  "How does the logical coherence of the document affect its overall effectiveness?",
];

/// Draw `count` distinct prompts from a shuffled copy of the bank.
/// Never returns more than the bank holds.
pub fn fill<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ChallengeItem> {
  let mut pool = FALLBACK_QUESTIONS;
  pool.shuffle(rng);
  pool.iter().take(count).map(|q| ChallengeItem::fallback(q)).collect()
}
