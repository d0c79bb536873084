//! Archetype assignment for question slots.

use rand::{seq::SliceRandom, Rng};

use crate::domain::Archetype;

/// Shuffle the taxonomy and assign it round-robin to `n` slots.
/// The first `Archetype::ALL.len()` slots never repeat an archetype.
pub fn select_types<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Archetype> {
  let mut types = Archetype::ALL;
  types.shuffle(rng);
  (0..n).map(|i| types[i % types.len()]).collect()
}
