//! Per-session context: the uploaded document, the active challenge set and a dedicated RNG.
//!
//! Every user action runs against exactly one `Session`; nothing here is shared between sessions.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument, warn};

use crate::challenge;
use crate::challenge::evaluator::evaluate;
use crate::domain::{ChallengeSet, Document, Evaluation};
use crate::error::{ExtractionError, SessionError};

pub struct Session {
  pub id: String,
  document: Option<Document>,
  challenge: Option<ChallengeSet>,
  rng: StdRng,
}

impl Session {
  pub fn new(id: String) -> Self {
    Self::with_rng(id, StdRng::from_entropy())
  }

  pub fn with_rng(id: String, rng: StdRng) -> Self {
    Self { id, document: None, challenge: None, rng }
  }

  pub fn document(&self) -> Option<&Document> {
    self.document.as_ref()
  }

  pub fn challenge(&self) -> Option<&ChallengeSet> {
    self.challenge.as_ref()
  }

  /// Install the result of a text extraction. A failed extraction leaves the
  /// session without a document, so the challenge engine stays idle.
  #[instrument(level = "info", skip(self, extracted), fields(session = %self.id))]
  pub fn load_document(
    &mut self,
    file_name: &str,
    extracted: Result<String, ExtractionError>,
  ) -> Result<&Document, SessionError> {
    self.challenge = None;
    match extracted {
      Ok(text) => {
        let doc = Document::new(file_name, text);
        info!(target: "docassist", session = %self.id, %file_name, chars = doc.char_count(), "Document loaded");
        Ok(self.document.insert(doc))
      }
      Err(e) => {
        self.document = None;
        warn!(target: "docassist", session = %self.id, %file_name, error = %e, "Extraction failed; challenge engine disabled");
        Err(SessionError::Extraction(e))
      }
    }
  }

  /// Build a new challenge set from the current document, replacing any prior set.
  #[instrument(level = "info", skip(self), fields(session = %self.id))]
  pub fn generate_challenge(&mut self) -> Result<&ChallengeSet, SessionError> {
    let doc = self.document.as_ref().ok_or(SessionError::NoDocument)?;
    let set = challenge::generate(&mut self.rng, &doc.text);
    Ok(self.challenge.insert(set))
  }

  /// Drop the active set; the next `generate_challenge` starts a fresh round.
  #[instrument(level = "info", skip(self), fields(session = %self.id))]
  pub fn regenerate_challenge(&mut self) {
    if let Some(prev) = self.challenge.take() {
      info!(target: "challenge", session = %self.id, previous = %prev.id, "Challenge set cleared");
    }
  }

  /// Score answers aligned by position with the active set.
  /// Missing answers count as empty; extra answers are ignored.
  #[instrument(level = "info", skip(self, answers), fields(session = %self.id, answers = answers.len()))]
  pub fn submit_answers(&self, answers: &[String]) -> Result<Vec<Evaluation>, SessionError> {
    let set = self.challenge.as_ref().ok_or(SessionError::NoChallenge)?;
    let results: Vec<Evaluation> = set
      .items()
      .iter()
      .enumerate()
      .map(|(i, item)| {
        let answer = answers.get(i).map(String::as_str).unwrap_or("");
        evaluate(answer, &item.rubric_text())
      })
      .collect();
    info!(
      target: "challenge",
      session = %self.id,
      set = %set.id,
      tiers = ?results.iter().map(|r| r.tier).collect::<Vec<_>>(),
      "Answers evaluated"
    );
    Ok(results)
  }
}
