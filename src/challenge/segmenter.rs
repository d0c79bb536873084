//! Naive sentence segmentation for the challenge engine.

/// Only the first raw segments are considered, bounding work on long documents.
const MAX_RAW_SEGMENTS: usize = 30;

/// A trimmed segment must be longer than this (in chars) to be "substantial".
pub const MIN_SENTENCE_CHARS: usize = 30;

/// Split on '.' and keep the substantial, trimmed segments in source order.
pub fn segment(text: &str) -> Vec<String> {
  text
    .split('.')
    .take(MAX_RAW_SEGMENTS)
    .map(str::trim)
    .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_only_substantial_sentences_in_order() {
    let text = "Short one. This sentence is definitely longer than thirty characters.  \
                Tiny. Another sufficiently long sentence appears right here.";
    let out = segment(text);
    assert_eq!(
      out,
      vec![
        "This sentence is definitely longer than thirty characters".to_string(),
        "Another sufficiently long sentence appears right here".to_string(),
      ]
    );
  }

  #[test]
  fn exactly_thirty_chars_is_not_substantial() {
    let thirty = "a".repeat(30);
    let thirty_one = "b".repeat(31);
    let out = segment(&format!("{thirty}. {thirty_one}."));
    assert_eq!(out, vec![thirty_one]);
  }

  #[test]
  fn only_first_thirty_segments_are_considered() {
    let long = "This is a reasonably long sentence number";
    let text: String = (0..40).map(|i| format!("{long} {i}. ")).collect();
    let out = segment(&text);
    assert_eq!(out.len(), 30);
    assert!(out.last().is_some_and(|s| s.ends_with(" 29")));
  }

  #[test]
  fn empty_text_yields_nothing() {
    assert!(segment("").is_empty());
    assert!(segment("   .  . ").is_empty());
  }
}
