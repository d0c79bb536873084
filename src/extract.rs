//! Text extraction for uploaded documents (plain text or PDF).

use tracing::{debug, instrument};

use crate::error::ExtractionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FileKind {
  Pdf,
  PlainText,
}

fn detect(file_name: &str, content_type: &str) -> Option<FileKind> {
  let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
  let name = file_name.to_ascii_lowercase();
  if mime == "application/pdf" || name.ends_with(".pdf") {
    Some(FileKind::Pdf)
  } else if mime == "text/plain" || name.ends_with(".txt") {
    Some(FileKind::PlainText)
  } else {
    None
  }
}

/// Decode an uploaded file into text. Fails on unsupported types, bad encodings or empty text.
#[instrument(level = "info", skip(bytes), fields(bytes = bytes.len()))]
pub fn extract(file_name: &str, content_type: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
  let kind = detect(file_name, content_type).ok_or_else(|| ExtractionError::Unsupported {
    content_type: if content_type.is_empty() { file_name.to_string() } else { content_type.to_string() },
  })?;

  let text = match kind {
    FileKind::PlainText => String::from_utf8(bytes.to_vec())?,
    FileKind::Pdf => pdf_text(bytes)?,
  };

  if text.trim().is_empty() {
    return Err(ExtractionError::NoText);
  }
  debug!(target: "docassist", ?kind, chars = text.chars().count(), "Document text extracted");
  Ok(text)
}

/// Concatenate page text in page order.
fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
  let doc = lopdf::Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;
  let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
  if pages.is_empty() {
    return Err(ExtractionError::NoText);
  }
  doc.extract_text(&pages).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
