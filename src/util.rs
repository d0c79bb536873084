//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// First `max` chars of `s`, cut on a char boundary.
pub fn char_prefix(s: &str, max: usize) -> &str {
  match s.char_indices().nth(max) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

/// Split `s` into consecutive windows of at most `size` chars.
pub fn char_windows(s: &str, size: usize) -> Vec<&str> {
  let mut out = Vec::new();
  let mut rest = s;
  while !rest.is_empty() {
    let head = char_prefix(rest, size.max(1));
    out.push(head);
    rest = &rest[head.len()..];
  }
  out
}

/// Keep at most `max` whitespace-separated words, appending "..." when cut.
pub fn cap_words(s: &str, max: usize) -> String {
  let words: Vec<&str> = s.split_whitespace().collect();
  if words.len() > max {
    format!("{}...", words[..max].join(" "))
  } else {
    s.trim().to_string()
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  let head = char_prefix(s, max);
  if head.len() == s.len() { s.to_string() } else { format!("{}… ({} bytes total)", head, s.len()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_all_occurrences() {
    let out = fill_template("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and x then y");
  }

  #[test]
  fn char_prefix_respects_multibyte() {
    assert_eq!(char_prefix("héllo", 2), "hé");
    assert_eq!(char_prefix("abc", 10), "abc");
    assert_eq!(char_prefix("abc", 0), "");
  }

  #[test]
  fn windows_cover_input() {
    let text = "é".repeat(2500);
    let w = char_windows(&text, 1000);
    assert_eq!(w.len(), 3);
    assert_eq!(w[0].chars().count(), 1000);
    assert_eq!(w[2].chars().count(), 500);
    assert!(char_windows("", 1000).is_empty());
  }

  #[test]
  fn cap_words_appends_ellipsis_only_when_cut() {
    assert_eq!(cap_words("one two three", 3), "one two three");
    assert_eq!(cap_words("one two three four", 3), "one two three...");
  }

  #[test]
  fn trunc_for_log_marks_cut() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert!(trunc_for_log("a longer string", 4).starts_with("a lo…"));
  }
}
