//! Answer checking for typed practice answers.
//!
//! Input and accepted variants go through the same normalization:
//! - Unicode NFC (so a decomposed "a" + combining diaeresis matches "ä")
//! - Lowercase
//! - Trim, collapse internal whitespace

use unicode_normalization::UnicodeNormalization;

/// Input that ends a practice session early
pub const QUIT_COMMAND: &str = "quit";

/// Normalize text for comparison
pub fn normalize_answer(input: &str) -> String {
  input
    .nfc()
    .collect::<String>()
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// True if `input` matches any accepted variant
pub fn check_answer(input: &str, accepted: &[String]) -> bool {
  let normalized = normalize_answer(input);
  if normalized.is_empty() {
    return false;
  }
  accepted.iter().any(|variant| normalize_answer(variant) == normalized)
}

/// True if the raw input is the quit command
pub fn is_quit(input: &str) -> bool {
  input.trim() == QUIT_COMMAND
}

#[cfg(test)]
mod tests {
  use super::*;

  fn variants(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn test_exact_match() {
    assert!(check_answer("talo", &variants(&["talo"])));
  }

  #[test]
  fn test_case_and_whitespace_insensitive() {
    assert!(check_answer("  To   Run ", &variants(&["to run"])));
    assert!(check_answer("HYVÄÄ PÄIVÄÄ", &variants(&["hyvää päivää"])));
  }

  #[test]
  fn test_any_variant_accepted() {
    let accepted = variants(&["juosta", "juoksen"]);
    assert!(check_answer("juoksen", &accepted));
    assert!(!check_answer("juoksi", &accepted));
  }

  #[test]
  fn test_nfc_normalization() {
    // "ä" written as "a" + U+0308
    let decomposed = "pa\u{0308}iva\u{0308}";
    assert!(check_answer(decomposed, &variants(&["päivä"])));
    assert_eq!(normalize_answer(decomposed), "päivä");
  }

  #[test]
  fn test_empty_input_incorrect() {
    assert!(!check_answer("   ", &variants(&[""])));
    assert!(!check_answer("", &variants(&["talo"])));
  }

  #[test]
  fn test_quit() {
    assert!(is_quit("quit"));
    assert!(is_quit(" quit\n"));
    assert!(!is_quit("Quit the job"));
  }
}
