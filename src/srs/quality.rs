/// Lowest quality that counts as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Map one answer to an SM-2 quality score (0-5).
///
/// `streak_before` is the direction streak before this answer is applied.
/// A miss that breaks a streak scores 1, a miss on a cold word 0.
/// Correct answers score 3, rising to 4 at a streak of 2 and 5 from 3 on.
pub fn estimate_quality(is_correct: bool, streak_before: u32) -> u8 {
  if !is_correct {
    return if streak_before > 0 { 1 } else { 0 };
  }
  match streak_before {
    0 | 1 => 3,
    2 => 4,
    _ => 5,
  }
}

pub fn is_passing(quality: u8) -> bool {
  quality >= PASSING_QUALITY
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_incorrect_cold() {
    assert_eq!(estimate_quality(false, 0), 0);
  }

  #[test]
  fn test_incorrect_breaks_streak() {
    assert_eq!(estimate_quality(false, 1), 1);
    assert_eq!(estimate_quality(false, 10), 1);
  }

  #[test]
  fn test_correct_grades() {
    assert_eq!(estimate_quality(true, 0), 3);
    assert_eq!(estimate_quality(true, 1), 3);
    assert_eq!(estimate_quality(true, 2), 4);
    assert_eq!(estimate_quality(true, 3), 5);
    assert_eq!(estimate_quality(true, 50), 5);
  }

  #[test]
  fn test_passing_threshold() {
    assert!(!is_passing(estimate_quality(false, 4)));
    assert!(is_passing(estimate_quality(true, 0)));
  }
}
