use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Direction;

/// Per-direction practice counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionStats {
  /// Consecutive correct answers, reset on any miss
  pub streak: u32,
  pub attempts: u32,
  pub correct: u32,
  pub last_practiced: Option<DateTime<Utc>>,
}

impl DirectionStats {
  pub fn accuracy(&self) -> Option<f64> {
    if self.attempts > 0 {
      Some(self.correct as f64 / self.attempts as f64)
    } else {
      None
    }
  }
}

/// Learning progress for one word in the active study set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LearningEntryRecord", into = "LearningEntryRecord")]
pub struct LearningEntry {
  pub word_id: i64,
  pub started_learning_at: Option<DateTime<Utc>>,
  pub mastered: bool,
  pub mastered_at: Option<DateTime<Utc>>,
  pub practice_count: u32,
  pub correct_count: u32,
  pub fi_en: DirectionStats,
  pub en_fi: DirectionStats,

  // SM-2 scheduling state
  /// None until first set; the scheduler then uses the configured default
  pub ease_factor: Option<f64>,
  pub interval: u32,
  pub repetitions: u32,
  /// None means due immediately
  pub next_review_date: Option<DateTime<Utc>>,
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl LearningEntry {
  pub fn new(word_id: i64, now: DateTime<Utc>) -> Self {
    Self {
      word_id,
      started_learning_at: Some(now),
      ..Self::unstarted(word_id)
    }
  }

  /// Entry with every counter at its zero value, as for a record imported without progress
  pub fn unstarted(word_id: i64) -> Self {
    Self {
      word_id,
      started_learning_at: None,
      mastered: false,
      mastered_at: None,
      practice_count: 0,
      correct_count: 0,
      fi_en: DirectionStats::default(),
      en_fi: DirectionStats::default(),
      ease_factor: None,
      interval: 0,
      repetitions: 0,
      next_review_date: None,
      last_reviewed: None,
    }
  }

  pub fn direction(&self, direction: Direction) -> &DirectionStats {
    match direction {
      Direction::FiEn => &self.fi_en,
      Direction::EnFi => &self.en_fi,
    }
  }

  pub fn direction_mut(&mut self, direction: Direction) -> &mut DirectionStats {
    match direction {
      Direction::FiEn => &mut self.fi_en,
      Direction::EnFi => &mut self.en_fi,
    }
  }

  /// Attempts across both directions
  pub fn total_attempts(&self) -> u32 {
    self.fi_en.attempts + self.en_fi.attempts
  }

  pub fn total_correct(&self) -> u32 {
    self.fi_en.correct + self.en_fi.correct
  }

  /// Most recent practice in either direction
  pub fn last_practiced(&self) -> Option<DateTime<Utc>> {
    self.fi_en.last_practiced.max(self.en_fi.last_practiced)
  }

  /// Share of correct answers over `practice_count`, if practiced at all
  pub fn accuracy(&self) -> Option<f64> {
    if self.practice_count > 0 {
      Some(self.correct_count as f64 / self.practice_count as f64)
    } else {
      None
    }
  }

  /// Manual mastery. Keeps the original timestamp when already mastered.
  pub fn mark_mastered(&mut self, now: DateTime<Utc>) {
    if !self.mastered {
      self.mastered = true;
      self.mastered_at = Some(now);
    }
  }

  /// Manual reset back to learning; the only way mastery is ever cleared
  pub fn reset_mastery(&mut self) {
    self.mastered = false;
    self.mastered_at = None;
    self.fi_en.streak = 0;
    self.en_fi.streak = 0;
  }
}

/// Flat serialized form of [`LearningEntry`].
///
/// Every field is optional so partially initialised records load with zero-value defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LearningEntryRecord {
  word_id: i64,
  started_learning_at: Option<DateTime<Utc>>,
  mastered: bool,
  mastered_at: Option<DateTime<Utc>>,
  practice_count: u32,
  correct_count: u32,
  streak_fi_en: u32,
  streak_en_fi: u32,
  attempts_fi_en: u32,
  attempts_en_fi: u32,
  correct_fi_en: u32,
  correct_en_fi: u32,
  last_practiced_fi_en: Option<DateTime<Utc>>,
  last_practiced_en_fi: Option<DateTime<Utc>>,
  ease_factor: Option<f64>,
  interval: u32,
  repetitions: u32,
  next_review_date: Option<DateTime<Utc>>,
  last_reviewed: Option<DateTime<Utc>>,
}

impl From<LearningEntryRecord> for LearningEntry {
  fn from(r: LearningEntryRecord) -> Self {
    Self {
      word_id: r.word_id,
      started_learning_at: r.started_learning_at,
      mastered: r.mastered,
      mastered_at: r.mastered_at,
      practice_count: r.practice_count,
      correct_count: r.correct_count,
      fi_en: DirectionStats {
        streak: r.streak_fi_en,
        attempts: r.attempts_fi_en,
        correct: r.correct_fi_en,
        last_practiced: r.last_practiced_fi_en,
      },
      en_fi: DirectionStats {
        streak: r.streak_en_fi,
        attempts: r.attempts_en_fi,
        correct: r.correct_en_fi,
        last_practiced: r.last_practiced_en_fi,
      },
      ease_factor: r.ease_factor,
      interval: r.interval,
      repetitions: r.repetitions,
      next_review_date: r.next_review_date,
      last_reviewed: r.last_reviewed,
    }
  }
}

impl From<LearningEntry> for LearningEntryRecord {
  fn from(e: LearningEntry) -> Self {
    Self {
      word_id: e.word_id,
      started_learning_at: e.started_learning_at,
      mastered: e.mastered,
      mastered_at: e.mastered_at,
      practice_count: e.practice_count,
      correct_count: e.correct_count,
      streak_fi_en: e.fi_en.streak,
      streak_en_fi: e.en_fi.streak,
      attempts_fi_en: e.fi_en.attempts,
      attempts_en_fi: e.en_fi.attempts,
      correct_fi_en: e.fi_en.correct,
      correct_en_fi: e.en_fi.correct,
      last_practiced_fi_en: e.fi_en.last_practiced,
      last_practiced_en_fi: e.en_fi.last_practiced,
      ease_factor: e.ease_factor,
      interval: e.interval,
      repetitions: e.repetitions,
      next_review_date: e.next_review_date,
      last_reviewed: e.last_reviewed,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
  }

  #[test]
  fn test_new_entry_defaults() {
    let now = ts("2025-03-01T10:00:00Z");
    let entry = LearningEntry::new(7, now);
    assert_eq!(entry.word_id, 7);
    assert_eq!(entry.started_learning_at, Some(now));
    assert!(!entry.mastered);
    assert!(entry.mastered_at.is_none());
    assert!(entry.ease_factor.is_none());
    assert_eq!(entry.interval, 0);
    assert_eq!(entry.repetitions, 0);
    assert!(entry.next_review_date.is_none());
    assert_eq!(entry.fi_en, DirectionStats::default());
  }

  #[test]
  fn test_partial_record_defaults_to_zero() {
    let entry: LearningEntry = serde_json::from_str(r#"{"wordId": 42, "streakFiEn": 2}"#).unwrap();
    assert_eq!(entry.word_id, 42);
    assert_eq!(entry.fi_en.streak, 2);
    assert_eq!(entry.en_fi.attempts, 0);
    assert!(entry.ease_factor.is_none());
    assert!(entry.next_review_date.is_none());
  }

  #[test]
  fn test_stored_ease_kept_without_review_date() {
    let entry: LearningEntry = serde_json::from_str(r#"{"wordId": 1, "easeFactor": 1.5, "interval": 10}"#).unwrap();
    assert_eq!(entry.ease_factor, Some(1.5));
    assert!(entry.last_reviewed.is_none());
    assert_eq!(serde_json::to_value(&entry).unwrap()["easeFactor"], 1.5);
  }

  #[test]
  fn test_null_timestamps_accepted() {
    let json = r#"{"wordId": 1, "nextReviewDate": null, "lastPracticedEnFi": null, "masteredAt": null}"#;
    let entry: LearningEntry = serde_json::from_str(json).unwrap();
    assert!(entry.next_review_date.is_none());
    assert!(entry.en_fi.last_practiced.is_none());
  }

  #[test]
  fn test_serialized_shape_is_flat() {
    let mut entry = LearningEntry::new(3, ts("2025-03-01T10:00:00Z"));
    entry.en_fi.correct = 4;
    entry.fi_en.last_practiced = Some(ts("2025-03-02T08:00:00Z"));
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["wordId"], 3);
    assert_eq!(value["correctEnFi"], 4);
    assert!(value["easeFactor"].is_null());
    assert!(value["lastPracticedFiEn"].is_string());
    assert!(value["nextReviewDate"].is_null());
  }

  #[test]
  fn test_direction_accessors() {
    let mut entry = LearningEntry::unstarted(1);
    entry.direction_mut(Direction::EnFi).streak = 5;
    assert_eq!(entry.direction(Direction::EnFi).streak, 5);
    assert_eq!(entry.direction(Direction::FiEn).streak, 0);
  }

  #[test]
  fn test_last_practiced_takes_latest() {
    let mut entry = LearningEntry::unstarted(1);
    assert!(entry.last_practiced().is_none());
    entry.fi_en.last_practiced = Some(ts("2025-03-01T10:00:00Z"));
    entry.en_fi.last_practiced = Some(ts("2025-03-03T10:00:00Z"));
    assert_eq!(entry.last_practiced(), Some(ts("2025-03-03T10:00:00Z")));
  }

  #[test]
  fn test_mark_mastered_keeps_first_timestamp() {
    let mut entry = LearningEntry::unstarted(1);
    entry.mark_mastered(ts("2025-03-01T10:00:00Z"));
    entry.mark_mastered(ts("2025-04-01T10:00:00Z"));
    assert!(entry.mastered);
    assert_eq!(entry.mastered_at, Some(ts("2025-03-01T10:00:00Z")));
  }

  #[test]
  fn test_reset_mastery_zeroes_streaks() {
    let mut entry = LearningEntry::unstarted(1);
    entry.fi_en.streak = 4;
    entry.en_fi.streak = 3;
    entry.fi_en.attempts = 6;
    entry.mark_mastered(ts("2025-03-01T10:00:00Z"));

    entry.reset_mastery();
    assert!(!entry.mastered);
    assert!(entry.mastered_at.is_none());
    assert_eq!(entry.fi_en.streak, 0);
    assert_eq!(entry.en_fi.streak, 0);
    assert_eq!(entry.fi_en.attempts, 6);
  }
}
