use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::due::days_between;
use crate::domain::LearningEntry;

/// Days assumed for a word that was never practiced
pub const NEVER_PRACTICED_DAYS: f64 = 999.0;

/// Accuracy assumed before the first attempt
pub const NEUTRAL_ACCURACY: f64 = 0.5;

/// Smart-practice priority (higher = ask sooner).
///
/// `days_since_last_practice * (1.5 - accuracy)` over both directions. A never
/// practiced word scores 999 * 1.5 = 1498.5, above anything practiced.
pub fn word_priority(entry: &LearningEntry, now: DateTime<Utc>) -> f64 {
  let days_since = entry
    .last_practiced()
    .map_or(NEVER_PRACTICED_DAYS, |last| days_between(last, now));

  let attempts = entry.total_attempts();
  let accuracy = if attempts > 0 {
    entry.total_correct() as f64 / attempts as f64
  } else {
    NEUTRAL_ACCURACY
  };

  days_since * (1.5 - accuracy)
}

/// Stable sort by priority, highest first
pub fn sort_by_priority(entries: &mut [&LearningEntry], now: DateTime<Utc>) {
  entries.sort_by(|a, b| {
    word_priority(b, now)
      .partial_cmp(&word_priority(a, now))
      .unwrap_or(Ordering::Equal)
  });
}
