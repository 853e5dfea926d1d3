use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{AnswerEvent, DirectionStats, LearningEntry, MasteryStatus};

/// Thresholds for automatic mastery
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MasteryConfig {
  /// Streak needed in both directions
  pub streak_required: u32,
  /// Attempts needed in both directions before accuracy counts
  pub min_attempts: u32,
  pub accuracy_threshold: f64,
}

impl Default for MasteryConfig {
  fn default() -> Self {
    Self {
      streak_required: 3,
      min_attempts: 4,
      accuracy_threshold: 0.85,
    }
  }
}

/// Whether the counters qualify a word for mastery.
///
/// Either both streaks reach `streak_required`, or both directions have enough
/// attempts and both accuracies reach `accuracy_threshold`.
pub fn should_master(config: &MasteryConfig, fi_en: &DirectionStats, en_fi: &DirectionStats) -> bool {
  if fi_en.streak >= config.streak_required && en_fi.streak >= config.streak_required {
    return true;
  }

  let accurate = |stats: &DirectionStats| {
    stats.attempts >= config.min_attempts
      && stats
        .accuracy()
        .is_some_and(|acc| acc >= config.accuracy_threshold)
  };
  accurate(fi_en) && accurate(en_fi)
}

/// Apply an answer to the entry's counters and evaluate mastery.
///
/// Returns the direction streak as it was before this answer together with the
/// mastery status. Mastery is only ever set here, never cleared.
pub fn record_answer_stats(
  entry: &mut LearningEntry,
  event: AnswerEvent,
  config: &MasteryConfig,
  now: DateTime<Utc>,
) -> (u32, MasteryStatus) {
  let stats = entry.direction_mut(event.direction);
  let streak_before = stats.streak;

  stats.attempts += 1;
  if event.is_correct {
    stats.correct += 1;
    stats.streak += 1;
  } else {
    stats.streak = 0;
  }
  stats.last_practiced = Some(now);

  entry.practice_count += 1;
  if event.is_correct {
    entry.correct_count += 1;
  }

  let status = if entry.mastered {
    MasteryStatus::AlreadyMastered
  } else if should_master(config, &entry.fi_en, &entry.en_fi) {
    entry.mastered = true;
    entry.mastered_at = Some(now);
    tracing::info!(word_id = entry.word_id, "word newly mastered");
    MasteryStatus::NewlyMastered
  } else {
    MasteryStatus::Learning
  };

  (streak_before, status)
}
