//! Daily learning goals: targets, today's counters, and progress summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalTargets {
  pub words_to_learn: u32,
  pub words_to_practice: u32,
  /// Percent, 1..=100
  pub target_accuracy: u32,
}

impl Default for GoalTargets {
  fn default() -> Self {
    Self {
      words_to_learn: 3,
      words_to_practice: 10,
      target_accuracy: 80,
    }
  }
}

impl GoalTargets {
  /// Targets must be positive and accuracy a percentage
  pub fn is_valid(&self) -> bool {
    self.words_to_learn > 0 && self.words_to_practice > 0 && (1..=100).contains(&self.target_accuracy)
  }
}

/// Today's progress towards the targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoals {
  pub last_date: NaiveDate,
  pub goals: GoalTargets,
  pub words_learned: u32,
  pub words_practiced: u32,
  pub correct_answers: u32,
}

/// Progress percentages for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalSummary {
  pub learn_progress: u32,
  pub practice_progress: u32,
  pub accuracy: u32,
  pub learn_met: bool,
  pub practice_met: bool,
  pub accuracy_met: bool,
}

impl GoalSummary {
  pub fn all_met(&self) -> bool {
    self.learn_met && self.practice_met && self.accuracy_met
  }
}

fn capped_percent(done: u32, target: u32) -> u32 {
  if target == 0 {
    return 100;
  }
  ((done as f64 / target as f64) * 100.0).round().min(100.0) as u32
}

impl DailyGoals {
  pub fn new(today: NaiveDate, goals: GoalTargets) -> Self {
    Self {
      last_date: today,
      goals,
      words_learned: 0,
      words_practiced: 0,
      correct_answers: 0,
    }
  }

  /// Zero the counters if `today` is a new day. Returns true on rollover.
  pub fn rollover(&mut self, today: NaiveDate) -> bool {
    if self.last_date == today {
      return false;
    }
    self.last_date = today;
    self.reset_progress();
    true
  }

  pub fn record_word_added(&mut self) {
    self.words_learned += 1;
  }

  pub fn record_practice(&mut self, answered: u32, correct: u32) {
    self.words_practiced += answered;
    self.correct_answers += correct;
  }

  /// Reset today's counters, keeping the targets
  pub fn reset_progress(&mut self) {
    self.words_learned = 0;
    self.words_practiced = 0;
    self.correct_answers = 0;
  }

  /// Replace the targets. Returns false (and changes nothing) if invalid.
  pub fn set_targets(&mut self, goals: GoalTargets) -> bool {
    if !goals.is_valid() {
      tracing::warn!(?goals, "rejected invalid daily goals");
      return false;
    }
    self.goals = goals;
    true
  }

  pub fn summary(&self) -> GoalSummary {
    let accuracy = if self.words_practiced > 0 {
      ((self.correct_answers as f64 / self.words_practiced as f64) * 100.0).round() as u32
    } else {
      0
    };

    GoalSummary {
      learn_progress: capped_percent(self.words_learned, self.goals.words_to_learn),
      practice_progress: capped_percent(self.words_practiced, self.goals.words_to_practice),
      accuracy,
      learn_met: self.words_learned >= self.goals.words_to_learn,
      practice_met: self.words_practiced >= self.goals.words_to_practice,
      accuracy_met: accuracy >= self.goals.target_accuracy,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
  }

  #[test]
  fn test_new_goals_empty() {
    let goals = DailyGoals::new(day(10), GoalTargets::default());
    let summary = goals.summary();
    assert_eq!(summary.learn_progress, 0);
    assert_eq!(summary.accuracy, 0);
    assert!(!summary.all_met());
  }

  #[test]
  fn test_rollover_resets_counters() {
    let mut goals = DailyGoals::new(day(10), GoalTargets::default());
    goals.record_word_added();
    goals.record_practice(5, 4);

    assert!(!goals.rollover(day(10)));
    assert_eq!(goals.words_learned, 1);

    assert!(goals.rollover(day(11)));
    assert_eq!(goals.last_date, day(11));
    assert_eq!(goals.words_learned, 0);
    assert_eq!(goals.words_practiced, 0);
    assert_eq!(goals.correct_answers, 0);
    assert_eq!(goals.goals, GoalTargets::default());
  }

  #[test]
  fn test_summary_percentages() {
    let mut goals = DailyGoals::new(day(10), GoalTargets::default());
    goals.record_word_added();
    goals.record_practice(4, 3);
    let summary = goals.summary();
    // 1/3 -> 33, 4/10 -> 40, 3/4 -> 75
    assert_eq!(summary.learn_progress, 33);
    assert_eq!(summary.practice_progress, 40);
    assert_eq!(summary.accuracy, 75);
    assert!(!summary.accuracy_met);
  }

  #[test]
  fn test_summary_caps_at_100_and_all_met() {
    let mut goals = DailyGoals::new(day(10), GoalTargets::default());
    for _ in 0..5 {
      goals.record_word_added();
    }
    goals.record_practice(20, 18);
    let summary = goals.summary();
    assert_eq!(summary.learn_progress, 100);
    assert_eq!(summary.practice_progress, 100);
    assert_eq!(summary.accuracy, 90);
    assert!(summary.all_met());
  }

  #[test]
  fn test_set_targets_validation() {
    let mut goals = DailyGoals::new(day(10), GoalTargets::default());
    let bad = GoalTargets {
      target_accuracy: 120,
      ..GoalTargets::default()
    };
    assert!(!goals.set_targets(bad));
    assert_eq!(goals.goals, GoalTargets::default());

    let good = GoalTargets {
      words_to_learn: 5,
      words_to_practice: 20,
      target_accuracy: 90,
    };
    assert!(goals.set_targets(good));
    assert_eq!(goals.goals, good);
  }
}
