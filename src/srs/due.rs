//! Due-set selection and schedule summaries.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::domain::LearningEntry;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `from` to `to` (negative if `to` is earlier)
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
  (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// An unset review date means the word is due immediately
pub fn is_due(entry: &LearningEntry, now: DateTime<Utc>) -> bool {
  entry.next_review_date.is_none_or(|date| now >= date)
}

/// Days past the scheduled review. Unset dates count from the Unix epoch.
pub fn overdue_days(entry: &LearningEntry, now: DateTime<Utc>) -> f64 {
  let scheduled = entry.next_review_date.unwrap_or(DateTime::UNIX_EPOCH);
  days_between(scheduled, now)
}

/// Entries due for review, most overdue first.
///
/// Mastered entries are skipped unless `include_mastered`. The sort is stable, so
/// entries with equal overdue magnitude keep their input order.
pub fn select_due(entries: &[LearningEntry], include_mastered: bool, now: DateTime<Utc>) -> Vec<&LearningEntry> {
  let mut due: Vec<(&LearningEntry, f64)> = entries
    .iter()
    .filter(|e| include_mastered || !e.mastered)
    .filter(|e| is_due(e, now))
    .map(|e| (e, overdue_days(e, now)))
    .collect();

  due.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
  due.into_iter().map(|(e, _)| e).collect()
}

/// Counts of upcoming reviews, mastered words excluded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
  pub due_now: usize,
  /// Due within the next day
  pub due_today: usize,
  /// Due within the next week, after today
  pub due_this_week: usize,
}

pub fn review_stats(entries: &[LearningEntry], now: DateTime<Utc>) -> ReviewStats {
  let mut stats = ReviewStats::default();
  for entry in entries.iter().filter(|e| !e.mastered) {
    let Some(date) = entry.next_review_date else {
      stats.due_now += 1;
      continue;
    };
    let days_until = days_between(now, date);
    if days_until <= 0.0 {
      stats.due_now += 1;
    } else if days_until <= 1.0 {
      stats.due_today += 1;
    } else if days_until <= 7.0 {
      stats.due_this_week += 1;
    }
  }
  stats
}

/// Human readable form of an interval in days
pub fn format_next_review(interval_days: u32) -> String {
  let days = interval_days as f64;
  match interval_days {
    0 => "today".to_string(),
    1 => "tomorrow".to_string(),
    2..=6 => format!("in {} days", interval_days),
    7..=13 => "in 1 week".to_string(),
    14..=29 => format!("in {} weeks", (days / 7.0).round() as u32),
    30..=59 => "in 1 month".to_string(),
    _ => format!("in {} months", (days / 30.0).round() as u32),
  }
}
