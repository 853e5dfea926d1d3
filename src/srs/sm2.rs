use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::quality::is_passing;
use crate::domain::LearningEntry;

/// SM-2 constants. Overridable through config.toml or the environment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sm2Config {
  pub default_ease_factor: f64,
  pub min_ease_factor: f64,
  /// Intervals in days for the first and second successful review
  pub initial_intervals: [u32; 2],
  /// Upper bound for any interval
  pub max_interval_days: u32,
}

impl Default for Sm2Config {
  fn default() -> Self {
    Self {
      default_ease_factor: 2.5,
      min_ease_factor: 1.3,
      initial_intervals: [1, 3],
      max_interval_days: MAX_INTERVAL_DAYS,
    }
  }
}

/// Default interval cap, roughly a hundred years
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: u32,
  pub repetitions: u32,
  pub next_review: DateTime<Utc>,
  pub reviewed_at: DateTime<Utc>,
}

/// Compute the next SM-2 state.
///
/// The interval is derived from the repetitions and ease factor *before* this
/// review; the ease factor is then adjusted for every quality, failures included.
/// Intervals never exceed `max_interval_days`.
pub fn calculate_sm2(
  config: &Sm2Config,
  quality: u8,
  current_ease_factor: f64,
  current_interval: u32,
  current_repetitions: u32,
  now: DateTime<Utc>,
) -> Sm2Result {
  let [first, second] = config.initial_intervals;
  let cap = config.max_interval_days.max(1);

  let (new_interval, new_repetitions) = if !is_passing(quality) {
    (first, 0)
  } else {
    let interval = match current_repetitions {
      0 => first,
      1 => second,
      _ => scale_interval(current_interval, current_ease_factor, cap),
    };
    (interval, current_repetitions.saturating_add(1))
  };
  let new_interval = new_interval.min(cap);

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let q = quality.min(5) as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let new_ease_factor = (current_ease_factor + ease_delta).max(config.min_ease_factor);

  Sm2Result {
    ease_factor: new_ease_factor,
    interval_days: new_interval,
    repetitions: new_repetitions,
    next_review: now
      .checked_add_signed(Duration::days(new_interval as i64))
      .unwrap_or(DateTime::<Utc>::MAX_UTC),
    reviewed_at: now,
  }
}

fn scale_interval(interval: u32, ease_factor: f64, cap: u32) -> u32 {
  let days = (interval as f64 * ease_factor).round();
  if days.is_nan() || days <= 0.0 {
    0
  } else if days >= cap as f64 {
    cap
  } else {
    days as u32
  }
}

/// Run one SM-2 review against an entry and store the result on it.
///
/// An entry without a usable ease factor starts from the configured default.
pub fn apply_review(entry: &mut LearningEntry, config: &Sm2Config, quality: u8, now: DateTime<Utc>) -> Sm2Result {
  let ease = entry
    .ease_factor
    .filter(|ease| ease.is_finite() && *ease > 0.0)
    .unwrap_or(config.default_ease_factor);

  let result = calculate_sm2(config, quality, ease, entry.interval, entry.repetitions, now);

  entry.ease_factor = Some(result.ease_factor);
  entry.interval = result.interval_days;
  entry.repetitions = result.repetitions;
  entry.next_review_date = Some(result.next_review);
  entry.last_reviewed = Some(result.reviewed_at);

  tracing::debug!(
    word_id = entry.word_id,
    quality,
    interval = result.interval_days,
    ease = result.ease_factor,
    "sm2 review applied"
  );

  result
}
