//! Practice session pipeline: building the queue, asking, and recording answers.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use super::due::select_due;
use super::mastery::record_answer_stats;
use super::priority::sort_by_priority;
use super::quality::estimate_quality;
use super::sm2::{apply_review, Sm2Result};
use crate::config::SrsConfig;
use crate::domain::{AnswerEvent, Collection, Direction, LearningEntry, MasteryStatus, PracticeMode, Word};

/// Chance of asking the stronger direction in smart and due modes
const DIRECTION_FLIP_CHANCE: f64 = 0.3;

/// Result of recording one answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
  pub mastery: MasteryStatus,
  pub quality: u8,
  pub review: Sm2Result,
}

/// Record an answer: update counters and mastery, then reschedule with SM-2
pub fn record_answer(
  entry: &mut LearningEntry,
  event: AnswerEvent,
  config: &SrsConfig,
  now: DateTime<Utc>,
) -> AnswerOutcome {
  let (streak_before, mastery) = record_answer_stats(entry, event, &config.mastery, now);
  let quality = estimate_quality(event.is_correct, streak_before);
  let review = apply_review(entry, &config.sm2, quality, now);

  AnswerOutcome {
    mastery,
    quality,
    review,
  }
}

/// Pick the direction to ask a word in
pub fn choose_direction<R: Rng + ?Sized>(entry: &LearningEntry, mode: PracticeMode, rng: &mut R) -> Direction {
  match mode {
    PracticeMode::FiEn => Direction::FiEn,
    PracticeMode::EnFi => Direction::EnFi,
    PracticeMode::Mixed | PracticeMode::ReviewMastered => {
      if rng.random_bool(0.5) {
        Direction::FiEn
      } else {
        Direction::EnFi
      }
    }
    PracticeMode::Smart | PracticeMode::DueReview => {
      // Weaker direction first, with some variety
      let weaker = if entry.fi_en.streak <= entry.en_fi.streak {
        Direction::FiEn
      } else {
        Direction::EnFi
      };
      if rng.random_bool(DIRECTION_FLIP_CHANCE) {
        weaker.flipped()
      } else {
        weaker
      }
    }
  }
}

/// Word ids to practice for a mode, in asking order.
///
/// Orphaned entries are never included. `count = None` keeps every candidate.
pub fn build_session<R: Rng + ?Sized>(
  collection: &Collection,
  mode: PracticeMode,
  count: Option<usize>,
  now: DateTime<Utc>,
  rng: &mut R,
) -> Vec<i64> {
  let known = |e: &&LearningEntry| collection.word(e.word_id).is_some();

  let mut candidates: Vec<&LearningEntry> = match mode {
    PracticeMode::DueReview => select_due(&collection.learning_entries, false, now)
      .into_iter()
      .filter(known)
      .collect(),
    _ => collection
      .learning_entries
      .iter()
      .filter(known)
      .filter(|e| mode.includes_mastered() || !e.mastered)
      .collect(),
  };

  match mode {
    PracticeMode::DueReview => {}
    PracticeMode::Smart => sort_by_priority(&mut candidates, now),
    _ => candidates.shuffle(rng),
  }

  let limit = count.unwrap_or(candidates.len());
  candidates.into_iter().take(limit).map(|e| e.word_id).collect()
}

/// A question as shown to the learner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
  pub word_id: i64,
  pub direction: Direction,
  pub prompt: String,
  /// Every accepted answer variant
  pub answers: Vec<String>,
}

impl Question {
  pub fn new(word: &Word, direction: Direction) -> Self {
    let (prompt, answers) = match direction {
      Direction::FiEn => (word.primary_finnish(), &word.english),
      Direction::EnFi => (word.primary_english(), &word.finnish),
    };
    Self {
      word_id: word.id,
      direction,
      prompt: prompt.to_string(),
      answers: answers.clone(),
    }
  }

  pub fn answer_display(&self) -> String {
    self.answers.join(" / ")
  }
}

/// Final tally of a practice session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeSummary {
  /// Words queued for the session
  pub total: usize,
  pub answered: usize,
  pub correct: usize,
  pub newly_mastered: Vec<i64>,
}

impl PracticeSummary {
  /// Correct answers over the words queued, so quitting early lowers the score
  pub fn percentage(&self) -> u32 {
    if self.total > 0 {
      ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
    } else {
      0
    }
  }
}

/// Running practice session over a fixed queue of words
#[derive(Debug, Clone)]
pub struct PracticeSession {
  pub mode: PracticeMode,
  queue: Vec<i64>,
  position: usize,
  summary: PracticeSummary,
}

impl PracticeSession {
  pub fn new(mode: PracticeMode, queue: Vec<i64>) -> Self {
    let summary = PracticeSummary {
      total: queue.len(),
      ..PracticeSummary::default()
    };
    Self {
      mode,
      queue,
      position: 0,
      summary,
    }
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  /// Next question, or None when the queue is exhausted.
  ///
  /// Words removed from the collection since the queue was built are skipped.
  pub fn next_question<R: Rng + ?Sized>(&mut self, collection: &Collection, rng: &mut R) -> Option<Question> {
    while let Some(&word_id) = self.queue.get(self.position) {
      self.position += 1;
      if let (Some(word), Some(entry)) = (collection.word(word_id), collection.entry(word_id)) {
        let direction = choose_direction(entry, self.mode, rng);
        return Some(Question::new(word, direction));
      }
      tracing::warn!(word_id, "queued word no longer in study set, skipping");
    }
    None
  }

  /// Record the answer to `question` against the collection
  pub fn answer(
    &mut self,
    collection: &mut Collection,
    question: &Question,
    is_correct: bool,
    config: &SrsConfig,
    now: DateTime<Utc>,
  ) -> Option<AnswerOutcome> {
    let entry = collection.entry_mut(question.word_id)?;
    let outcome = record_answer(entry, AnswerEvent::new(question.direction, is_correct), config, now);

    self.summary.answered += 1;
    if is_correct {
      self.summary.correct += 1;
    }
    if outcome.mastery == MasteryStatus::NewlyMastered {
      self.summary.newly_mastered.push(question.word_id);
    }
    Some(outcome)
  }

  /// Close the session and bump the lifetime practice stats
  pub fn finish(self, collection: &mut Collection, now: DateTime<Utc>) -> PracticeSummary {
    collection.stats.total_practice_sessions += 1;
    collection.stats.last_practice_date = Some(now);
    tracing::info!(
      mode = self.mode.as_str(),
      answered = self.summary.answered,
      correct = self.summary.correct,
      "practice session finished"
    );
    self.summary
  }
}
