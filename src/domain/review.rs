use serde::{Deserialize, Serialize};

/// Direction indicates which way a word was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
  /// Finnish shown, English expected
  #[serde(rename = "fi-en", alias = "A")]
  FiEn,
  /// English shown, Finnish expected
  #[serde(rename = "en-fi", alias = "B")]
  EnFi,
}

impl Direction {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::FiEn => "fi-en",
      Self::EnFi => "en-fi",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "fi-en" | "A" => Some(Self::FiEn),
      "en-fi" | "B" => Some(Self::EnFi),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::FiEn => "FI->EN",
      Self::EnFi => "EN->FI",
    }
  }

  pub fn flipped(&self) -> Self {
    match self {
      Self::FiEn => Self::EnFi,
      Self::EnFi => Self::FiEn,
    }
  }
}

/// One recorded answer in a practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
  pub direction: Direction,
  pub is_correct: bool,
}

impl AnswerEvent {
  pub fn new(direction: Direction, is_correct: bool) -> Self {
    Self { direction, is_correct }
  }
}

/// Mastery outcome of a single answer, reported back to the session UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryStatus {
  /// This answer pushed the word over the mastery threshold
  NewlyMastered,
  /// The word was mastered before this answer
  AlreadyMastered,
  Learning,
}

impl MasteryStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NewlyMastered => "newly_mastered",
      Self::AlreadyMastered => "already_mastered",
      Self::Learning => "learning",
    }
  }
}

/// Practice mode selects which words are asked and in which order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
  /// Words due by their SM-2 schedule, most overdue first
  DueReview,
  /// Weak and stale words first
  Smart,
  FiEn,
  EnFi,
  /// Random direction per question
  Mixed,
  /// Mastered words included, random direction
  ReviewMastered,
}

impl PracticeMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::DueReview => "due",
      Self::Smart => "smart",
      Self::FiEn => "fi-en",
      Self::EnFi => "en-fi",
      Self::Mixed => "mixed",
      Self::ReviewMastered => "review",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "due" | "sm2-review" => Some(Self::DueReview),
      "smart" => Some(Self::Smart),
      "fi-en" => Some(Self::FiEn),
      "en-fi" => Some(Self::EnFi),
      "mixed" => Some(Self::Mixed),
      "review" => Some(Self::ReviewMastered),
      _ => None,
    }
  }

  pub fn includes_mastered(&self) -> bool {
    matches!(self, Self::ReviewMastered)
  }
}
