use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LearningEntry, Word};

pub const COLLECTION_VERSION: u32 = 1;

pub const DEFAULT_CATEGORIES: [&str; 17] = [
  "grocery",
  "weather",
  "automobiles",
  "body parts",
  "greetings",
  "numbers",
  "colors",
  "food & drinks",
  "family",
  "animals",
  "verbs",
  "adjectives",
  "question words",
  "pronouns",
  "common phrases",
  "spoken finnish",
  "other",
];

/// Lifetime practice counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeStats {
  pub total_practice_sessions: u32,
  pub last_practice_date: Option<DateTime<Utc>>,
}

/// Everything the notebook stores: word definitions, the study set and lifetime stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  #[serde(default = "default_version")]
  pub version: u32,
  #[serde(default)]
  pub words: Vec<Word>,
  #[serde(default)]
  pub learning_entries: Vec<LearningEntry>,
  #[serde(default = "default_categories")]
  pub categories: Vec<String>,
  #[serde(default)]
  pub stats: PracticeStats,
}

fn default_version() -> u32 {
  COLLECTION_VERSION
}

pub fn default_categories() -> Vec<String> {
  DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for Collection {
  fn default() -> Self {
    Self {
      version: COLLECTION_VERSION,
      words: Vec::new(),
      learning_entries: Vec::new(),
      categories: default_categories(),
      stats: PracticeStats::default(),
    }
  }
}

/// Read-only merged view of a word and its progress
#[derive(Debug, Clone, Copy)]
pub struct WordView<'a> {
  pub word: &'a Word,
  pub entry: Option<&'a LearningEntry>,
}

impl WordView<'_> {
  pub fn is_learning(&self) -> bool {
    self.entry.is_some()
  }

  pub fn is_mastered(&self) -> bool {
    self.entry.is_some_and(|e| e.mastered)
  }

  pub fn practice_count(&self) -> u32 {
    self.entry.map_or(0, |e| e.practice_count)
  }

  pub fn correct_count(&self) -> u32 {
    self.entry.map_or(0, |e| e.correct_count)
  }
}

impl Collection {
  pub fn word(&self, id: i64) -> Option<&Word> {
    self.words.iter().find(|w| w.id == id)
  }

  pub fn word_mut(&mut self, id: i64) -> Option<&mut Word> {
    self.words.iter_mut().find(|w| w.id == id)
  }

  pub fn entry(&self, word_id: i64) -> Option<&LearningEntry> {
    self.learning_entries.iter().find(|e| e.word_id == word_id)
  }

  pub fn entry_mut(&mut self, word_id: i64) -> Option<&mut LearningEntry> {
    self.learning_entries.iter_mut().find(|e| e.word_id == word_id)
  }

  pub fn is_learning(&self, word_id: i64) -> bool {
    self.entry(word_id).is_some()
  }

  /// Next free word id. Orphaned entries keep their ids reserved.
  pub fn next_word_id(&self) -> i64 {
    let words = self.words.iter().map(|w| w.id);
    let entries = self.learning_entries.iter().map(|e| e.word_id);
    words.chain(entries).max().unwrap_or(0) + 1
  }

  /// Merged views of every word, in insertion order
  pub fn views(&self) -> Vec<WordView<'_>> {
    self
      .words
      .iter()
      .map(|word| WordView {
        word,
        entry: self.entry(word.id),
      })
      .collect()
  }

  /// Merged views of words in the study set
  pub fn learning_views(&self) -> Vec<WordView<'_>> {
    self.views().into_iter().filter(|v| v.is_learning()).collect()
  }

  /// Entries whose word definition no longer exists
  pub fn orphaned_entries(&self) -> Vec<&LearningEntry> {
    self
      .learning_entries
      .iter()
      .filter(|e| self.word(e.word_id).is_none())
      .collect()
  }

  /// Register a category if it is not known yet. Returns true if added.
  pub fn ensure_category(&mut self, category: &str) -> bool {
    let category = category.trim().to_lowercase();
    if category.is_empty() || self.categories.iter().any(|c| *c == category) {
      return false;
    }
    self.categories.push(category);
    true
  }
}
