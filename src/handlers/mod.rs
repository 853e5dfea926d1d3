//! CLI command implementations.
//!
//! Every command loads the collection, applies a service operation, and saves.
//! Output goes to the given writer so commands can be driven from tests.

pub mod library;
pub mod progress;
pub mod study;
pub mod transfer;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, Utc};
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::config::SrsConfig;
use crate::db::{self, LogOnError};
use crate::domain::{Collection, WordView};
use crate::services::goals::DailyGoals;
use crate::store::{SqliteStore, Store};

/// Shared state for a CLI invocation
pub struct App {
  pub store: SqliteStore,
  pub config: SrsConfig,
}

impl App {
  pub fn new(store: SqliteStore, config: SrsConfig) -> Self {
    Self { store, config }
  }

  pub fn load(&self) -> anyhow::Result<Collection> {
    self.store.load().context("Failed to load notebook")
  }

  pub fn save(&self, collection: &Collection) -> anyhow::Result<()> {
    self.store.save(collection).context("Failed to save notebook")
  }

  /// Today's goals; unreadable goal data falls back to a fresh record
  pub fn goals(&self, now: DateTime<Utc>) -> DailyGoals {
    let today = local_date(now);
    db::load_goals_for(self.store.connection(), today, self.config.goals)
      .log_warn("Failed to load daily goals")
      .unwrap_or_else(|| DailyGoals::new(today, self.config.goals))
  }

  pub fn save_goals(&self, goals: &DailyGoals) {
    db::save_daily_goals(self.store.connection(), goals).log_warn("Failed to save daily goals");
  }
}

/// Calendar day in the user's timezone
pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
  now.with_timezone(&Local).date_naive()
}

/// Split "juosta / juoksen" style input into variants
pub fn split_variants(input: &str) -> Vec<String> {
  input
    .split('/')
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
    .collect()
}

/// Ask for a typed "yes". Anything else (or end of input) declines.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<bool> {
  write!(out, "{} ", prompt.yellow())?;
  out.flush()?;
  let mut line = String::new();
  input.read_line(&mut line)?;
  Ok(line.trim().eq_ignore_ascii_case("yes"))
}

/// One-line word summary used by listings
pub fn write_word_line(out: &mut impl Write, view: &WordView<'_>) -> std::io::Result<()> {
  let status = match view.entry {
    Some(entry) if entry.mastered => "mastered".green(),
    Some(_) => "learning".yellow(),
    None => "-".dimmed(),
  };
  writeln!(
    out,
    "{:>4}  {} - {}  [{}] {}",
    view.word.id,
    view.word.finnish_display().bold(),
    view.word.english_display(),
    view.word.category.cyan(),
    status
  )
}

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;
  use crate::testing::TestEnv;

  /// App backed by a temporary database
  pub fn test_app() -> (TestEnv, App) {
    let env = TestEnv::new().unwrap();
    let store = SqliteStore::open(&env.db_path()).unwrap();
    (env, App::new(store, SrsConfig::default()))
  }

  pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
  }
}
