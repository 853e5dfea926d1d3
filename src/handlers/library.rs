//! Word library commands: add, edit, delete, study set membership, listings.

use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;

use super::{write_word_line, App};
use crate::services::library::{self, DeleteMode, LibraryError, NewWord, SortKey, WordEdit};
use crate::srs::format_next_review;

/// Options for `sana list`
#[derive(Debug, Clone)]
pub struct ListOptions {
  /// Include words outside the study set
  pub all: bool,
  pub category: Option<String>,
  pub sort: SortKey,
  pub descending: bool,
  /// Show orphaned progress instead of words
  pub orphans: bool,
}

impl Default for ListOptions {
  fn default() -> Self {
    Self {
      all: false,
      category: None,
      sort: SortKey::Finnish,
      descending: false,
      orphans: false,
    }
  }
}

pub fn add(app: &App, new: NewWord, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let learn = new.learn;

  match library::add_word(&mut collection, new, now) {
    Ok(id) => {
      app.save(&collection)?;
      let mut goals = app.goals(now);
      goals.record_word_added();
      app.save_goals(&goals);

      writeln!(out, "{} (id {})", "Word added".green(), id)?;
      if learn {
        writeln!(out, "Added to your study set.")?;
      }
      Ok(())
    }
    Err(LibraryError::Duplicate { id, learning }) => {
      writeln!(out, "{}", format!("Word already exists (id {}).", id).yellow())?;
      if !learning {
        writeln!(out, "It is not in your study set. Run `sana learn {}` to start learning it.", id)?;
      }
      Ok(())
    }
    Err(e) => Err(e.into()),
  }
}

pub fn edit(app: &App, id: i64, edit: WordEdit, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  library::update_word(&mut collection, id, edit, now)?;
  app.save(&collection)?;
  writeln!(out, "{}", "Word updated. Learning progress kept.".green())?;
  Ok(())
}

pub fn delete(app: &App, id: i64, mode: DeleteMode, out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  library::delete_word(&mut collection, id, mode)?;
  app.save(&collection)?;

  let message = match mode {
    DeleteMode::LearningOnly => "Removed from your study set. The word is still in the library.",
    DeleteMode::DatabaseOnly => "Deleted from the library. Its progress is kept as an orphan.",
    DeleteMode::Both => "Word and progress deleted.",
  };
  writeln!(out, "{}", message.green())?;
  Ok(())
}

pub fn learn(app: &App, ids: &[i64], now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let mut added = 0;
  for &id in ids {
    match library::add_to_learning(&mut collection, id, now) {
      Ok(true) => added += 1,
      Ok(false) => writeln!(out, "{}", format!("Word {} is already in your study set.", id).dimmed())?,
      Err(e) => writeln!(out, "{}", e.to_string().red())?,
    }
  }
  app.save(&collection)?;
  writeln!(out, "{} word(s) added to your study set.", added)?;
  Ok(())
}

pub fn unlearn(app: &App, ids: &[i64], out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let removed = ids
    .iter()
    .filter(|&&id| library::remove_from_learning(&mut collection, id))
    .count();
  app.save(&collection)?;
  writeln!(out, "{} word(s) removed from your study set.", removed)?;
  Ok(())
}

pub fn master(app: &App, ids: &[i64], now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let changed = library::mark_mastered(&mut collection, ids, now);
  app.save(&collection)?;
  writeln!(out, "{} word(s) marked as mastered.", changed)?;
  Ok(())
}

pub fn unmaster(app: &App, ids: &[i64], out: &mut impl Write) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let reset = library::reset_mastery(&mut collection, ids);
  app.save(&collection)?;
  writeln!(out, "{} word(s) reset to learning.", reset)?;
  Ok(())
}

pub fn list(app: &App, options: &ListOptions, out: &mut impl Write) -> anyhow::Result<()> {
  let collection = app.load()?;

  if options.orphans {
    let orphans = collection.orphaned_entries();
    if orphans.is_empty() {
      writeln!(out, "{}", "No orphaned progress.".dimmed())?;
    }
    for entry in orphans {
      writeln!(
        out,
        "{:>4}  practiced {} time(s), next review {}",
        entry.word_id,
        entry.practice_count,
        format_next_review(entry.interval)
      )?;
    }
    return Ok(());
  }

  let mut views = match &options.category {
    Some(category) => library::views_in_category(&collection, category, !options.all),
    None if options.all => collection.views(),
    None => collection.learning_views(),
  };
  library::sort_views(&mut views, options.sort, options.descending);

  if views.is_empty() {
    writeln!(out, "{}", "No words found.".dimmed())?;
    return Ok(());
  }
  for view in &views {
    write_word_line(out, view)?;
  }
  writeln!(out, "{}", format!("{} word(s)", views.len()).dimmed())?;
  Ok(())
}

pub fn search(app: &App, query: &str, out: &mut impl Write) -> anyhow::Result<()> {
  let collection = app.load()?;
  let results = library::search(&collection, query);
  if results.is_empty() {
    writeln!(out, "{}", format!("No words matching \"{}\".", query.trim()).dimmed())?;
    return Ok(());
  }
  for view in &results {
    write_word_line(out, view)?;
    if !view.word.notes.is_empty() {
      writeln!(out, "      {}", view.word.notes.dimmed())?;
    }
  }
  Ok(())
}
