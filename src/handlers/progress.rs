use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use std::io::Write;

use super::App;
use crate::services::goals::GoalTargets;
use crate::services::stats::{accuracy_percent, build_report};

/// Changes requested by `sana goals`
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalChanges {
  pub words_to_learn: Option<u32>,
  pub words_to_practice: Option<u32>,
  pub target_accuracy: Option<u32>,
  pub reset: bool,
}

fn progress_bar(percent: u32) -> String {
  let filled = (percent.min(100) / 10) as usize;
  format!("{}{} {}%", "█".repeat(filled), "░".repeat(10 - filled), percent)
}

pub fn stats(app: &App, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let collection = app.load()?;
  let report = build_report(&collection, now);

  writeln!(out, "{}", "=== Statistics ===".cyan().bold())?;
  writeln!(out, "{}: {}", "Words in library".white().bold(), report.quick.total_in_database)?;
  writeln!(out, "{}: {}", "Study set".white().bold(), report.quick.total_learning)?;
  writeln!(
    out,
    "{}: {} ({}%)",
    "Mastered".white().bold(),
    report.quick.mastered.to_string().green(),
    report.quick.mastered_percent()
  )?;
  writeln!(out, "{}: {}", "Learning".white().bold(), report.quick.learning.to_string().yellow())?;
  writeln!(
    out,
    "{}: {}",
    "Practice sessions".white().bold(),
    collection.stats.total_practice_sessions
  )?;
  if let Some(last) = collection.stats.last_practice_date {
    writeln!(
      out,
      "{}: {}",
      "Last practice".white().bold(),
      last.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )?;
  }

  writeln!(out)?;
  writeln!(out, "{}", "Reviews:".white().bold())?;
  writeln!(out, "  Due now: {}", report.review.due_now)?;
  writeln!(out, "  Due today: {}", report.review.due_today)?;
  writeln!(out, "  Due this week: {}", report.review.due_this_week)?;

  writeln!(out)?;
  writeln!(out, "{}", "By category:".white().bold())?;
  if report.categories.is_empty() {
    writeln!(out, "{}", "  No words in your study set yet.".dimmed())?;
  }
  for category in &report.categories {
    writeln!(
      out,
      "  {:<18} {:>4} {:>4}  {}",
      category.category,
      category.total,
      category.mastered,
      progress_bar(category.percent())
    )?;
  }

  if !report.most_practiced.is_empty() {
    writeln!(out)?;
    writeln!(out, "{}", "Most practiced:".white().bold())?;
    for (i, view) in report.most_practiced.iter().enumerate() {
      writeln!(
        out,
        "  {}. {} - {}% accuracy ({} times)",
        i + 1,
        view.word.primary_finnish(),
        accuracy_percent(view),
        view.practice_count()
      )?;
    }
  }

  if !report.needs_attention.is_empty() {
    writeln!(out)?;
    writeln!(out, "{}", "Needs more practice:".white().bold())?;
    for (i, view) in report.needs_attention.iter().enumerate() {
      writeln!(
        out,
        "  {}. {} - {}",
        i + 1,
        view.word.primary_finnish().yellow(),
        view.word.english_display()
      )?;
    }
  }
  Ok(())
}

/// `sana goals`: apply any changes, then show today's progress
pub fn goals(app: &App, changes: GoalChanges, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let mut goals = app.goals(now);

  let wants_change =
    changes.words_to_learn.is_some() || changes.words_to_practice.is_some() || changes.target_accuracy.is_some();
  if wants_change {
    let targets = GoalTargets {
      words_to_learn: changes.words_to_learn.unwrap_or(goals.goals.words_to_learn),
      words_to_practice: changes.words_to_practice.unwrap_or(goals.goals.words_to_practice),
      target_accuracy: changes.target_accuracy.unwrap_or(goals.goals.target_accuracy),
    };
    if !goals.set_targets(targets) {
      anyhow::bail!("Goals must be positive numbers and accuracy between 1 and 100");
    }
    writeln!(out, "{}", "Daily goals updated!".green())?;
  }
  if changes.reset {
    goals.reset_progress();
    writeln!(out, "{}", "Today's progress reset.".green())?;
  }
  if wants_change || changes.reset {
    app.save_goals(&goals);
  }

  let summary = goals.summary();
  let mark = |met: bool| if met { "✓".green() } else { "○".dimmed() };

  writeln!(out, "{}", "=== Daily Goals ===".cyan().bold())?;
  writeln!(
    out,
    "  {} Words learned: {}/{}  {}",
    mark(summary.learn_met),
    goals.words_learned,
    goals.goals.words_to_learn,
    progress_bar(summary.learn_progress)
  )?;
  writeln!(
    out,
    "  {} Words practiced: {}/{}  {}",
    mark(summary.practice_met),
    goals.words_practiced,
    goals.goals.words_to_practice,
    progress_bar(summary.practice_progress)
  )?;
  writeln!(
    out,
    "  {} Accuracy: {}% (target: {}%)",
    mark(summary.accuracy_met),
    summary.accuracy,
    goals.goals.target_accuracy
  )?;
  if summary.all_met() {
    writeln!(out)?;
    writeln!(out, "{}", "All daily goals achieved! Hienoa!".green().bold())?;
  }
  Ok(())
}
