//! Review queue and the interactive practice loop.

use chrono::{DateTime, Utc};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};

use super::App;
use crate::answer::{check_answer, is_quit, QUIT_COMMAND};
use crate::domain::{MasteryStatus, PracticeMode};
use crate::srs::due::overdue_days;
use crate::srs::{build_session, format_next_review, review_stats, select_due, PracticeSession};

/// Random source for practice sessions. Fixed seed in testing mode.
pub fn practice_rng() -> StdRng {
  if cfg!(feature = "testing") {
    StdRng::seed_from_u64(42)
  } else {
    StdRng::from_os_rng()
  }
}

/// `sana due`: words waiting for review, most overdue first
pub fn due(app: &App, limit: Option<usize>, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
  let collection = app.load()?;
  let stats = review_stats(&collection.learning_entries, now);

  writeln!(out, "{}", "=== Reviews ===".cyan().bold())?;
  writeln!(out, "{}: {}", "Due now".white().bold(), stats.due_now)?;
  writeln!(out, "{}: {}", "Due today".white().bold(), stats.due_today)?;
  writeln!(out, "{}: {}", "Due this week".white().bold(), stats.due_this_week)?;

  let due: Vec<_> = select_due(&collection.learning_entries, false, now)
    .into_iter()
    .filter_map(|entry| collection.word(entry.word_id).map(|word| (word, entry)))
    .take(limit.unwrap_or(usize::MAX))
    .collect();
  if due.is_empty() {
    writeln!(out, "{}", "Nothing to review right now.".green())?;
    return Ok(());
  }

  writeln!(out)?;
  for (word, entry) in due {
    let when = match entry.next_review_date {
      None => "new".yellow(),
      Some(_) => format!("{:.0} day(s) overdue", overdue_days(entry, now).floor()).red(),
    };
    writeln!(
      out,
      "{:>4}  {} - {}  {}",
      word.id,
      word.finnish_display().bold(),
      word.english_display(),
      when
    )?;
  }
  Ok(())
}

/// `sana practice`: ask questions until the queue is empty, input ends, or the user quits
pub fn practice<R: Rng + ?Sized>(
  app: &App,
  mode: PracticeMode,
  count: Option<usize>,
  input: &mut impl BufRead,
  out: &mut impl Write,
  rng: &mut R,
  clock: impl Fn() -> DateTime<Utc>,
) -> anyhow::Result<()> {
  let mut collection = app.load()?;
  let queue = build_session(&collection, mode, count, clock(), rng);
  if queue.is_empty() {
    let message = match mode {
      PracticeMode::DueReview => "No words due for review. Come back later!",
      PracticeMode::ReviewMastered => "Your study set is empty.",
      _ => "No words to practice. Add words or review mastered ones.",
    };
    writeln!(out, "{}", message.yellow())?;
    return Ok(());
  }

  let mut session = PracticeSession::new(mode, queue);
  writeln!(
    out,
    "{}",
    format!("=== Practice ({}, {} words) ===", mode.as_str(), session.len()).cyan().bold()
  )?;
  writeln!(out, "{}", format!("Type \"{}\" to stop.", QUIT_COMMAND).dimmed())?;

  while let Some(question) = session.next_question(&collection, rng) {
    writeln!(out)?;
    writeln!(
      out,
      "[{}/{}] {} {}",
      session.position(),
      session.len(),
      question.direction.label().dimmed(),
      question.prompt.bold()
    )?;
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 || is_quit(&line) {
      break;
    }

    let is_correct = check_answer(&line, &question.answers);
    let Some(outcome) = session.answer(&mut collection, &question, is_correct, &app.config, clock()) else {
      continue;
    };

    if is_correct {
      writeln!(out, "{}", "Correct!".green().bold())?;
      if question.answers.len() > 1 {
        writeln!(out, "All answers: {}", question.answer_display())?;
      }
    } else {
      writeln!(out, "{} {}", "Wrong. Answer:".red(), question.answer_display().bold())?;
    }
    writeln!(
      out,
      "{}",
      format!("Next review {}", format_next_review(outcome.review.interval_days)).dimmed()
    )?;
    if outcome.mastery == MasteryStatus::NewlyMastered {
      writeln!(out, "{}", "Word mastered!".green().bold())?;
    }
  }

  let summary = session.finish(&mut collection, clock());
  app.save(&collection)?;

  if summary.answered > 0 {
    let mut goals = app.goals(clock());
    goals.record_practice(summary.answered as u32, summary.correct as u32);
    app.save_goals(&goals);
  }

  writeln!(out)?;
  writeln!(out, "{}", "=== Session complete ===".cyan().bold())?;
  writeln!(
    out,
    "Score: {}/{} ({}%)",
    summary.correct,
    summary.total,
    summary.percentage()
  )?;
  if !summary.newly_mastered.is_empty() {
    writeln!(out, "Newly mastered: {}", summary.newly_mastered.len())?;
  }
  Ok(())
}
