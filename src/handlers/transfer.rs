//! JSON export and import of the whole notebook.

use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

use super::App;
use crate::store::{JsonStore, Store};

pub fn export(app: &App, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
  let collection = app.load()?;
  JsonStore::new(path)
    .save(&collection)
    .with_context(|| format!("Failed to write {}", path.display()))?;
  writeln!(
    out,
    "{} {} words, {} in study set -> {}",
    "Exported".green(),
    collection.words.len(),
    collection.learning_entries.len(),
    path.display()
  )?;
  Ok(())
}

/// Replace the notebook with the contents of a JSON export
pub fn import(app: &App, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
  if !path.exists() {
    anyhow::bail!("No such file: {}", path.display());
  }
  let collection = JsonStore::new(path)
    .load()
    .with_context(|| format!("Failed to read {}", path.display()))?;
  app.save(&collection)?;
  tracing::info!(
    words = collection.words.len(),
    entries = collection.learning_entries.len(),
    "imported notebook"
  );
  writeln!(
    out,
    "{} {} words, {} in study set",
    "Imported".green(),
    collection.words.len(),
    collection.learning_entries.len()
  )?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handlers::library;
  use crate::handlers::test_support::{output, test_app};
  use crate::services::library::NewWord;
  use crate::testing::test_now;

  #[test]
  fn test_export_then_import_into_fresh_notebook() {
    let (env, app) = test_app();
    library::add(&app, NewWord::new(vec!["talo".into()], vec!["house".into()]), test_now(), &mut Vec::new())
      .unwrap();
    let path = env.temp.path().join("export.json");

    let mut out = Vec::new();
    export(&app, &path, &mut out).unwrap();
    assert!(output(out).contains("1 words"));

    let (_other_env, other) = test_app();
    import(&other, &path, &mut Vec::new()).unwrap();
    assert_eq!(other.load().unwrap(), app.load().unwrap());
  }

  #[test]
  fn test_import_missing_file_is_error() {
    let (env, app) = test_app();
    let missing = env.temp.path().join("nope.json");
    assert!(import(&app, &missing, &mut Vec::new()).is_err());
  }
}
