//! sana - Finnish/English vocabulary notebook with spaced repetition.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sana_notebook::config;
use sana_notebook::domain::PracticeMode;
use sana_notebook::handlers::library::ListOptions;
use sana_notebook::handlers::progress::GoalChanges;
use sana_notebook::handlers::{self, split_variants, App};
use sana_notebook::paths;
use sana_notebook::services::library::{DeleteMode, NewWord, SortKey, WordEdit};
use sana_notebook::store::SqliteStore;

/// Finnish vocabulary notebook
#[derive(Parser)]
#[command(name = "sana")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Finnish/English vocabulary notebook with SM-2 spaced repetition")]
struct Cli {
  /// Database file (overrides config.toml and DATABASE_PATH)
  #[arg(long, global = true)]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
  Fi,
  En,
}

#[derive(Clone, Copy, ValueEnum)]
enum DeleteArg {
  /// Remove from the study set only
  Learning,
  /// Remove the word definition only, keeping progress as an orphan
  Database,
  /// Remove both
  Both,
}

#[derive(Subcommand)]
enum Commands {
  /// Add a word. Separate variants with "/"
  Add {
    finnish: String,
    english: String,
    #[arg(long, short)]
    category: Option<String>,
    #[arg(long, default_value = "")]
    example: String,
    #[arg(long, default_value = "")]
    notes: String,
    /// Only add to the library, not the study set
    #[arg(long)]
    no_learn: bool,
  },

  /// Add existing words to the study set
  Learn { ids: Vec<i64> },

  /// Remove words from the study set (progress is discarded)
  Unlearn { ids: Vec<i64> },

  /// List words
  List {
    /// Include words outside the study set
    #[arg(long)]
    all: bool,
    #[arg(long, short)]
    category: Option<String>,
    #[arg(long, value_enum, default_value = "fi")]
    sort: SortArg,
    #[arg(long)]
    desc: bool,
    /// Show progress whose word definition was deleted
    #[arg(long)]
    orphans: bool,
  },

  /// Search Finnish, English and notes
  Search { query: String },

  /// Edit a word definition
  Edit {
    id: i64,
    #[arg(long)]
    finnish: Option<String>,
    #[arg(long)]
    english: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    example: Option<String>,
    #[arg(long)]
    notes: Option<String>,
  },

  /// Delete a word
  Delete {
    id: i64,
    #[arg(long, value_enum, default_value = "both")]
    mode: DeleteArg,
    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
  },

  /// Show words due for review
  Due {
    #[arg(long)]
    limit: Option<usize>,
  },

  /// Practice words interactively
  Practice {
    /// due, smart, fi-en, en-fi, mixed, review
    #[arg(long, short, default_value = "smart")]
    mode: String,
    /// Number of words (all candidates when omitted)
    #[arg(long, short = 'n')]
    count: Option<usize>,
  },

  /// Show learning statistics
  Stats,

  /// Show or change daily goals
  Goals {
    #[arg(long)]
    learn: Option<u32>,
    #[arg(long)]
    practice: Option<u32>,
    #[arg(long)]
    accuracy: Option<u32>,
    /// Reset today's progress
    #[arg(long)]
    reset: bool,
  },

  /// Mark words as mastered
  Master { ids: Vec<i64> },

  /// Reset mastery for words
  Unmaster { ids: Vec<i64> },

  /// Export the notebook as JSON
  Export { path: Option<PathBuf> },

  /// Replace the notebook with a JSON export
  Import {
    path: PathBuf,
    #[arg(long)]
    yes: bool,
  },
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sana_notebook=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  let cli = Cli::parse();

  let db_path = cli.db.unwrap_or_else(config::load_database_path);
  let store = SqliteStore::open(&db_path)
    .with_context(|| format!("Failed to open database {}", db_path.display()))?;
  let app = App::new(store, config::load_srs_config());

  let now = Utc::now();
  let stdout = io::stdout();
  let mut out = stdout.lock();
  let stdin = io::stdin();
  let mut input = stdin.lock();

  match cli.command {
    Commands::Add {
      finnish,
      english,
      category,
      example,
      notes,
      no_learn,
    } => {
      let new = NewWord {
        finnish: split_variants(&finnish),
        english: split_variants(&english),
        category,
        example,
        notes,
        learn: !no_learn,
      };
      handlers::library::add(&app, new, now, &mut out)
    }
    Commands::Learn { ids } => handlers::library::learn(&app, &ids, now, &mut out),
    Commands::Unlearn { ids } => handlers::library::unlearn(&app, &ids, &mut out),
    Commands::List {
      all,
      category,
      sort,
      desc,
      orphans,
    } => {
      let options = ListOptions {
        all,
        category,
        sort: match sort {
          SortArg::Fi => SortKey::Finnish,
          SortArg::En => SortKey::English,
        },
        descending: desc,
        orphans,
      };
      handlers::library::list(&app, &options, &mut out)
    }
    Commands::Search { query } => handlers::library::search(&app, &query, &mut out),
    Commands::Edit {
      id,
      finnish,
      english,
      category,
      example,
      notes,
    } => {
      let edit = WordEdit {
        finnish: finnish.as_deref().map(split_variants),
        english: english.as_deref().map(split_variants),
        category,
        example,
        notes,
      };
      handlers::library::edit(&app, id, edit, now, &mut out)
    }
    Commands::Delete { id, mode, yes } => {
      let mode = match mode {
        DeleteArg::Learning => DeleteMode::LearningOnly,
        DeleteArg::Database => DeleteMode::DatabaseOnly,
        DeleteArg::Both => DeleteMode::Both,
      };
      if mode == DeleteMode::Both
        && !yes
        && !handlers::confirm("Delete the word and its progress? Type \"yes\" to confirm:", &mut input, &mut out)?
      {
        writeln!(out, "Deletion cancelled.")?;
        return Ok(());
      }
      handlers::library::delete(&app, id, mode, &mut out)
    }
    Commands::Due { limit } => handlers::study::due(&app, limit, now, &mut out),
    Commands::Practice { mode, count } => {
      let mode = PracticeMode::from_str(&mode)
        .with_context(|| format!("Unknown practice mode \"{}\"", mode))?;
      let mut rng = handlers::study::practice_rng();
      handlers::study::practice(&app, mode, count, &mut input, &mut out, &mut rng, Utc::now)
    }
    Commands::Stats => handlers::progress::stats(&app, now, &mut out),
    Commands::Goals {
      learn,
      practice,
      accuracy,
      reset,
    } => {
      let changes = GoalChanges {
        words_to_learn: learn,
        words_to_practice: practice,
        target_accuracy: accuracy,
        reset,
      };
      handlers::progress::goals(&app, changes, now, &mut out)
    }
    Commands::Master { ids } => handlers::library::master(&app, &ids, now, &mut out),
    Commands::Unmaster { ids } => handlers::library::unmaster(&app, &ids, &mut out),
    Commands::Export { path } => {
      let path = path.unwrap_or_else(paths::default_export_path);
      handlers::transfer::export(&app, &path, &mut out)
    }
    Commands::Import { path, yes } => {
      if !yes
        && !handlers::confirm(
          "This replaces every word and all progress. Type \"yes\" to continue:",
          &mut input,
          &mut out,
        )?
      {
        writeln!(out, "Import cancelled.")?;
        return Ok(());
      }
      handlers::transfer::import(&app, &path, &mut out)
    }
  }
}
