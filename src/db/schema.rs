use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Idempotent: safe to run on every open
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY,
      -- JSON arrays of variants
      finnish TEXT NOT NULL,
      english TEXT NOT NULL,
      category TEXT NOT NULL DEFAULT 'other',
      example TEXT NOT NULL DEFAULT '',
      notes TEXT NOT NULL DEFAULT '',
      added_at TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );

    -- No foreign key: an entry may outlive its word (orphaned)
    CREATE TABLE IF NOT EXISTS learning_entries (
      word_id INTEGER PRIMARY KEY,
      started_learning_at TEXT,
      mastered INTEGER NOT NULL DEFAULT 0,
      mastered_at TEXT,
      practice_count INTEGER NOT NULL DEFAULT 0,
      correct_count INTEGER NOT NULL DEFAULT 0,
      streak_fi_en INTEGER NOT NULL DEFAULT 0,
      streak_en_fi INTEGER NOT NULL DEFAULT 0,
      attempts_fi_en INTEGER NOT NULL DEFAULT 0,
      attempts_en_fi INTEGER NOT NULL DEFAULT 0,
      correct_fi_en INTEGER NOT NULL DEFAULT 0,
      correct_en_fi INTEGER NOT NULL DEFAULT 0,
      last_practiced_fi_en TEXT,
      last_practiced_en_fi TEXT,
      ease_factor REAL,
      interval_days INTEGER NOT NULL DEFAULT 0,
      repetitions INTEGER NOT NULL DEFAULT 0,
      next_review_date TEXT,
      last_reviewed TEXT
    );

    CREATE TABLE IF NOT EXISTS categories (
      name TEXT PRIMARY KEY,
      position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS settings (
      key TEXT PRIMARY KEY,
      value TEXT NOT NULL
    );

    -- Single row (id = 1)
    CREATE TABLE IF NOT EXISTS daily_goals (
      id INTEGER PRIMARY KEY CHECK (id = 1),
      last_date TEXT NOT NULL,
      words_to_learn INTEGER NOT NULL DEFAULT 3,
      words_to_practice INTEGER NOT NULL DEFAULT 10,
      target_accuracy INTEGER NOT NULL DEFAULT 80,
      words_learned INTEGER NOT NULL DEFAULT 0,
      words_practiced INTEGER NOT NULL DEFAULT 0,
      correct_answers INTEGER NOT NULL DEFAULT 0
    );

    -- Default settings
    INSERT OR IGNORE INTO settings (key, value) VALUES ('total_practice_sessions', '0');

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_entries_next_review ON learning_entries(next_review_date);
    CREATE INDEX IF NOT EXISTS idx_words_category ON words(category);
    "#,
  )
}
