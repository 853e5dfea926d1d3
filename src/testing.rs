//! Test utilities for database setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with a migrated notebook.db in a temporary directory.
///
/// The directory (and database) is removed when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// notebook.db connection with the full schema (all migrations)
    pub conn: Connection,
}

impl TestEnv {
    /// Create a test environment using `crate::db::init_db()`
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let conn = crate::db::init_db(&temp.path().join("notebook.db"))?;
        Ok(Self { temp, conn })
    }

    pub fn db_path(&self) -> PathBuf {
        self.temp.path().join("notebook.db")
    }
}

/// Fixed clock used across tests
pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-10T12:00:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
