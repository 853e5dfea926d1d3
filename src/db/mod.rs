pub mod categories;
pub mod entries;
pub mod goals;
pub mod schema;
pub mod settings;
pub mod words;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Result};
use std::path::Path;

// Re-export all public items from submodules
pub use categories::*;
pub use entries::*;
pub use goals::*;
pub use schema::run_migrations;
pub use settings::*;
pub use words::*;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Open (creating if needed) and migrate the notebook database
pub fn init_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .log_warn(&format!("Could not create data directory {}", parent.display()));
    }

    // Create backup before migrations if database exists
    if path.exists() {
        let backup_path = path.with_extension("db.backup");
        std::fs::copy(path, &backup_path).log_warn("Could not create database backup");
    }

    let conn = Connection::open(path)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Parse an RFC 3339 column value, failing the row on malformed text
pub(crate) fn parse_timestamp(idx: usize, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_optional_timestamp(idx: usize, value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(idx, &v)).transpose()
}
