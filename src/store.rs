//! Persistence backends for a [`Collection`].
//!
//! `SqliteStore` is the working store; `JsonStore` reads and writes the single-document
//! export format.

use rusqlite::Connection;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::db;
use crate::domain::{default_categories, Collection, COLLECTION_VERSION};

const COLLECTION_VERSION_KEY: &str = "collection_version";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load and save a whole collection
pub trait Store {
    fn load(&self) -> Result<Collection, StoreError>;
    fn save(&self, collection: &Collection) -> Result<(), StoreError>;
}

/// Drop duplicate entries for the same word, keeping the first
fn dedupe_entries(collection: &mut Collection) {
    let mut seen = HashSet::new();
    collection.learning_entries.retain(|e| {
        let first = seen.insert(e.word_id);
        if !first {
            tracing::warn!(word_id = e.word_id, "dropping duplicate learning entry");
        }
        first
    });
}

// ==================== SQLite ====================

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and migrate) the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: db::init_db(path)?,
        })
    }

    /// Wrap an already migrated connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Direct access for data kept outside the collection (daily goals)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn load(&self) -> Result<Collection, StoreError> {
        let mut categories = db::get_categories(&self.conn)?;
        if categories.is_empty() {
            categories = default_categories();
        }
        let version = db::get_setting(&self.conn, COLLECTION_VERSION_KEY)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(COLLECTION_VERSION);

        let mut collection = Collection {
            version,
            words: db::get_all_words(&self.conn)?,
            learning_entries: db::get_all_entries(&self.conn)?,
            categories,
            stats: db::get_practice_stats(&self.conn)?,
        };
        dedupe_entries(&mut collection);

        tracing::debug!(
            words = collection.words.len(),
            entries = collection.learning_entries.len(),
            "loaded collection from database"
        );
        Ok(collection)
    }

    /// Write the collection in one transaction, removing rows no longer present
    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;

        let word_ids: HashSet<i64> = collection.words.iter().map(|w| w.id).collect();
        for id in db::get_word_ids(&tx)? {
            if !word_ids.contains(&id) {
                db::delete_word(&tx, id)?;
            }
        }
        for word in &collection.words {
            db::upsert_word(&tx, word)?;
        }

        let entry_ids: HashSet<i64> = collection.learning_entries.iter().map(|e| e.word_id).collect();
        for id in db::get_entry_word_ids(&tx)? {
            if !entry_ids.contains(&id) {
                db::delete_entry(&tx, id)?;
            }
        }
        for entry in &collection.learning_entries {
            db::upsert_entry(&tx, entry)?;
        }

        db::replace_categories(&tx, &collection.categories)?;
        db::set_practice_stats(&tx, &collection.stats)?;
        db::set_setting(&tx, COLLECTION_VERSION_KEY, &collection.version.to_string())?;

        tx.commit()?;
        Ok(())
    }
}

// ==================== JSON ====================

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    /// A missing file is an empty collection
    fn load(&self) -> Result<Collection, StoreError> {
        if !self.path.exists() {
            tracing::info!("No collection at {}, starting empty", self.path.display());
            return Ok(Collection::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let mut collection: Collection = serde_json::from_str(&contents)?;
        dedupe_entries(&mut collection);
        Ok(collection)
    }

    /// Pretty-printed, written to a sibling temp file then renamed into place
    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(collection)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
