//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `SANA_CONFIG`: Explicit config.toml location (see config.rs)
//!
//! Separate data directories keep independent notebooks apart:
//! ```bash
//! DATA_DIR=data/spanish sana stats
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default SQLite database path
pub fn db_path() -> PathBuf {
    PathBuf::from(data_dir()).join("notebook.db")
}

/// Config file candidates, most specific first
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = env::var("SANA_CONFIG") {
        candidates.push(PathBuf::from(path));
    }
    candidates.push(PathBuf::from(data_dir()).join("config.toml"));
    candidates.push(PathBuf::from("config.toml"));
    candidates
}

/// Default location for `sana export`
pub fn default_export_path() -> PathBuf {
    PathBuf::from(data_dir()).join("notebook-export.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    // DATA_DIR is read once per process, so only the default layout is checked

    #[test]
    fn test_data_dir_default() {
        assert!(!data_dir().is_empty());
    }

    #[test]
    fn test_db_path_format() {
        assert!(db_path().ends_with("notebook.db"));
    }

    #[test]
    fn test_config_candidates_end_with_cwd() {
        let candidates = config_candidates();
        assert_eq!(candidates.last(), Some(&PathBuf::from("config.toml")));
        assert!(candidates.iter().any(|p| p.starts_with(data_dir())));
    }
}
