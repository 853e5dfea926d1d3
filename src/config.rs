//! Application configuration.
//!
//! Scheduling and mastery constants are overridable without code changes.
//! Priority for every value: config.toml > environment (.env) > default.
//!
//! ```toml
//! [database]
//! path = "data/notebook.db"
//!
//! [sm2]
//! default_ease_factor = 2.5
//! min_ease_factor = 1.3
//! initial_intervals = [1, 3]
//! max_interval_days = 36500
//!
//! [mastery]
//! streak_required = 3
//! min_attempts = 4
//! accuracy_threshold = 0.85
//!
//! [goals]
//! words_to_learn = 3
//! words_to_practice = 10
//! target_accuracy = 80
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::services::goals::GoalTargets;
use crate::srs::{MasteryConfig, Sm2Config};

/// All tunable learning parameters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SrsConfig {
    pub sm2: Sm2Config,
    pub mastery: MasteryConfig,
    pub goals: GoalTargets,
}

// ==================== File Format ====================

/// Configuration file structure for config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseSection>,
    sm2: Option<Sm2Section>,
    mastery: Option<MasterySection>,
    goals: Option<GoalsSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Sm2Section {
    default_ease_factor: Option<f64>,
    min_ease_factor: Option<f64>,
    initial_intervals: Option<[u32; 2]>,
    max_interval_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct MasterySection {
    streak_required: Option<u32>,
    min_attempts: Option<u32>,
    accuracy_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct GoalsSection {
    words_to_learn: Option<u32>,
    words_to_practice: Option<u32>,
    target_accuracy: Option<u32>,
}

/// Read the first config.toml that exists and parses
fn read_app_config() -> AppConfig {
    for path in paths::config_candidates() {
        if let Some(config) = read_config_file(&path) {
            return config;
        }
    }
    AppConfig::default()
}

fn read_config_file(path: &Path) -> Option<AppConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => {
            tracing::info!("Using config file: {}", path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

// ==================== Database Configuration ====================

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    if let Some(path) = read_app_config().database.and_then(|db| db.path) {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = paths::db_path();
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Learning Configuration ====================

/// Load learning parameters with priority: config.toml > .env > default
pub fn load_srs_config() -> SrsConfig {
    let _ = dotenvy::dotenv();

    let mut config = SrsConfig::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    apply_file_overrides(&mut config, read_app_config());
    config
}

fn parse_env<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

fn parse_intervals(raw: &str) -> Option<[u32; 2]> {
    let mut parts = raw.split(',').map(|p| p.trim().parse::<u32>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(first)), Some(Ok(second)), None) => Some([first, second]),
        _ => None,
    }
}

fn apply_env_overrides(config: &mut SrsConfig, lookup: impl Fn(&str) -> Option<String>) {
    let sm2 = Sm2Section {
        default_ease_factor: parse_env(&lookup, "SANA_DEFAULT_EASE_FACTOR"),
        min_ease_factor: parse_env(&lookup, "SANA_MIN_EASE_FACTOR"),
        initial_intervals: lookup("SANA_INITIAL_INTERVALS").and_then(|raw| {
            let parsed = parse_intervals(&raw);
            if parsed.is_none() {
                tracing::warn!("Ignoring invalid value for SANA_INITIAL_INTERVALS: {:?}", raw);
            }
            parsed
        }),
        max_interval_days: parse_env(&lookup, "SANA_MAX_INTERVAL_DAYS"),
    };
    let mastery = MasterySection {
        streak_required: parse_env(&lookup, "SANA_STREAK_REQUIRED"),
        min_attempts: parse_env(&lookup, "SANA_MIN_ATTEMPTS"),
        accuracy_threshold: parse_env(&lookup, "SANA_ACCURACY_THRESHOLD"),
    };
    merge_sm2(&mut config.sm2, sm2);
    merge_mastery(&mut config.mastery, mastery);
}

fn apply_file_overrides(config: &mut SrsConfig, file: AppConfig) {
    if let Some(sm2) = file.sm2 {
        merge_sm2(&mut config.sm2, sm2);
    }
    if let Some(mastery) = file.mastery {
        merge_mastery(&mut config.mastery, mastery);
    }
    if let Some(goals) = file.goals {
        merge_goals(&mut config.goals, goals);
    }
}

/// Merge a section into `target`, keeping the previous value for anything out of range
fn merge_sm2(target: &mut Sm2Config, section: Sm2Section) {
    let mut next = *target;
    if let Some(v) = section.min_ease_factor {
        next.min_ease_factor = v;
    }
    if let Some(v) = section.default_ease_factor {
        next.default_ease_factor = v;
    }
    if let Some(v) = section.initial_intervals {
        next.initial_intervals = v;
    }
    if let Some(v) = section.max_interval_days {
        if v > 0 {
            next.max_interval_days = v;
        } else {
            tracing::warn!("max_interval_days must be positive, keeping {}", target.max_interval_days);
        }
    }

    if !(next.min_ease_factor > 0.0 && next.min_ease_factor.is_finite()) {
        tracing::warn!("min_ease_factor must be positive, keeping {}", target.min_ease_factor);
        next.min_ease_factor = target.min_ease_factor;
    }
    if !(next.default_ease_factor >= next.min_ease_factor && next.default_ease_factor.is_finite()) {
        tracing::warn!(
            "default_ease_factor must be at least min_ease_factor, keeping {}",
            target.default_ease_factor
        );
        next.default_ease_factor = target.default_ease_factor.max(next.min_ease_factor);
    }
    *target = next;
}

fn merge_mastery(target: &mut MasteryConfig, section: MasterySection) {
    if let Some(v) = section.streak_required {
        target.streak_required = v;
    }
    if let Some(v) = section.min_attempts {
        target.min_attempts = v;
    }
    if let Some(v) = section.accuracy_threshold {
        if (0.0..=1.0).contains(&v) {
            target.accuracy_threshold = v;
        } else {
            tracing::warn!("accuracy_threshold must be within 0..=1, ignoring {}", v);
        }
    }
}

fn merge_goals(target: &mut GoalTargets, section: GoalsSection) {
    if let Some(v) = section.words_to_learn.filter(|v| *v > 0) {
        target.words_to_learn = v;
    }
    if let Some(v) = section.words_to_practice.filter(|v| *v > 0) {
        target.words_to_practice = v;
    }
    if let Some(v) = section.target_accuracy.filter(|v| (1..=100).contains(v)) {
        target.target_accuracy = v;
    }
}

// ==================== Display Configuration ====================

/// Entries shown in "most practiced" and "needs attention" lists
pub const TOP_WORDS_LIMIT: usize = 5;

/// Practice count before a word can be flagged as needing attention
pub const ATTENTION_MIN_PRACTICE: u32 = 3;
