use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Word text as it appears in stored data: a single string or a list of variants.
///
/// Only used at the serialization boundary. Inside the crate every text field is
/// a canonical `Vec<String>` with the preferred variant first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
  One(T),
  Many(Vec<T>),
}

impl<T> OneOrMany<T> {
  pub fn into_vec(self) -> Vec<T> {
    match self {
      Self::One(value) => vec![value],
      Self::Many(values) => values,
    }
  }
}

/// Resolve a `OneOrMany<String>` into trimmed, non-empty variants
pub fn deserialize_variants<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = OneOrMany::<String>::deserialize(deserializer)?;
  Ok(clean_variants(raw.into_vec()))
}

/// Write a single variant as a plain string, several as an array
pub fn serialize_variants<S>(variants: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  match variants {
    [single] => serializer.serialize_str(single),
    _ => variants.serialize(serializer),
  }
}

pub fn clean_variants(values: Vec<String>) -> Vec<String> {
  values
    .into_iter()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
    .collect()
}

/// A word definition: a Finnish/English pair plus descriptive metadata.
///
/// Learning progress lives in [`super::LearningEntry`], keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
  pub id: i64,
  #[serde(deserialize_with = "deserialize_variants", serialize_with = "serialize_variants")]
  pub finnish: Vec<String>,
  #[serde(deserialize_with = "deserialize_variants", serialize_with = "serialize_variants")]
  pub english: Vec<String>,
  #[serde(default = "default_category")]
  pub category: String,
  #[serde(default)]
  pub example: String,
  #[serde(default)]
  pub notes: String,
  #[serde(default = "Utc::now")]
  pub added_at: DateTime<Utc>,
  #[serde(default = "Utc::now")]
  pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
  "other".to_string()
}

impl Word {
  pub fn new(id: i64, finnish: Vec<String>, english: Vec<String>, category: String, now: DateTime<Utc>) -> Self {
    Self {
      id,
      finnish: clean_variants(finnish),
      english: clean_variants(english),
      category,
      example: String::new(),
      notes: String::new(),
      added_at: now,
      updated_at: now,
    }
  }

  /// Preferred Finnish form, used as the question text and for sorting
  pub fn primary_finnish(&self) -> &str {
    self.finnish.first().map(String::as_str).unwrap_or("")
  }

  pub fn primary_english(&self) -> &str {
    self.english.first().map(String::as_str).unwrap_or("")
  }

  /// All Finnish variants joined for display ("juosta / juoksen")
  pub fn finnish_display(&self) -> String {
    self.finnish.join(" / ")
  }

  pub fn english_display(&self) -> String {
    self.english.join(" / ")
  }

  /// True if any Finnish variant equals `text`, ignoring case and surrounding whitespace
  pub fn has_finnish(&self, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    self.finnish.iter().any(|f| f.to_lowercase() == needle)
  }
}
