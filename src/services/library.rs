//! Word library management.
//!
//! Word definitions and the study set are edited separately: deleting a word
//! definition can leave its progress behind as an orphaned entry, and removing a
//! word from the study set keeps the definition.

use chrono::{DateTime, Utc};

use crate::domain::word::clean_variants;
use crate::domain::{Collection, LearningEntry, Word, WordView};

/// Library errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    /// Finnish or English text is blank
    #[error("{0} text cannot be empty")]
    EmptyField(&'static str),
    /// A word with the same Finnish text already exists
    #[error("word already exists with id {id}")]
    Duplicate { id: i64, learning: bool },
    #[error("no word with id {0}")]
    UnknownWord(i64),
}

/// Input for a new word
#[derive(Debug, Clone)]
pub struct NewWord {
    pub finnish: Vec<String>,
    pub english: Vec<String>,
    pub category: Option<String>,
    pub example: String,
    pub notes: String,
    /// Add to the study set right away
    pub learn: bool,
}

impl NewWord {
    pub fn new(finnish: Vec<String>, english: Vec<String>) -> Self {
        Self {
            finnish,
            english,
            category: None,
            example: String::new(),
            notes: String::new(),
            learn: true,
        }
    }
}

/// Changes to a word definition. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct WordEdit {
    pub finnish: Option<Vec<String>>,
    pub english: Option<Vec<String>>,
    pub category: Option<String>,
    pub example: Option<String>,
    pub notes: Option<String>,
}

/// What `delete_word` removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Drop the learning entry, keep the word definition
    LearningOnly,
    /// Drop the word definition, keep its progress as an orphan
    DatabaseOnly,
    /// Drop both
    Both,
}

impl DeleteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteMode::LearningOnly => "learning",
            DeleteMode::DatabaseOnly => "database",
            DeleteMode::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "learning" | "learning-only" => Some(DeleteMode::LearningOnly),
            "database" | "db" | "database-only" => Some(DeleteMode::DatabaseOnly),
            "both" => Some(DeleteMode::Both),
            _ => None,
        }
    }
}

/// Sort field for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Finnish,
    English,
}

fn required(values: Vec<String>, field: &'static str) -> Result<Vec<String>, LibraryError> {
    let values = clean_variants(values);
    if values.is_empty() {
        return Err(LibraryError::EmptyField(field));
    }
    Ok(values)
}

/// First word (other than `except`) sharing a Finnish variant with `finnish`
fn find_duplicate(collection: &Collection, finnish: &[String], except: Option<i64>) -> Option<LibraryError> {
    collection
        .words
        .iter()
        .filter(|w| Some(w.id) != except)
        .find(|w| finnish.iter().any(|f| w.has_finnish(f)))
        .map(|w| LibraryError::Duplicate {
            id: w.id,
            learning: collection.is_learning(w.id),
        })
}

fn normalize_category(category: &str) -> String {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        "other".to_string()
    } else {
        category
    }
}

/// Add a new word definition (and its learning entry unless `learn` is false).
///
/// Returns the new word id.
pub fn add_word(collection: &mut Collection, new: NewWord, now: DateTime<Utc>) -> Result<i64, LibraryError> {
    let finnish = required(new.finnish, "Finnish")?;
    let english = required(new.english, "English")?;
    if let Some(err) = find_duplicate(collection, &finnish, None) {
        return Err(err);
    }

    let category = normalize_category(new.category.as_deref().unwrap_or(""));
    if collection.ensure_category(&category) {
        tracing::info!(category = %category, "registered new category");
    }

    let id = collection.next_word_id();
    let mut word = Word::new(id, finnish, english, category, now);
    word.example = new.example.trim().to_string();
    word.notes = new.notes.trim().to_string();
    collection.words.push(word);

    if new.learn {
        collection.learning_entries.push(LearningEntry::new(id, now));
    }
    tracing::info!(word_id = id, learn = new.learn, "added word");
    Ok(id)
}

/// Edit a word definition. Learning progress is untouched.
pub fn update_word(
    collection: &mut Collection,
    id: i64,
    edit: WordEdit,
    now: DateTime<Utc>,
) -> Result<(), LibraryError> {
    if collection.word(id).is_none() {
        return Err(LibraryError::UnknownWord(id));
    }

    let finnish = edit.finnish.map(|f| required(f, "Finnish")).transpose()?;
    let english = edit.english.map(|e| required(e, "English")).transpose()?;
    if let Some(finnish) = &finnish {
        if let Some(err) = find_duplicate(collection, finnish, Some(id)) {
            return Err(err);
        }
    }
    let category = edit.category.as_deref().map(normalize_category);
    if let Some(category) = &category {
        collection.ensure_category(category);
    }

    let word = collection.word_mut(id).ok_or(LibraryError::UnknownWord(id))?;
    if let Some(finnish) = finnish {
        word.finnish = finnish;
    }
    if let Some(english) = english {
        word.english = english;
    }
    if let Some(category) = category {
        word.category = category;
    }
    if let Some(example) = edit.example {
        word.example = example.trim().to_string();
    }
    if let Some(notes) = edit.notes {
        word.notes = notes.trim().to_string();
    }
    word.updated_at = now;
    Ok(())
}

/// Delete a word definition and/or its learning entry
pub fn delete_word(collection: &mut Collection, id: i64, mode: DeleteMode) -> Result<(), LibraryError> {
    let has_word = collection.word(id).is_some();
    let has_entry = collection.is_learning(id);

    let found = match mode {
        DeleteMode::LearningOnly => has_entry,
        DeleteMode::DatabaseOnly => has_word,
        DeleteMode::Both => has_word || has_entry,
    };
    if !found {
        return Err(LibraryError::UnknownWord(id));
    }

    if matches!(mode, DeleteMode::DatabaseOnly | DeleteMode::Both) {
        collection.words.retain(|w| w.id != id);
    }
    if matches!(mode, DeleteMode::LearningOnly | DeleteMode::Both) {
        collection.learning_entries.retain(|e| e.word_id != id);
    }
    tracing::info!(word_id = id, mode = mode.as_str(), "deleted word");
    Ok(())
}

/// Put an existing word into the study set. Returns false if already learning.
pub fn add_to_learning(collection: &mut Collection, id: i64, now: DateTime<Utc>) -> Result<bool, LibraryError> {
    if collection.word(id).is_none() {
        return Err(LibraryError::UnknownWord(id));
    }
    if collection.is_learning(id) {
        return Ok(false);
    }
    collection.learning_entries.push(LearningEntry::new(id, now));
    Ok(true)
}

/// Remove a word from the study set, discarding its progress. Returns false if not learning.
pub fn remove_from_learning(collection: &mut Collection, id: i64) -> bool {
    let before = collection.learning_entries.len();
    collection.learning_entries.retain(|e| e.word_id != id);
    collection.learning_entries.len() != before
}

/// Mark entries mastered. Returns how many changed state.
pub fn mark_mastered(collection: &mut Collection, ids: &[i64], now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for entry in collection.learning_entries.iter_mut().filter(|e| ids.contains(&e.word_id)) {
        if !entry.mastered {
            entry.mark_mastered(now);
            changed += 1;
        }
    }
    changed
}

/// Clear mastery (and streaks) for entries. Returns how many entries were reset.
pub fn reset_mastery(collection: &mut Collection, ids: &[i64]) -> usize {
    let mut reset = 0;
    for entry in collection.learning_entries.iter_mut().filter(|e| ids.contains(&e.word_id)) {
        entry.reset_mastery();
        reset += 1;
    }
    reset
}

/// Case-insensitive substring search over every variant and the notes
pub fn search<'a>(collection: &'a Collection, query: &str) -> Vec<WordView<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let matches = |values: &[String]| values.iter().any(|v| v.to_lowercase().contains(&needle));

    collection
        .views()
        .into_iter()
        .filter(|v| {
            matches(&v.word.finnish)
                || matches(&v.word.english)
                || v.word.notes.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sort views by the first variant of the chosen side, ignoring case
pub fn sort_views(views: &mut [WordView<'_>], key: SortKey, descending: bool) {
    let text = |v: &WordView<'_>| match key {
        SortKey::Finnish => v.word.primary_finnish().to_lowercase(),
        SortKey::English => v.word.primary_english().to_lowercase(),
    };
    views.sort_by(|a, b| {
        let ordering = text(a).cmp(&text(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Views of words in `category` (study set only when `learning_only`)
pub fn views_in_category<'a>(collection: &'a Collection, category: &str, learning_only: bool) -> Vec<WordView<'a>> {
    let category = category.trim().to_lowercase();
    collection
        .views()
        .into_iter()
        .filter(|v| v.word.category == category)
        .filter(|v| !learning_only || v.is_learning())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_now;

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn library() -> Collection {
        let mut c = Collection::default();
        add_word(&mut c, NewWord::new(words(&["talo"]), words(&["house"])), test_now()).unwrap();
        let mut run = NewWord::new(words(&["juosta", "juoksen"]), words(&["to run"]));
        run.category = Some("Verbs".into());
        run.notes = "type 3".into();
        add_word(&mut c, run, test_now()).unwrap();
        let mut cat = NewWord::new(words(&["kissa"]), words(&["cat"]));
        cat.learn = false;
        cat.category = Some("animals".into());
        add_word(&mut c, cat, test_now()).unwrap();
        c
    }

    #[test]
    fn test_add_word_assigns_ids_and_entries() {
        let c = library();
        assert_eq!(c.words.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(c.is_learning(1));
        assert!(c.is_learning(2));
        assert!(!c.is_learning(3));
        assert_eq!(c.word(2).unwrap().category, "verbs");
        assert_eq!(c.word(1).unwrap().category, "other");
        assert_eq!(c.entry(1).unwrap().started_learning_at, Some(test_now()));
    }

    #[test]
    fn test_add_word_registers_new_category() {
        let mut c = library();
        let mut word = NewWord::new(words(&["sauna"]), words(&["sauna"]));
        word.category = Some(" Culture ".into());
        add_word(&mut c, word, test_now()).unwrap();
        assert!(c.categories.contains(&"culture".to_string()));
    }

    #[test]
    fn test_add_word_rejects_empty() {
        let mut c = Collection::default();
        let err = add_word(&mut c, NewWord::new(words(&["  "]), words(&["house"])), test_now()).unwrap_err();
        assert_eq!(err, LibraryError::EmptyField("Finnish"));
        let err = add_word(&mut c, NewWord::new(words(&["talo"]), vec![]), test_now()).unwrap_err();
        assert_eq!(err, LibraryError::EmptyField("English"));
        assert!(c.words.is_empty());
    }

    #[test]
    fn test_add_word_rejects_duplicate_variant() {
        let mut c = library();
        let err = add_word(&mut c, NewWord::new(words(&["JUOKSEN"]), words(&["I run"])), test_now()).unwrap_err();
        assert_eq!(err, LibraryError::Duplicate { id: 2, learning: true });

        let err = add_word(&mut c, NewWord::new(words(&["kissa"]), words(&["cat"])), test_now()).unwrap_err();
        assert_eq!(err, LibraryError::Duplicate { id: 3, learning: false });
    }

    #[test]
    fn test_next_id_follows_highest() {
        let mut c = library();
        delete_word(&mut c, 1, DeleteMode::Both).unwrap();
        let id = add_word(&mut c, NewWord::new(words(&["koira"]), words(&["dog"])), test_now()).unwrap();
        assert_eq!(id, 4);
    }

    #[test]
    fn test_next_id_skips_orphaned_entry() {
        let mut c = library();
        let sun = add_word(&mut c, NewWord::new(words(&["aurinko"]), words(&["sun"])), test_now()).unwrap();
        delete_word(&mut c, sun, DeleteMode::DatabaseOnly).unwrap();
        let id = add_word(&mut c, NewWord::new(words(&["koira"]), words(&["dog"])), test_now()).unwrap();
        assert_eq!(id, sun + 1);
    }

    #[test]
    fn test_update_word_keeps_progress() {
        let mut c = library();
        c.entry_mut(1).unwrap().practice_count = 7;
        let later = test_now() + chrono::Duration::hours(1);
        let edit = WordEdit {
            english: Some(words(&["house", "building"])),
            notes: Some("  common ".into()),
            ..WordEdit::default()
        };
        update_word(&mut c, 1, edit, later).unwrap();

        let word = c.word(1).unwrap();
        assert_eq!(word.english, vec!["house", "building"]);
        assert_eq!(word.notes, "common");
        assert_eq!(word.updated_at, later);
        assert_eq!(word.added_at, test_now());
        assert_eq!(c.entry(1).unwrap().practice_count, 7);
    }

    #[test]
    fn test_update_word_validation() {
        let mut c = library();
        let edit = WordEdit {
            finnish: Some(words(&["kissa"])),
            ..WordEdit::default()
        };
        assert_eq!(
            update_word(&mut c, 1, edit, test_now()),
            Err(LibraryError::Duplicate { id: 3, learning: false })
        );
        // Renaming to its own variant is fine
        let edit = WordEdit {
            finnish: Some(words(&["juoksen"])),
            ..WordEdit::default()
        };
        assert!(update_word(&mut c, 2, edit, test_now()).is_ok());
        assert_eq!(
            update_word(&mut c, 42, WordEdit::default(), test_now()),
            Err(LibraryError::UnknownWord(42))
        );
    }

    #[test]
    fn test_delete_modes() {
        let mut c = library();
        delete_word(&mut c, 1, DeleteMode::LearningOnly).unwrap();
        assert!(c.word(1).is_some());
        assert!(!c.is_learning(1));

        delete_word(&mut c, 2, DeleteMode::DatabaseOnly).unwrap();
        assert!(c.word(2).is_none());
        assert!(c.is_learning(2));
        assert_eq!(c.orphaned_entries().len(), 1);

        delete_word(&mut c, 2, DeleteMode::Both).unwrap();
        assert!(c.orphaned_entries().is_empty());

        assert_eq!(
            delete_word(&mut c, 3, DeleteMode::LearningOnly),
            Err(LibraryError::UnknownWord(3))
        );
    }

    #[test]
    fn test_add_and_remove_learning() {
        let mut c = library();
        assert_eq!(add_to_learning(&mut c, 3, test_now()), Ok(true));
        assert_eq!(add_to_learning(&mut c, 3, test_now()), Ok(false));
        assert_eq!(add_to_learning(&mut c, 99, test_now()), Err(LibraryError::UnknownWord(99)));
        assert!(remove_from_learning(&mut c, 3));
        assert!(!remove_from_learning(&mut c, 3));
    }

    #[test]
    fn test_mark_and_reset_mastery() {
        let mut c = library();
        c.entry_mut(1).unwrap().fi_en.streak = 4;
        assert_eq!(mark_mastered(&mut c, &[1, 2, 3], test_now()), 2);
        assert_eq!(mark_mastered(&mut c, &[1], test_now()), 0);
        assert!(c.entry(1).unwrap().mastered);

        assert_eq!(reset_mastery(&mut c, &[1, 3]), 1);
        let entry = c.entry(1).unwrap();
        assert!(!entry.mastered);
        assert_eq!(entry.mastered_at, None);
        assert_eq!(entry.fi_en.streak, 0);
    }

    #[test]
    fn test_search() {
        let c = library();
        let ids = |q: &str| search(&c, q).iter().map(|v| v.word.id).collect::<Vec<_>>();
        assert_eq!(ids("JUOK"), vec![2]);
        assert_eq!(ids("ca"), vec![3]);
        assert_eq!(ids("type"), vec![2]);
        assert!(ids(" ").is_empty());
    }

    #[test]
    fn test_sort_views() {
        let c = library();
        let mut views = c.views();
        sort_views(&mut views, SortKey::Finnish, false);
        let order: Vec<&str> = views.iter().map(|v| v.word.primary_finnish()).collect();
        assert_eq!(order, vec!["juosta", "kissa", "talo"]);

        sort_views(&mut views, SortKey::English, true);
        let order: Vec<&str> = views.iter().map(|v| v.word.primary_english()).collect();
        assert_eq!(order, vec!["to run", "house", "cat"]);
    }

    #[test]
    fn test_views_in_category() {
        let c = library();
        assert_eq!(views_in_category(&c, "Animals", false).len(), 1);
        assert!(views_in_category(&c, "animals", true).is_empty());
    }

    #[test]
    fn test_delete_mode_from_str() {
        assert_eq!(DeleteMode::from_str("db"), Some(DeleteMode::DatabaseOnly));
        assert_eq!(DeleteMode::from_str("both"), Some(DeleteMode::Both));
        assert_eq!(DeleteMode::from_str("all"), None);
    }
}
