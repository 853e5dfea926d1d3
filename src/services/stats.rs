//! Progress statistics over the study set.

use chrono::{DateTime, Utc};

use crate::config::{ATTENTION_MIN_PRACTICE, TOP_WORDS_LIMIT};
use crate::domain::{Collection, WordView};
use crate::srs::{review_stats, ReviewStats};

/// Headline counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickStats {
    pub total_in_database: usize,
    pub total_learning: usize,
    pub mastered: usize,
    /// In the study set but not mastered
    pub learning: usize,
}

impl QuickStats {
    pub fn mastered_percent(&self) -> u32 {
        percent(self.mastered, self.total_learning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: String,
    pub total: usize,
    pub mastered: usize,
}

impl CategoryStats {
    pub fn percent(&self) -> u32 {
        percent(self.mastered, self.total)
    }
}

/// Everything shown on the statistics screen
#[derive(Debug, Clone)]
pub struct StatsReport<'a> {
    pub quick: QuickStats,
    pub review: ReviewStats,
    pub categories: Vec<CategoryStats>,
    pub most_practiced: Vec<WordView<'a>>,
    pub needs_attention: Vec<WordView<'a>>,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Accuracy of a word as a rounded percentage (0 when never practiced)
pub fn accuracy_percent(view: &WordView<'_>) -> u32 {
    percent(view.correct_count() as usize, view.practice_count() as usize)
}

pub fn quick_stats(collection: &Collection) -> QuickStats {
    let learning = collection.learning_views();
    let mastered = learning.iter().filter(|v| v.is_mastered()).count();
    QuickStats {
        total_in_database: collection.words.len(),
        total_learning: learning.len(),
        mastered,
        learning: learning.len() - mastered,
    }
}

/// Per-category totals for categories with at least one learning word, in category order
pub fn category_breakdown(collection: &Collection) -> Vec<CategoryStats> {
    let learning = collection.learning_views();
    let mut known: Vec<&str> = collection.categories.iter().map(String::as_str).collect();
    // Words may carry categories that were never registered
    for view in &learning {
        if !known.contains(&view.word.category.as_str()) {
            known.push(view.word.category.as_str());
        }
    }

    known
        .into_iter()
        .filter_map(|category| {
            let in_category: Vec<_> = learning.iter().filter(|v| v.word.category == category).collect();
            if in_category.is_empty() {
                return None;
            }
            Some(CategoryStats {
                category: category.to_string(),
                total: in_category.len(),
                mastered: in_category.iter().filter(|v| v.is_mastered()).count(),
            })
        })
        .collect()
}

/// Most practiced learning words, highest count first
pub fn most_practiced(collection: &Collection) -> Vec<WordView<'_>> {
    let mut views: Vec<_> = collection
        .learning_views()
        .into_iter()
        .filter(|v| v.practice_count() > 0)
        .collect();
    views.sort_by(|a, b| b.practice_count().cmp(&a.practice_count()));
    views.truncate(TOP_WORDS_LIMIT);
    views
}

/// Learning words practiced often but answered correctly less than half the time
pub fn needs_attention(collection: &Collection) -> Vec<WordView<'_>> {
    collection
        .learning_views()
        .into_iter()
        .filter(|v| v.practice_count() >= ATTENTION_MIN_PRACTICE && v.correct_count() * 2 < v.practice_count())
        .take(TOP_WORDS_LIMIT)
        .collect()
}

pub fn build_report(collection: &Collection, now: DateTime<Utc>) -> StatsReport<'_> {
    StatsReport {
        quick: quick_stats(collection),
        review: review_stats(&collection.learning_entries, now),
        categories: category_breakdown(collection),
        most_practiced: most_practiced(collection),
        needs_attention: needs_attention(collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LearningEntry, Word};
    use crate::testing::test_now;

    fn collection() -> Collection {
        let mut c = Collection::default();
        let words = [
            (1, "talo", "house", "home"),
            (2, "juosta", "to run", "verbs"),
            (3, "kissa", "cat", "animals"),
            (4, "koira", "dog", "animals"),
            (5, "syödä", "to eat", "verbs"),
        ];
        for (id, fi, en, category) in words {
            c.words.push(Word::new(id, vec![fi.into()], vec![en.into()], category.into(), test_now()));
        }
        for id in [1, 2, 3, 5] {
            c.learning_entries.push(LearningEntry::new(id, test_now()));
        }
        c
    }

    fn practice(c: &mut Collection, id: i64, count: u32, correct: u32) {
        let entry = c.entry_mut(id).unwrap();
        entry.practice_count = count;
        entry.correct_count = correct;
    }

    #[test]
    fn test_quick_stats() {
        let mut c = collection();
        c.entry_mut(2).unwrap().mastered = true;
        // Orphaned entries are not counted
        c.learning_entries.push(LearningEntry::new(99, test_now()));

        let stats = quick_stats(&c);
        assert_eq!(stats, QuickStats {
            total_in_database: 5,
            total_learning: 4,
            mastered: 1,
            learning: 3,
        });
        assert_eq!(stats.mastered_percent(), 25);
    }

    #[test]
    fn test_category_breakdown() {
        let mut c = collection();
        c.entry_mut(5).unwrap().mastered = true;
        let breakdown = category_breakdown(&c);
        let names: Vec<&str> = breakdown.iter().map(|s| s.category.as_str()).collect();
        // Follows the category list order; "home" is not a default category
        assert_eq!(names, vec!["animals", "verbs", "home"]);

        let verbs = breakdown.iter().find(|s| s.category == "verbs").unwrap();
        assert_eq!((verbs.total, verbs.mastered, verbs.percent()), (2, 1, 50));
        let animals = breakdown.iter().find(|s| s.category == "animals").unwrap();
        assert_eq!(animals.total, 1);
    }

    #[test]
    fn test_most_practiced() {
        let mut c = collection();
        practice(&mut c, 1, 3, 3);
        practice(&mut c, 3, 8, 2);
        practice(&mut c, 5, 5, 4);
        let ids: Vec<i64> = most_practiced(&c).iter().map(|v| v.word.id).collect();
        assert_eq!(ids, vec![3, 5, 1]);
        assert_eq!(accuracy_percent(&most_practiced(&c)[1]), 80);
    }

    #[test]
    fn test_needs_attention() {
        let mut c = collection();
        practice(&mut c, 1, 2, 0);
        practice(&mut c, 2, 4, 2);
        practice(&mut c, 3, 5, 2);
        let ids: Vec<i64> = needs_attention(&c).iter().map(|v| v.word.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_build_report() {
        let mut c = collection();
        practice(&mut c, 1, 1, 1);
        let report = build_report(&c, test_now());
        assert_eq!(report.quick.total_learning, 4);
        assert_eq!(report.review.due_now, 4);
        assert_eq!(report.most_practiced.len(), 1);
        assert!(report.needs_attention.is_empty());
    }
}
