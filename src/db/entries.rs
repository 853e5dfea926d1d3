//! Learning entry rows (study set + SM-2 state)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use super::parse_optional_timestamp;
use crate::domain::{DirectionStats, LearningEntry};

fn ts(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|dt| dt.to_rfc3339())
}

pub fn upsert_entry(conn: &Connection, entry: &LearningEntry) -> Result<()> {
    conn.execute(
        r#"
    INSERT INTO learning_entries (word_id, started_learning_at, mastered, mastered_at, practice_count,
                                  correct_count, streak_fi_en, streak_en_fi, attempts_fi_en, attempts_en_fi,
                                  correct_fi_en, correct_en_fi, last_practiced_fi_en, last_practiced_en_fi,
                                  ease_factor, interval_days, repetitions, next_review_date, last_reviewed)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
    ON CONFLICT(word_id) DO UPDATE SET
      started_learning_at = excluded.started_learning_at,
      mastered = excluded.mastered,
      mastered_at = excluded.mastered_at,
      practice_count = excluded.practice_count,
      correct_count = excluded.correct_count,
      streak_fi_en = excluded.streak_fi_en,
      streak_en_fi = excluded.streak_en_fi,
      attempts_fi_en = excluded.attempts_fi_en,
      attempts_en_fi = excluded.attempts_en_fi,
      correct_fi_en = excluded.correct_fi_en,
      correct_en_fi = excluded.correct_en_fi,
      last_practiced_fi_en = excluded.last_practiced_fi_en,
      last_practiced_en_fi = excluded.last_practiced_en_fi,
      ease_factor = excluded.ease_factor,
      interval_days = excluded.interval_days,
      repetitions = excluded.repetitions,
      next_review_date = excluded.next_review_date,
      last_reviewed = excluded.last_reviewed
    "#,
        params![
            entry.word_id,
            ts(entry.started_learning_at),
            entry.mastered,
            ts(entry.mastered_at),
            entry.practice_count,
            entry.correct_count,
            entry.fi_en.streak,
            entry.en_fi.streak,
            entry.fi_en.attempts,
            entry.en_fi.attempts,
            entry.fi_en.correct,
            entry.en_fi.correct,
            ts(entry.fi_en.last_practiced),
            ts(entry.en_fi.last_practiced),
            entry.ease_factor,
            entry.interval,
            entry.repetitions,
            ts(entry.next_review_date),
            ts(entry.last_reviewed),
        ],
    )?;
    Ok(())
}

const SELECT_ENTRY: &str = r#"
    SELECT word_id, started_learning_at, mastered, mastered_at, practice_count, correct_count,
           streak_fi_en, streak_en_fi, attempts_fi_en, attempts_en_fi, correct_fi_en, correct_en_fi,
           last_practiced_fi_en, last_practiced_en_fi, ease_factor, interval_days, repetitions,
           next_review_date, last_reviewed
    FROM learning_entries
"#;

pub fn get_entry(conn: &Connection, word_id: i64) -> Result<Option<LearningEntry>> {
    let mut stmt = conn.prepare(&format!("{} WHERE word_id = ?1", SELECT_ENTRY))?;
    let mut rows = stmt.query(params![word_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_entry(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_all_entries(conn: &Connection) -> Result<Vec<LearningEntry>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY word_id", SELECT_ENTRY))?;
    let entries = stmt
        .query_map([], row_to_entry)?
        .collect::<Result<Vec<_>>>()?;
    Ok(entries)
}

pub fn get_entry_word_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT word_id FROM learning_entries ORDER BY word_id")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(ids)
}

pub fn delete_entry(conn: &Connection, word_id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM learning_entries WHERE word_id = ?1", params![word_id])?;
    Ok(deleted > 0)
}

pub(crate) fn row_to_entry(row: &rusqlite::Row) -> Result<LearningEntry> {
    Ok(LearningEntry {
        word_id: row.get(0)?,
        started_learning_at: parse_optional_timestamp(1, row.get(1)?)?,
        mastered: row.get(2)?,
        mastered_at: parse_optional_timestamp(3, row.get(3)?)?,
        practice_count: row.get(4)?,
        correct_count: row.get(5)?,
        fi_en: DirectionStats {
            streak: row.get(6)?,
            attempts: row.get(8)?,
            correct: row.get(10)?,
            last_practiced: parse_optional_timestamp(12, row.get(12)?)?,
        },
        en_fi: DirectionStats {
            streak: row.get(7)?,
            attempts: row.get(9)?,
            correct: row.get(11)?,
            last_practiced: parse_optional_timestamp(13, row.get(13)?)?,
        },
        ease_factor: row.get(14)?,
        interval: row.get(15)?,
        repetitions: row.get(16)?,
        next_review_date: parse_optional_timestamp(17, row.get(17)?)?,
        last_reviewed: parse_optional_timestamp(18, row.get(18)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_now, TestEnv};
    use chrono::Duration;

    fn practiced(word_id: i64) -> LearningEntry {
        let mut entry = LearningEntry::new(word_id, test_now());
        entry.practice_count = 5;
        entry.correct_count = 4;
        entry.fi_en = DirectionStats {
            streak: 2,
            attempts: 3,
            correct: 3,
            last_practiced: Some(test_now()),
        };
        entry.en_fi.attempts = 2;
        entry.en_fi.correct = 1;
        entry.ease_factor = Some(2.36);
        entry.interval = 3;
        entry.repetitions = 2;
        entry.next_review_date = Some(test_now() + Duration::days(3));
        entry.last_reviewed = Some(test_now());
        entry
    }

    #[test]
    fn test_upsert_and_get_entry() {
        let env = TestEnv::new().unwrap();
        upsert_entry(&env.conn, &practiced(7)).unwrap();
        let loaded = get_entry(&env.conn, 7).unwrap().unwrap();
        assert_eq!(loaded, practiced(7));
        assert!(get_entry(&env.conn, 8).unwrap().is_none());
    }

    #[test]
    fn test_upsert_overwrites_progress() {
        let env = TestEnv::new().unwrap();
        upsert_entry(&env.conn, &LearningEntry::new(1, test_now())).unwrap();
        upsert_entry(&env.conn, &practiced(1)).unwrap();

        let all = get_all_entries(&env.conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].repetitions, 2);
    }

    #[test]
    fn test_entry_without_word_allowed() {
        let env = TestEnv::new().unwrap();
        upsert_entry(&env.conn, &LearningEntry::unstarted(99)).unwrap();
        assert_eq!(get_entry_word_ids(&env.conn).unwrap(), vec![99]);
    }

    #[test]
    fn test_delete_entry() {
        let env = TestEnv::new().unwrap();
        upsert_entry(&env.conn, &practiced(1)).unwrap();
        assert!(delete_entry(&env.conn, 1).unwrap());
        assert!(get_all_entries(&env.conn).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_timestamp_is_error() {
        let env = TestEnv::new().unwrap();
        env.conn
            .execute(
                "INSERT INTO learning_entries (word_id, next_review_date) VALUES (3, 'soon')",
                [],
            )
            .unwrap();
        assert!(get_entry(&env.conn, 3).is_err());
    }
}
