use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result};

use crate::services::goals::{DailyGoals, GoalTargets};

pub fn get_daily_goals(conn: &Connection) -> Result<Option<DailyGoals>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT last_date, words_to_learn, words_to_practice, target_accuracy,
           words_learned, words_practiced, correct_answers
    FROM daily_goals WHERE id = 1
    "#,
    )?;
    let mut rows = stmt.query([])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let last_date: String = row.get(0)?;
    let last_date = NaiveDate::parse_from_str(&last_date, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(Some(DailyGoals {
        last_date,
        goals: GoalTargets {
            words_to_learn: row.get(1)?,
            words_to_practice: row.get(2)?,
            target_accuracy: row.get(3)?,
        },
        words_learned: row.get(4)?,
        words_practiced: row.get(5)?,
        correct_answers: row.get(6)?,
    }))
}

pub fn save_daily_goals(conn: &Connection, goals: &DailyGoals) -> Result<()> {
    conn.execute(
        r#"
    INSERT OR REPLACE INTO daily_goals (id, last_date, words_to_learn, words_to_practice, target_accuracy,
                                        words_learned, words_practiced, correct_answers)
    VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            goals.last_date.format("%Y-%m-%d").to_string(),
            goals.goals.words_to_learn,
            goals.goals.words_to_practice,
            goals.goals.target_accuracy,
            goals.words_learned,
            goals.words_practiced,
            goals.correct_answers,
        ],
    )?;
    Ok(())
}

/// Today's goals: stored targets, counters rolled over if the stored day is stale.
///
/// Without a stored row, `defaults` seed a fresh record.
pub fn load_goals_for(conn: &Connection, today: NaiveDate, defaults: GoalTargets) -> Result<DailyGoals> {
    match get_daily_goals(conn)? {
        Some(mut goals) => {
            if goals.rollover(today) {
                tracing::debug!(%today, "daily goals rolled over");
                save_daily_goals(conn, &goals)?;
            }
            Ok(goals)
        }
        None => Ok(DailyGoals::new(today, defaults)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_no_row_uses_defaults() {
        let env = TestEnv::new().unwrap();
        assert!(get_daily_goals(&env.conn).unwrap().is_none());
        let goals = load_goals_for(&env.conn, day(10), GoalTargets::default()).unwrap();
        assert_eq!(goals, DailyGoals::new(day(10), GoalTargets::default()));
    }

    #[test]
    fn test_save_and_load_same_day() {
        let env = TestEnv::new().unwrap();
        let mut goals = DailyGoals::new(day(10), GoalTargets::default());
        goals.record_word_added();
        goals.record_practice(6, 5);
        save_daily_goals(&env.conn, &goals).unwrap();

        let loaded = load_goals_for(&env.conn, day(10), GoalTargets::default()).unwrap();
        assert_eq!(loaded, goals);
    }

    #[test]
    fn test_load_next_day_rolls_over_and_persists() {
        let env = TestEnv::new().unwrap();
        let mut goals = DailyGoals::new(day(10), GoalTargets {
            words_to_learn: 5,
            words_to_practice: 15,
            target_accuracy: 70,
        });
        goals.record_practice(6, 5);
        save_daily_goals(&env.conn, &goals).unwrap();

        let loaded = load_goals_for(&env.conn, day(11), GoalTargets::default()).unwrap();
        assert_eq!(loaded.words_practiced, 0);
        assert_eq!(loaded.goals.words_to_learn, 5);

        let stored = get_daily_goals(&env.conn).unwrap().unwrap();
        assert_eq!(stored.last_date, day(11));
    }
}
