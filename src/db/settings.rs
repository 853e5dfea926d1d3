use rusqlite::{params, Connection, Result};

use super::{parse_timestamp, LogOnError};
use crate::domain::PracticeStats;

const TOTAL_PRACTICE_SESSIONS: &str = "total_practice_sessions";
const LAST_PRACTICE_DATE: &str = "last_practice_date";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
    Ok(())
}

pub fn get_practice_stats(conn: &Connection) -> Result<PracticeStats> {
    let total_practice_sessions = get_setting(conn, TOTAL_PRACTICE_SESSIONS)?
        .and_then(|v| v.parse::<u32>().log_warn("Invalid total_practice_sessions setting"))
        .unwrap_or(0);
    let last_practice_date = get_setting(conn, LAST_PRACTICE_DATE)?
        .map(|v| parse_timestamp(0, &v))
        .transpose()?;

    Ok(PracticeStats {
        total_practice_sessions,
        last_practice_date,
    })
}

pub fn set_practice_stats(conn: &Connection, stats: &PracticeStats) -> Result<()> {
    set_setting(
        conn,
        TOTAL_PRACTICE_SESSIONS,
        &stats.total_practice_sessions.to_string(),
    )?;
    match stats.last_practice_date {
        Some(date) => set_setting(conn, LAST_PRACTICE_DATE, &date.to_rfc3339()),
        None => delete_setting(conn, LAST_PRACTICE_DATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_now, TestEnv};

    #[test]
    fn test_get_set_setting() {
        let env = TestEnv::new().unwrap();
        assert_eq!(get_setting(&env.conn, "missing").unwrap(), None);
        set_setting(&env.conn, "k", "v1").unwrap();
        set_setting(&env.conn, "k", "v2").unwrap();
        assert_eq!(get_setting(&env.conn, "k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_practice_stats_defaults() {
        let env = TestEnv::new().unwrap();
        assert_eq!(get_practice_stats(&env.conn).unwrap(), PracticeStats::default());
    }

    #[test]
    fn test_practice_stats_persist() {
        let env = TestEnv::new().unwrap();
        let stats = PracticeStats {
            total_practice_sessions: 12,
            last_practice_date: Some(test_now()),
        };
        set_practice_stats(&env.conn, &stats).unwrap();
        assert_eq!(get_practice_stats(&env.conn).unwrap(), stats);

        set_practice_stats(&env.conn, &PracticeStats::default()).unwrap();
        assert_eq!(get_practice_stats(&env.conn).unwrap(), PracticeStats::default());
    }

    #[test]
    fn test_invalid_session_count_falls_back() {
        let env = TestEnv::new().unwrap();
        set_setting(&env.conn, TOTAL_PRACTICE_SESSIONS, "lots").unwrap();
        assert_eq!(get_practice_stats(&env.conn).unwrap().total_practice_sessions, 0);
    }
}
