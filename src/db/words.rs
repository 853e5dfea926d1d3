//! Word definition rows. Variant lists are stored as JSON arrays.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Result};

use super::parse_timestamp;
use crate::domain::{OneOrMany, Word};

fn encode_variants(variants: &[String]) -> Result<String> {
    serde_json::to_string(variants).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Accepts both a JSON array and a bare JSON string
fn decode_variants(idx: usize, raw: &str) -> Result<Vec<String>> {
    serde_json::from_str::<OneOrMany<String>>(raw)
        .map(OneOrMany::into_vec)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn upsert_word(conn: &Connection, word: &Word) -> Result<()> {
    conn.execute(
        r#"
    INSERT INTO words (id, finnish, english, category, example, notes, added_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(id) DO UPDATE SET
      finnish = excluded.finnish,
      english = excluded.english,
      category = excluded.category,
      example = excluded.example,
      notes = excluded.notes,
      added_at = excluded.added_at,
      updated_at = excluded.updated_at
    "#,
        params![
            word.id,
            encode_variants(&word.finnish)?,
            encode_variants(&word.english)?,
            word.category,
            word.example,
            word.notes,
            word.added_at.to_rfc3339(),
            word.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_word_by_id(conn: &Connection, id: i64) -> Result<Option<Word>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, finnish, english, category, example, notes, added_at, updated_at
    FROM words WHERE id = ?1
    "#,
    )?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_word(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_all_words(conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, finnish, english, category, example, notes, added_at, updated_at
    FROM words ORDER BY id
    "#,
    )?;
    let words = stmt
        .query_map([], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_word_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM words ORDER BY id")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(ids)
}

pub fn delete_word(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM words WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

pub(crate) fn row_to_word(row: &rusqlite::Row) -> Result<Word> {
    let finnish: String = row.get(1)?;
    let english: String = row.get(2)?;
    let added_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Word {
        id: row.get(0)?,
        finnish: decode_variants(1, &finnish)?,
        english: decode_variants(2, &english)?,
        category: row.get(3)?,
        example: row.get(4)?,
        notes: row.get(5)?,
        added_at: parse_timestamp(6, &added_at)?,
        updated_at: parse_timestamp(7, &updated_at)?,
    })
}
