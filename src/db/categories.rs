use rusqlite::{params, Connection, Result};

/// Categories in display order
pub fn get_categories(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY position, name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(names)
}

/// Replace the whole category list, keeping the given order
pub fn replace_categories(conn: &Connection, categories: &[String]) -> Result<()> {
    conn.execute("DELETE FROM categories", [])?;
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO categories (name, position) VALUES (?1, ?2)")?;
    for (position, name) in categories.iter().enumerate() {
        stmt.execute(params![name, position as i64])?;
    }
    Ok(())
}
