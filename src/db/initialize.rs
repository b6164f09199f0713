use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension};

/// Check whether a table exists.
fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

/// Initialize the database schema.
///
/// - `kv_store`: the key-value storage workouts are persisted to
/// - `log`: internal audit trail of operations
///
/// Safe to run on every start.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let fresh = !table_exists(conn, "kv_store")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL      -- ISO 8601 timestamp
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;

    if fresh {
        tracing::info!("created workout storage schema");
    }
    Ok(())
}
