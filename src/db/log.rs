use crate::errors::AppResult;
use ansi_term::Colour;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "reset" => Colour::Red,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn print_log(conn: &Connection) -> AppResult<()> {
    let entries = load_log(conn)?;

    if entries.is_empty() {
        println!("📜 Internal log is empty.");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let op_w = entries
        .iter()
        .map(|e| e.operation.len())
        .max()
        .unwrap_or(4);

    println!("📜 Internal log:\n");

    for e in entries {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(e.date);

        let padding = " ".repeat(op_w.saturating_sub(e.operation.len()));
        let op = color_for_operation(&e.operation).paint(e.operation.as_str());
        let target = if e.target.is_empty() {
            String::new()
        } else {
            format!(" ({})", e.target)
        };

        println!(
            "{:>id_w$}: {} | {}{}{} => {}",
            e.id,
            date,
            op,
            padding,
            target,
            e.message,
            id_w = id_w
        );
    }

    Ok(())
}
