//! SQLite schema for the sports events table

use rusqlite::{Connection, Result};

/// Create the `sports` table if it does not exist
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS sports (
            id INTEGER PRIMARY KEY,
            name TEXT,
            advertised_start_time DATETIME
        )
        "#,
        [],
    )?;

    Ok(())
}
