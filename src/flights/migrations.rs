//! Database migrations for the flight store

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < SCHEMA_VERSION {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Initial schema (v1)
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Route durations, one row per (origin, destination)
        CREATE TABLE IF NOT EXISTS FlightDuration (
            Source TEXT NOT NULL,
            Destination TEXT NOT NULL,
            Duration REAL NOT NULL,
            PRIMARY KEY (Source, Destination)
        );

        -- Fares with a validity window, possibly several per route
        CREATE TABLE IF NOT EXISTS FlightPrice (
            Source TEXT NOT NULL,
            Destination TEXT NOT NULL,
            StartDate TEXT NOT NULL,
            EndDate TEXT NOT NULL,
            Price REAL NOT NULL,
            PRIMARY KEY (Source, Destination, StartDate)
        );

        CREATE INDEX IF NOT EXISTS idx_duration_source ON FlightDuration(Source, Duration);
        CREATE INDEX IF NOT EXISTS idx_price_source ON FlightPrice(Source, Price);
        "#,
    )?;

    conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i32 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
