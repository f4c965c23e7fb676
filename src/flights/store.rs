//! Flight database connection management
//!
//! One WAL-configured SQLite connection guarded by a mutex. Every tool
//! invocation acquires the connection through a scoped closure and releases
//! it on all exit paths, including query failure.

use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Arc;

use super::migrations::run_migrations;
use crate::error::Result;

/// Flight store configuration
#[derive(Debug, Clone)]
pub struct FlightStoreConfig {
    /// SQLite database path, or ":memory:"
    pub db_path: String,
}

/// Flight store wrapping SQLite
pub struct FlightStore {
    config: FlightStoreConfig,
    conn: Arc<Mutex<Connection>>,
}

impl FlightStore {
    /// Open or create the flight database with the given configuration
    pub fn open(config: FlightStoreConfig) -> Result<Self> {
        let conn = Self::create_connection(&config)?;

        run_migrations(&conn)?;

        Ok(Self {
            config,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::open(FlightStoreConfig {
            db_path: ":memory:".to_string(),
        })
    }

    fn create_connection(config: &FlightStoreConfig) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = if config.db_path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(&config.db_path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open_with_flags(&config.db_path, flags)?
        };

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=30000;
            PRAGMA cache_size=-16000;
            PRAGMA temp_store=MEMORY;
            PRAGMA foreign_keys=ON;
            "#,
        )?;

        Ok(conn)
    }

    /// Execute a function with the connection.
    ///
    /// The lock is held for the duration of the closure and released on
    /// every exit path, so a failing query can never leak the connection.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Get database path
    pub fn db_path(&self) -> &str {
        &self.config.db_path
    }
}

impl Clone for FlightStore {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            conn: self.conn.clone(),
        }
    }
}
