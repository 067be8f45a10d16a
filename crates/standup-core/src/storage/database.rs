//! SQLite-backed key-value store.
//!
//! Holds the previous-session record under [`PREV_SESSION_KEY`].

use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::host::SessionStore;
use crate::session::PrevSessionRecord;

pub const PREV_SESSION_KEY: &str = "standup-extension.prevSession";

/// SQLite database holding application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/standup/standup.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("standup.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SessionStore for Database {
    fn load_prev_session(&mut self) -> Result<Option<String>> {
        Ok(self.kv_get(PREV_SESSION_KEY)?)
    }

    fn save_prev_session(&mut self, record: &PrevSessionRecord) -> Result<()> {
        self.kv_set(PREV_SESSION_KEY, &record.to_json()?)?;
        Ok(())
    }

    fn clear_prev_session(&mut self) -> Result<()> {
        debug!("clearing previous-session record");
        self.kv_delete(PREV_SESSION_KEY)?;
        Ok(())
    }
}
