//! SQLite-backed key/value store.
//!
//! # Invariants
//! - The owned connection has migrations applied (see [`crate::db::open_db`]).
//! - `save` is an upsert; the last write for a key wins.

use super::{KeyValueStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key/value store persisting entries into the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Borrows the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, blob],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::store::KeyValueStore;

    #[test]
    fn save_overwrites_previous_value() {
        let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
        store.save("theme", "light").unwrap();
        store.save("theme", "dark").unwrap();

        assert_eq!(store.load("theme").unwrap().as_deref(), Some("dark"));
        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        assert!(store.load("todos").unwrap().is_none());
    }

    #[test]
    fn remove_deletes_entry() {
        let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
        store.save("background", "background-galaxy").unwrap();
        store.remove("background").unwrap();
        assert!(store.load("background").unwrap().is_none());
    }
}
