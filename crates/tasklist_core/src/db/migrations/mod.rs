//! Schema migrations for the `kv_entries` table.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - Each migration runs in one transaction with its `PRAGMA user_version`
//!   stamp; a failing step leaves the previous version in place.

use crate::store::{StoreError, StoreResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection up to [`latest_version`].
///
/// # Errors
/// - `StoreError::SchemaTooNew` when the file was written by a newer binary.
/// - `StoreError::Migration` naming the version that failed.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    apply_pending(conn, MIGRATIONS)
}

/// Reads the schema version stamped on the connection.
pub fn current_user_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn apply_pending(conn: &mut Connection, migrations: &[Migration]) -> StoreResult<()> {
    let found = current_user_version(conn)?;
    let supported = migrations.last().map_or(0, |migration| migration.version);
    if found > supported {
        return Err(StoreError::SchemaTooNew { found, supported });
    }

    for migration in migrations.iter().filter(|migration| migration.version > found) {
        run_step(conn, migration).map_err(|source| StoreError::Migration {
            version: migration.version,
            source,
        })?;
    }
    Ok(())
}

fn run_step(conn: &mut Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    tx.commit()
}
