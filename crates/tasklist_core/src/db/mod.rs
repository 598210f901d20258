//! SQLite bootstrap for [`crate::store::SqliteKeyValueStore`].
//!
//! # Invariants
//! - Connections handed out here carry the latest `kv_entries` schema,
//!   stamped in `PRAGMA user_version`.
//! - Failures surface as [`crate::store::StoreError`]; this layer has no error
//!   type of its own.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
