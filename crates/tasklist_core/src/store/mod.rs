//! Persistent key/value store adapter.
//!
//! # Responsibility
//! - Define the get/set contract for named blobs in durable local storage.
//! - Keep storage technology out of list and settings logic.
//!
//! # Invariants
//! - A successful `save` is visible to every later `load` of the same key.
//! - Adapters hold no domain logic; blobs are opaque strings.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Key holding the serialized task list.
pub const TODOS_KEY: &str = "todos";
/// Key holding the theme name (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";
/// Key holding the background skin name.
pub const BACKGROUND_KEY: &str = "background";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a store adapter.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite rejected a read or write.
    Sqlite(rusqlite::Error),
    /// The file was stamped by a newer binary; nothing was migrated.
    SchemaTooNew { found: u32, supported: u32 },
    /// Migration `version` failed and was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Write rejected because the store would exceed its byte budget.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::Migration { version, source } => {
                write!(f, "store migration {version} failed: {source}")
            }
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "store quota exceeded writing `{key}`: {required_bytes} bytes > {quota_bytes}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous get/set of named blobs.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
