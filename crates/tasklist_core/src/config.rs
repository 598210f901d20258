//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Locate the store database and optional log directory.
//! - Pick the log level for the current build.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never touches the filesystem.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
pub const LOG_DIR_ENV: &str = "TASKLIST_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKLIST_LOG_LEVEL";
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Effective runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_dir = match read(LOG_DIR_ENV).map(PathBuf::from) {
            Some(path) if !path.is_absolute() => return Err(ConfigError::RelativeLogDir(path)),
            other => other,
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(level.as_str()).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = resolve(&[(DB_PATH_ENV, "  ")]).unwrap();
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn explicit_values_are_used() {
        let config = resolve(&[
            (DB_PATH_ENV, "/data/todos.sqlite3"),
            (LOG_DIR_ENV, "/var/log/tasklist"),
            (LOG_LEVEL_ENV, "Warning"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/todos.sqlite3"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/tasklist")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            resolve(&[(LOG_LEVEL_ENV, "chatty")]),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            resolve(&[(LOG_DIR_ENV, "logs")]),
            Err(ConfigError::RelativeLogDir(_))
        ));
    }
}
