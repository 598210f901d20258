//! Core domain logic for the task list.
//! This crate is the single source of truth for list invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod feedback;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use app::{EventOutcome, TaskApp, UiEvent};
pub use config::{AppConfig, ConfigError};
pub use feedback::toast::{Severity, Toast, ToastQueue, TOAST_TTL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::settings::{Background, CosmeticSettings, Theme};
pub use model::task::{Task, TaskFilter, TaskId, TaskRecord, UnknownFilterError};
pub use service::settings_service::{SettingsError, SettingsService};
pub use service::task_service::{
    EditOutcome, TaskListService, TaskServiceError, TaskServiceResult, ViewEntry,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use view::render::{render_list, DisplayRow, RenderedList, ViewQuery};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
