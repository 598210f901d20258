//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the single process-wide session and serialize access to it.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are applied strictly in arrival order under one lock.
//! - Task ids cross the boundary as UUID strings and are session-scoped.

use session::{with_session, Session};
use std::time::Instant;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CosmeticSettings, EventOutcome, Severity, TaskFilter, TaskId, Toast, UiEvent,
};

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Transient notification for the UI to show for three seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub message: String,
    /// `info|success|error`.
    pub severity: String,
}

/// Result envelope for every mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Affected task id, when one exists after the call.
    pub task_id: Option<String>,
    pub message: String,
    /// Feedback produced by this call, oldest first.
    pub toasts: Vec<ToastItem>,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub task_id: String,
    /// Position in the unfiltered list.
    pub position: u32,
    pub title: String,
    pub done: bool,
    pub compact: bool,
}

/// Rendered list plus cosmetic state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoViewResponse {
    pub items: Vec<TodoItem>,
    pub theme: String,
    pub background: String,
    pub message: String,
}

/// Current cosmetic settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub theme: String,
    pub compact_mode: bool,
    pub background: String,
    pub message: String,
}

/// Adds a task from the text-entry action.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String) -> TodoActionResponse {
    dispatch("todo_add", |app, now| {
        let before = app.tasks().len();
        let outcome = app.handle(UiEvent::AddRequested(title), now);
        // A failed write still appends in memory; the row needs its id.
        let task_id = if app.tasks().len() > before {
            app.tasks().last().map(|task| task.id)
        } else {
            None
        };
        (outcome, task_id)
    })
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(task_id: String) -> TodoActionResponse {
    dispatch_for("todo_toggle", task_id, UiEvent::ToggleRequested)
}

/// Replaces a task title with the text returned by the edit prompt.
///
/// Blank or unchanged titles succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit(task_id: String, title: String) -> TodoActionResponse {
    dispatch_for_id("todo_edit", task_id, move |app, id, now| {
        match app.handle(UiEvent::EditRequested(id), now) {
            EventOutcome::EditPrompt { .. } => {
                app.handle(UiEvent::EditSubmitted { id, title }, now)
            }
            other => other,
        }
    })
}

/// Deletes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(task_id: String) -> TodoActionResponse {
    dispatch_for("todo_delete", task_id, UiEvent::DeleteRequested)
}

/// Applies a finished drag gesture.
///
/// Indices are rows of the last [`todo_view`] result.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_reorder(old_index: u32, new_index: u32) -> TodoActionResponse {
    dispatch("todo_reorder", |app, now| {
        let outcome = app.handle(
            UiEvent::DragEnded {
                old_index: old_index as usize,
                new_index: new_index as usize,
            },
            now,
        );
        (outcome, None)
    })
}

/// Removes every task.
///
/// # FFI contract
/// - Call only after the user accepted the confirm/cancel dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_clear_all() -> TodoActionResponse {
    dispatch("todo_clear_all", |app, now| {
        app.handle(UiEvent::ClearAllRequested, now);
        (app.handle(UiEvent::ClearAllConfirmed, now), None)
    })
}

/// Selects filter/search and returns the rendered list.
///
/// `filter` is `all|done|not-done`; unknown values fall back to `all`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_view(filter: String, search: String) -> TodoViewResponse {
    let (filter, message) = match filter.parse::<TaskFilter>() {
        Ok(filter) => (filter, String::new()),
        Err(err) => (TaskFilter::All, err.to_string()),
    };

    let result = with_session(|app| {
        let now = Instant::now();
        app.handle(UiEvent::FilterChanged(filter), now);
        app.handle(UiEvent::SearchChanged(search), now);
        app.render()
    });

    match result {
        Ok(rendered) => TodoViewResponse {
            items: rendered
                .rows
                .into_iter()
                .map(|row| TodoItem {
                    task_id: row.id.to_string(),
                    position: u32::try_from(row.position).unwrap_or(u32::MAX),
                    title: row.title,
                    done: row.done,
                    compact: row.compact,
                })
                .collect(),
            theme: rendered.theme.as_str().to_string(),
            background: rendered.background.to_string(),
            message,
        },
        Err(err) => TodoViewResponse {
            items: Vec::new(),
            theme: String::new(),
            background: String::new(),
            message: format!("todo_view failed: {err}"),
        },
    }
}

/// Reads cosmetic settings.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_get() -> SettingsResponse {
    settings_call("settings_get", None)
}

/// Switches light/dark theme (persisted).
#[flutter_rust_bridge::frb(sync)]
pub fn settings_toggle_theme() -> SettingsResponse {
    settings_call("settings_toggle_theme", Some(UiEvent::ThemeToggled))
}

/// Flips compact density for this session.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_toggle_compact() -> SettingsResponse {
    settings_call("settings_toggle_compact", Some(UiEvent::CompactToggled))
}

/// Advances to the next background skin (persisted, wraps around).
#[flutter_rust_bridge::frb(sync)]
pub fn settings_cycle_background() -> SettingsResponse {
    settings_call("settings_cycle_background", Some(UiEvent::BackgroundCycled))
}

fn settings_call(op: &str, event: Option<UiEvent>) -> SettingsResponse {
    let result = with_session(|app| {
        let outcome = event.map(|event| app.handle(event, Instant::now()));
        app.toast_queue_mut().drain();
        (outcome, app.settings())
    });

    match result {
        Ok((Some(EventOutcome::Failed(message)), settings)) => {
            settings_response(false, settings, message)
        }
        Ok((_, settings)) => settings_response(true, settings, String::new()),
        Err(err) => SettingsResponse {
            ok: false,
            theme: String::new(),
            compact_mode: false,
            background: String::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn settings_response(ok: bool, settings: CosmeticSettings, message: String) -> SettingsResponse {
    SettingsResponse {
        ok,
        theme: settings.theme.as_str().to_string(),
        compact_mode: settings.compact_mode,
        background: settings.background.name().to_string(),
        message,
    }
}

fn dispatch_for(
    op: &str,
    task_id: String,
    event: impl FnOnce(TaskId) -> UiEvent,
) -> TodoActionResponse {
    dispatch_for_id(op, task_id, |app, id, now| app.handle(event(id), now))
}

fn dispatch_for_id(
    op: &str,
    task_id: String,
    f: impl FnOnce(&mut Session, TaskId, Instant) -> EventOutcome,
) -> TodoActionResponse {
    let id = match task_id.trim().parse::<TaskId>() {
        Ok(id) => id,
        Err(_) => return failure(format!("{op} failed: invalid task id `{task_id}`")),
    };
    dispatch(op, |app, now| (f(app, id, now), Some(id)))
}

fn dispatch(
    op: &str,
    f: impl FnOnce(&mut Session, Instant) -> (EventOutcome, Option<TaskId>),
) -> TodoActionResponse {
    let result = with_session(|app| {
        let (outcome, task_id) = f(app, Instant::now());
        let toasts = app.toast_queue_mut().drain();
        let task_id = task_id.filter(|id| app.task_service().position_of(*id).is_some());
        (outcome, task_id, toasts)
    });

    match result {
        Ok((outcome, task_id, toasts)) => {
            let toasts: Vec<ToastItem> = toasts.iter().map(to_toast_item).collect();
            let (ok, message) = match outcome {
                EventOutcome::Failed(message) => (false, message),
                _ => (
                    true,
                    toasts
                        .last()
                        .map(|toast| toast.message.clone())
                        .unwrap_or_default(),
                ),
            };
            TodoActionResponse {
                ok,
                task_id: task_id.map(|id| id.to_string()),
                message,
                toasts,
            }
        }
        Err(err) => failure(format!("{op} failed: {err}")),
    }
}

fn failure(message: String) -> TodoActionResponse {
    TodoActionResponse {
        ok: false,
        task_id: None,
        toasts: vec![ToastItem {
            message: message.clone(),
            severity: Severity::Error.as_str().to_string(),
        }],
        message,
    }
}

fn to_toast_item(toast: &Toast) -> ToastItem {
    ToastItem {
        message: toast.message.clone(),
        severity: toast.severity.as_str().to_string(),
    }
}

mod session {
    use log::{error, info};
    use std::sync::Mutex;
    use tasklist_core::{AppConfig, SqliteKeyValueStore, TaskApp};

    pub(super) type Session = TaskApp<SqliteKeyValueStore>;

    static SESSION: Mutex<Option<Session>> = Mutex::new(None);

    /// Runs `f` against the process-wide session, opening it on first use.
    pub(super) fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
        let mut guard = SESSION
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.is_none() {
            *guard = Some(open_session()?);
        }
        match guard.as_mut() {
            Some(app) => Ok(f(app)),
            None => Err("session unavailable".to_string()),
        }
    }

    fn open_session() -> Result<Session, String> {
        let config = AppConfig::from_env().map_err(|err| err.to_string())?;
        let store = SqliteKeyValueStore::open(&config.db_path).map_err(|err| {
            error!("event=session_open module=ffi status=error error={err}");
            format!("store open failed: {err}")
        })?;
        let app = TaskApp::open(store).map_err(|err| format!("session load failed: {err}"))?;
        info!(
            "event=session_open module=ffi status=ok count={}",
            app.tasks().len()
        );
        Ok(app)
    }

    /// Replaces the session with a fresh in-memory one.
    #[cfg(test)]
    pub(super) fn reset_in_memory() {
        let store = SqliteKeyValueStore::open_in_memory().expect("in-memory store");
        let app = TaskApp::open(store).expect("in-memory session");
        *SESSION
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(app);
    }
}

#[cfg(test)]
mod tests {
    use super::session::{reset_in_memory, with_session};
    use super::{
        core_version, init_logging, ping, settings_cycle_background, settings_get,
        settings_toggle_compact, settings_toggle_theme, todo_add, todo_clear_all, todo_delete,
        todo_edit, todo_reorder, todo_toggle, todo_view,
    };
    use std::sync::{Mutex, MutexGuard};

    static SERIAL: Mutex<()> = Mutex::new(());

    fn fresh_session() -> MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        reset_in_memory();
        guard
    }

    fn view_titles(filter: &str, search: &str) -> Vec<String> {
        todo_view(filter.to_string(), search.to_string())
            .items
            .into_iter()
            .map(|item| item.title)
            .collect()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn add_returns_id_and_success_toast() {
        let _guard = fresh_session();

        let added = todo_add("  Buy Milk ".to_string());
        assert!(added.ok, "{}", added.message);
        assert!(added.task_id.is_some());
        assert_eq!(added.message, "Todo added!");
        assert_eq!(added.toasts[0].severity, "success");

        let duplicate = todo_add("buy milk".to_string());
        assert!(!duplicate.ok);
        assert_eq!(duplicate.toasts[0].severity, "error");
        assert_eq!(view_titles("all", ""), ["Buy Milk"]);
    }

    #[test]
    fn add_returns_id_even_when_write_fails() {
        let _guard = fresh_session();
        with_session(|app| {
            app.task_service()
                .store()
                .connection()
                .execute_batch("DROP TABLE kv_entries;")
                .unwrap();
        })
        .unwrap();

        let added = todo_add("Eggs".to_string());
        assert!(!added.ok);
        assert!(added.message.starts_with("Could not save changes"));

        let view = todo_view("all".to_string(), String::new());
        assert_eq!(view.items.len(), 1);
        assert_eq!(added.task_id.as_deref(), Some(view.items[0].task_id.as_str()));
    }

    #[test]
    fn edit_of_missing_task_fails() {
        let _guard = fresh_session();
        let eggs = todo_add("Eggs".to_string()).task_id.unwrap();
        assert!(todo_delete(eggs.clone()).ok);

        let edited = todo_edit(eggs, "Bread".to_string());
        assert!(!edited.ok);
        assert_eq!(edited.message, "Todo no longer exists.");
    }

    #[test]
    fn toggle_edit_delete_by_id() {
        let _guard = fresh_session();
        let eggs = todo_add("Eggs".to_string()).task_id.unwrap();
        let bread = todo_add("Bread".to_string()).task_id.unwrap();

        assert!(todo_toggle(eggs.clone()).ok);
        assert_eq!(view_titles("done", ""), ["Eggs"]);

        let edited = todo_edit(bread.clone(), "Sourdough".to_string());
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(view_titles("not-done", ""), ["Sourdough"]);

        assert!(todo_delete(eggs.clone()).ok);
        assert!(!todo_toggle(eggs).ok);
        assert!(!todo_delete("not-a-uuid".to_string()).ok);
        assert_eq!(view_titles("all", ""), ["Sourdough"]);
    }

    #[test]
    fn reorder_uses_rows_of_last_view() {
        let _guard = fresh_session();
        for title in ["A", "B", "C"] {
            todo_add(title.to_string());
        }
        let view = todo_view("all".to_string(), String::new());
        assert_eq!(view.items[2].position, 2);

        assert!(todo_reorder(0, 2).ok);
        assert_eq!(view_titles("all", ""), ["B", "C", "A"]);
    }

    #[test]
    fn clear_all_empties_list() {
        let _guard = fresh_session();
        todo_add("A".to_string());
        todo_add("B".to_string());

        let cleared = todo_clear_all();
        assert!(cleared.ok);
        assert_eq!(cleared.message, "All todos cleared!");
        assert!(view_titles("all", "").is_empty());
    }

    #[test]
    fn unknown_filter_falls_back_to_all() {
        let _guard = fresh_session();
        todo_add("A".to_string());
        let view = todo_view("pending".to_string(), String::new());
        assert_eq!(view.items.len(), 1);
        assert!(view.message.contains("unknown filter"));
    }

    #[test]
    fn settings_round_trip() {
        let _guard = fresh_session();

        let initial = settings_get();
        assert_eq!(initial.theme, "light");
        assert_eq!(initial.background, "background-default");

        assert_eq!(settings_toggle_theme().theme, "dark");
        assert!(settings_toggle_compact().compact_mode);
        assert_eq!(settings_cycle_background().background, "background-sunset");

        let view = todo_view("all".to_string(), String::new());
        assert_eq!(view.theme, "dark");
        assert_eq!(view.background, "background-sunset");
    }
}
