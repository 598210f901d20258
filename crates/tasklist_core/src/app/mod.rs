//! Interaction controller.
//!
//! # Responsibility
//! - Own every piece of session state: tasks, settings, view selection,
//!   pending dialogs and toasts.
//! - Translate [`UiEvent`]s into service calls and feedback.
//!
//! # Invariants
//! - Events are applied one at a time, in arrival order.
//! - Every failure is reported as an error toast; none is fatal.
//! - Clear-all only runs after an explicit request + confirm pair.
//! - An edit is only applied to the task whose prompt is open.

mod event;

pub use event::{EventOutcome, UiEvent};

use crate::feedback::toast::{Severity, Toast, ToastQueue};
use crate::model::settings::CosmeticSettings;
use crate::model::task::{Task, TaskId};
use crate::service::settings_service::{SettingsError, SettingsService};
use crate::service::task_service::{EditOutcome, TaskListService, TaskServiceError};
use crate::store::{KeyValueStore, StoreResult};
use crate::view::render::{render_list, RenderedList, ViewQuery};
use log::{info, warn};
use std::time::Instant;

const MSG_ADDED: &str = "Todo added!";
const MSG_UPDATED: &str = "Todo updated!";
const MSG_DELETED: &str = "Todo deleted!";
const MSG_CLEARED: &str = "All todos cleared!";
const MSG_EMPTY: &str = "Todo cannot be empty!";
const MSG_DUPLICATE: &str = "Todo title already exists!";
const MSG_MISSING: &str = "Todo no longer exists.";

/// Single owned application state.
pub struct TaskApp<S: KeyValueStore> {
    tasks: TaskListService<S>,
    settings: SettingsService,
    query: ViewQuery,
    toasts: ToastQueue,
    pending_edit: Option<TaskId>,
    confirming_clear: bool,
}

impl<S: KeyValueStore> TaskApp<S> {
    /// Loads tasks and settings from `store`.
    pub fn open(store: S) -> StoreResult<Self> {
        let settings = SettingsService::load(&store)?;
        let tasks = TaskListService::open(store)?;
        Ok(Self {
            tasks,
            settings,
            query: ViewQuery::default(),
            toasts: ToastQueue::new(),
            pending_edit: None,
            confirming_clear: false,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn task_service(&self) -> &TaskListService<S> {
        &self.tasks
    }

    pub fn settings(&self) -> CosmeticSettings {
        self.settings.settings()
    }

    pub fn pending_edit(&self) -> Option<TaskId> {
        self.pending_edit
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirming_clear
    }

    /// Current display projection.
    pub fn render(&self) -> RenderedList {
        render_list(self.tasks.tasks(), &self.query, &self.settings.settings())
    }

    /// Toasts still visible at `now`.
    pub fn toasts(&self, now: Instant) -> Vec<&Toast> {
        self.toasts.active(now)
    }

    pub fn toast_queue_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    /// Applies one event.
    pub fn handle(&mut self, event: UiEvent, now: Instant) -> EventOutcome {
        match event {
            UiEvent::AddRequested(title) => {
                let result = self.tasks.add(title.as_str()).map(|_| ());
                self.report(result, Some(MSG_ADDED), now)
            }
            UiEvent::ToggleRequested(id) => {
                let result = self.tasks.toggle_task(id).map(|_| ());
                self.report(result, None, now)
            }
            UiEvent::EditRequested(id) => match self.tasks.position_of(id) {
                Some(position) => {
                    self.pending_edit = Some(id);
                    let current_title = self.tasks.tasks()[position].title.clone();
                    EventOutcome::EditPrompt { id, current_title }
                }
                None => self.fail(TaskServiceError::TaskNotFound(id), now),
            },
            UiEvent::EditSubmitted { id, title } => {
                if self.pending_edit.take() != Some(id) {
                    warn!("event=edit_submit module=app status=ignored reason=no_pending_edit");
                    return EventOutcome::Ignored;
                }
                match self.tasks.edit_task(id, title.as_str()) {
                    Ok(EditOutcome::Updated) => self.succeed(Some(MSG_UPDATED), now),
                    Ok(EditOutcome::Unchanged) => EventOutcome::Ignored,
                    Err(err) => self.fail(err, now),
                }
            }
            UiEvent::EditCancelled => {
                self.pending_edit = None;
                EventOutcome::Ignored
            }
            UiEvent::DeleteRequested(id) => {
                let result = self.tasks.delete_task(id).map(|_| ());
                self.report(result, Some(MSG_DELETED), now)
            }
            UiEvent::DragEnded {
                old_index,
                new_index,
            } => {
                if old_index == new_index {
                    return EventOutcome::Ignored;
                }
                let result = self
                    .resolve_rows(old_index, new_index)
                    .and_then(|(from, to)| self.tasks.reorder(from, to));
                self.report(result, None, now)
            }
            UiEvent::FilterChanged(filter) => {
                self.query.filter = filter;
                EventOutcome::Applied
            }
            UiEvent::SearchChanged(search) => {
                self.query.search = search;
                EventOutcome::Applied
            }
            UiEvent::ClearAllRequested => {
                self.confirming_clear = true;
                EventOutcome::ConfirmClearAll
            }
            UiEvent::ClearAllCancelled => {
                self.confirming_clear = false;
                EventOutcome::Ignored
            }
            UiEvent::ClearAllConfirmed => {
                if !self.confirming_clear {
                    warn!("event=clear_all module=app status=ignored reason=no_pending_confirmation");
                    return EventOutcome::Ignored;
                }
                self.confirming_clear = false;
                let result = self.tasks.clear_all();
                if result.is_ok() {
                    info!("event=clear_all module=app status=ok");
                }
                self.report(result, Some(MSG_CLEARED), now)
            }
            UiEvent::ThemeToggled => {
                let result = self.settings.toggle_theme(self.tasks.store_mut());
                self.report_settings(result.map(|_| ()), now)
            }
            UiEvent::CompactToggled => {
                self.settings.toggle_compact();
                EventOutcome::Applied
            }
            UiEvent::BackgroundCycled => {
                let result = self.settings.cycle_background(self.tasks.store_mut());
                self.report_settings(result.map(|_| ()), now)
            }
        }
    }

    fn resolve_rows(
        &self,
        old_index: usize,
        new_index: usize,
    ) -> Result<(usize, usize), TaskServiceError> {
        let rendered = self.render();
        let len = rendered.rows.len();
        let lookup = |row_index: usize| {
            rendered
                .position_at(row_index)
                .ok_or(TaskServiceError::IndexOutOfRange {
                    position: row_index,
                    len,
                })
        };
        Ok((lookup(old_index)?, lookup(new_index)?))
    }

    fn report(
        &mut self,
        result: Result<(), TaskServiceError>,
        success: Option<&str>,
        now: Instant,
    ) -> EventOutcome {
        match result {
            Ok(()) => self.succeed(success, now),
            Err(err) => self.fail(err, now),
        }
    }

    fn report_settings(&mut self, result: Result<(), SettingsError>, now: Instant) -> EventOutcome {
        match result {
            Ok(()) => EventOutcome::Applied,
            Err(err) => {
                let message = format!("Could not save {}.", err.setting);
                self.toasts.push(message.clone(), Severity::Error, now);
                EventOutcome::Failed(message)
            }
        }
    }

    fn succeed(&mut self, message: Option<&str>, now: Instant) -> EventOutcome {
        if let Some(message) = message {
            self.toasts.push(message, Severity::Success, now);
        }
        EventOutcome::Applied
    }

    fn fail(&mut self, err: TaskServiceError, now: Instant) -> EventOutcome {
        let message = match &err {
            TaskServiceError::EmptyTitle => MSG_EMPTY.to_string(),
            TaskServiceError::DuplicateTitle(_) => MSG_DUPLICATE.to_string(),
            TaskServiceError::IndexOutOfRange { .. } | TaskServiceError::TaskNotFound(_) => {
                MSG_MISSING.to_string()
            }
            TaskServiceError::Persistence(store_err) => {
                format!("Could not save changes: {store_err}")
            }
        };
        self.toasts.push(message.clone(), Severity::Error, now);
        EventOutcome::Failed(message)
    }
}
