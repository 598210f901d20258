//! Task list use-case service.
//!
//! # Responsibility
//! - Own the ordered task list and apply add/toggle/edit/delete/reorder/clear.
//! - Mirror the full list to the store after every mutation.
//! - Derive the filtered, searched view with unfiltered positions.
//!
//! # Invariants
//! - No two tasks have case-insensitively equal titles.
//! - Validation failures leave the list untouched.
//! - A failed store write never rolls back the in-memory mutation.

use crate::model::task::{normalize_title, Task, TaskFilter, TaskId};
use crate::repo::task_repo::{load_tasks, save_tasks};
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task list operations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Title collides case-insensitively with an existing task.
    DuplicateTitle(String),
    /// Position does not address a task.
    IndexOutOfRange { position: usize, len: usize },
    /// Id does not address a task in the current list.
    TaskNotFound(TaskId),
    /// Mutation applied in memory but the store write failed.
    Persistence(StoreError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::DuplicateTitle(title) => write!(f, "task title already exists: `{title}`"),
            Self::IndexOutOfRange { position, len } => {
                write!(f, "task position {position} out of range for {len} task(s)")
            }
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist task list: {err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TaskServiceError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Result of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Title replaced and persisted.
    Updated,
    /// Blank or identical input; nothing written.
    Unchanged,
}

/// One task in a derived view, tagged with its unfiltered position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub id: TaskId,
    pub position: usize,
    pub task: Task,
}

/// Task list state manager over a key/value store.
pub struct TaskListService<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskListService<S> {
    /// Loads the persisted list from `store`.
    ///
    /// # Errors
    /// - Propagates store read failures. Absent or malformed data is not an
    ///   error and yields an empty list.
    pub fn open(store: S) -> StoreResult<Self> {
        let tasks = load_tasks(&store)?;
        info!(
            "event=tasks_open module=service status=ok count={}",
            tasks.len()
        );
        Ok(Self { store, tasks })
    }

    /// Re-reads the list from the store, discarding in-memory state.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.tasks = load_tasks(&self.store)?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    /// Resolves an id to its current position.
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access for collaborators sharing the same store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Appends a new open task.
    ///
    /// # Errors
    /// - `EmptyTitle` / `DuplicateTitle`: nothing is changed.
    /// - `Persistence`: the task was appended but not written.
    pub fn add(&mut self, title: &str) -> TaskServiceResult<Task> {
        let title = normalize_title(title).ok_or(TaskServiceError::EmptyTitle)?;
        if self.tasks.iter().any(|task| task.title_matches(&title)) {
            return Err(TaskServiceError::DuplicateTitle(title));
        }

        let task = Task::new(title);
        self.tasks.push(task.clone());
        self.persist("add")?;
        Ok(task)
    }

    /// Flips `done` for the task at `position` and returns the new value.
    pub fn toggle(&mut self, position: usize) -> TaskServiceResult<bool> {
        let done = {
            let task = self.task_mut(position)?;
            task.done = !task.done;
            task.done
        };
        self.persist("toggle")?;
        Ok(done)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> TaskServiceResult<bool> {
        let position = self.resolve(id)?;
        self.toggle(position)
    }

    /// Replaces the title at `position`, keeping position and `done`.
    ///
    /// Blank input or a title identical to the current one is a no-op.
    pub fn edit(&mut self, position: usize, new_title: &str) -> TaskServiceResult<EditOutcome> {
        let current = self.task_ref(position)?;
        let Some(title) = normalize_title(new_title) else {
            return Ok(EditOutcome::Unchanged);
        };
        if title == current.title {
            return Ok(EditOutcome::Unchanged);
        }
        let collides = self
            .tasks
            .iter()
            .enumerate()
            .any(|(index, task)| index != position && task.title_matches(&title));
        if collides {
            return Err(TaskServiceError::DuplicateTitle(title));
        }

        self.task_mut(position)?.title = title;
        self.persist("edit")?;
        Ok(EditOutcome::Updated)
    }

    pub fn edit_task(&mut self, id: TaskId, new_title: &str) -> TaskServiceResult<EditOutcome> {
        let position = self.resolve(id)?;
        self.edit(position, new_title)
    }

    /// Removes and returns the task at `position`; later positions shift down.
    pub fn delete(&mut self, position: usize) -> TaskServiceResult<Task> {
        self.task_ref(position)?;
        let removed = self.tasks.remove(position);
        self.persist("delete")?;
        Ok(removed)
    }

    pub fn delete_task(&mut self, id: TaskId) -> TaskServiceResult<Task> {
        let position = self.resolve(id)?;
        self.delete(position)
    }

    /// Moves the task at `from` so it lands at `to` after removal.
    ///
    /// `[A, B, C]` with `reorder(0, 2)` becomes `[B, C, A]`.
    pub fn reorder(&mut self, from: usize, to: usize) -> TaskServiceResult<()> {
        self.task_ref(from)?;
        self.task_ref(to)?;
        if from == to {
            debug!("event=tasks_reorder module=service status=ok noop=true position={from}");
            return Ok(());
        }

        let moved = self.tasks.remove(from);
        self.tasks.insert(to, moved);
        self.persist("reorder")
    }

    /// Removes every task. Callers gate this behind an explicit confirmation.
    pub fn clear_all(&mut self) -> TaskServiceResult<()> {
        self.tasks.clear();
        self.persist("clear_all")
    }

    /// Filtered and searched projection in list order.
    ///
    /// Search is a case-insensitive substring match; an empty search matches
    /// every title. Positions refer to the unfiltered list.
    pub fn view(&self, filter: TaskFilter, search: &str) -> Vec<ViewEntry> {
        filter_tasks(&self.tasks, filter, search)
    }

    fn resolve(&self, id: TaskId) -> TaskServiceResult<usize> {
        self.position_of(id)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn task_ref(&self, position: usize) -> TaskServiceResult<&Task> {
        let len = self.tasks.len();
        self.tasks
            .get(position)
            .ok_or(TaskServiceError::IndexOutOfRange { position, len })
    }

    fn task_mut(&mut self, position: usize) -> TaskServiceResult<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(position)
            .ok_or(TaskServiceError::IndexOutOfRange { position, len })
    }

    fn persist(&mut self, op: &'static str) -> TaskServiceResult<()> {
        match save_tasks(&mut self.store, &self.tasks) {
            Ok(()) => {
                debug!(
                    "event=tasks_persist module=service status=ok op={} count={}",
                    op,
                    self.tasks.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_persist module=service status=error op={} count={} error={}",
                    op,
                    self.tasks.len(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Pure filter/search over any task slice.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter, search: &str) -> Vec<ViewEntry> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.accepts(task.done))
        .filter(|(_, task)| task.title.to_lowercase().contains(needle.as_str()))
        .map(|(position, task)| ViewEntry {
            id: task.id,
            position,
            task: task.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{EditOutcome, TaskListService, TaskServiceError};
    use crate::model::task::TaskFilter;
    use crate::store::MemoryKeyValueStore;

    fn service_with(titles: &[&str]) -> TaskListService<MemoryKeyValueStore> {
        let mut service = TaskListService::open(MemoryKeyValueStore::new()).unwrap();
        for title in titles {
            service.add(title).unwrap();
        }
        service
    }

    fn titles(service: &TaskListService<MemoryKeyValueStore>) -> Vec<String> {
        service.tasks().iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn reorder_out_of_range_is_rejected() {
        let mut service = service_with(&["A", "B"]);
        let err = service.reorder(0, 2).unwrap_err();
        assert!(matches!(
            err,
            TaskServiceError::IndexOutOfRange { position: 2, len: 2 }
        ));
        assert_eq!(titles(&service), ["A", "B"]);
    }

    #[test]
    fn edit_allows_case_only_rename_of_same_task() {
        let mut service = service_with(&["buy milk"]);
        assert_eq!(service.edit(0, "Buy Milk").unwrap(), EditOutcome::Updated);
        assert_eq!(titles(&service), ["Buy Milk"]);
    }

    #[test]
    fn edit_with_blank_or_same_title_is_noop() {
        let mut service = service_with(&["Eggs"]);
        assert_eq!(service.edit(0, "   ").unwrap(), EditOutcome::Unchanged);
        assert_eq!(service.edit(0, " Eggs ").unwrap(), EditOutcome::Unchanged);
        assert_eq!(titles(&service), ["Eggs"]);
    }

    #[test]
    fn edit_out_of_range_reports_index() {
        let mut service = service_with(&[]);
        let err = service.edit(0, "x").unwrap_err();
        assert!(matches!(err, TaskServiceError::IndexOutOfRange { .. }));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let service = service_with(&["Buy Milk", "Eggs", "milkshake"]);
        let hits: Vec<_> = service
            .view(TaskFilter::All, "MILK")
            .into_iter()
            .map(|entry| entry.position)
            .collect();
        assert_eq!(hits, [0, 2]);
    }
}
