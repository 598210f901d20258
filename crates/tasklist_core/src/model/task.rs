//! Task domain model.
//!
//! # Responsibility
//! - Define the in-memory task record and its persisted shape.
//! - Provide the title normalization and comparison rules used by the list.
//!
//! # Invariants
//! - `title` is trimmed and non-empty for every task owned by the list.
//! - `id` is session-scoped: regenerated on every load, never written out.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable surrogate identifier for a task within one session.
pub type TaskId = Uuid;

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    /// Creates an open task with a generated id.
    ///
    /// The caller is responsible for passing an already normalized title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            done: false,
        }
    }

    /// Whether `other` names the same task under case-insensitive comparison.
    pub fn title_matches(&self, other: &str) -> bool {
        titles_equal(&self.title, other)
    }

    /// Persisted shape of this task.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            title: self.title.clone(),
            done: self.done,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: record.title,
            done: record.done,
        }
    }
}

/// Persisted task layout: `{ "title": string, "done": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub done: bool,
}

/// Trims user input into a candidate title.
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive title equality (Unicode lowercase on both sides).
pub fn titles_equal(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Completion filter applied to the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    Done,
    NotDone,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Done, TaskFilter::NotDone];

    /// Whether a task with the given completion flag passes this filter.
    pub fn accepts(self, done: bool) -> bool {
        match self {
            Self::All => true,
            Self::Done => done,
            Self::NotDone => !done,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::NotDone => "not-done",
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a filter name is not one of `all|done|not-done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterError(pub String);

impl Display for UnknownFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|done|not-done",
            self.0
        )
    }
}

impl Error for UnknownFilterError {}

impl FromStr for TaskFilter {
    type Err = UnknownFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "done" => Ok(Self::Done),
            "not-done" | "not_done" | "notdone" => Ok(Self::NotDone),
            other => Err(UnknownFilterError(other.to_string())),
        }
    }
}
