//! View renderer.
//!
//! # Responsibility
//! - Turn (tasks, filter, search, settings) into ordered display rows.
//!
//! # Invariants
//! - Pure: no state, no persistence, no mutation of inputs.
//! - Row order follows list order; `position` is the unfiltered index.

use crate::model::settings::{CosmeticSettings, Theme};
use crate::model::task::{Task, TaskFilter, TaskId};
use crate::service::task_service::filter_tasks;
use serde::Serialize;

/// Filter and search selection driving a render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub filter: TaskFilter,
    pub search: String,
}

impl ViewQuery {
    pub fn new(filter: TaskFilter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into(),
        }
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: TaskId,
    /// Index in the unfiltered list, for dispatching operations back.
    pub position: usize,
    pub title: String,
    /// Drives strikethrough styling.
    pub done: bool,
    /// Dense row styling.
    pub compact: bool,
}

/// Full render output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedList {
    pub theme: Theme,
    pub background: &'static str,
    pub rows: Vec<DisplayRow>,
}

impl RenderedList {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unfiltered position behind the rendered row at `row_index`.
    pub fn position_at(&self, row_index: usize) -> Option<usize> {
        self.rows.get(row_index).map(|row| row.position)
    }
}

pub fn render_list(tasks: &[Task], query: &ViewQuery, settings: &CosmeticSettings) -> RenderedList {
    let rows = filter_tasks(tasks, query.filter, query.search.as_str())
        .into_iter()
        .map(|entry| DisplayRow {
            id: entry.id,
            position: entry.position,
            title: entry.task.title,
            done: entry.task.done,
            compact: settings.compact_mode,
        })
        .collect();

    RenderedList {
        theme: settings.theme,
        background: settings.background.name(),
        rows,
    }
}
