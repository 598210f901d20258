//! Interaction events and their outcomes.

use crate::model::task::{TaskFilter, TaskId};

/// One user input, already translated from widget terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AddRequested(String),
    ToggleRequested(TaskId),
    /// Asks for the current title to prefill an edit prompt.
    EditRequested(TaskId),
    EditSubmitted { id: TaskId, title: String },
    EditCancelled,
    DeleteRequested(TaskId),
    /// Drag gesture finished; indices are rows of the current render.
    DragEnded { old_index: usize, new_index: usize },
    FilterChanged(TaskFilter),
    SearchChanged(String),
    ClearAllRequested,
    ClearAllConfirmed,
    ClearAllCancelled,
    ThemeToggled,
    CompactToggled,
    BackgroundCycled,
}

/// What the interaction layer should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// State or selection changed; re-render.
    Applied,
    /// Nothing changed.
    Ignored,
    /// Prompt for a replacement title, prefilled with `current_title`.
    EditPrompt { id: TaskId, current_title: String },
    /// Show the clear-all confirm/cancel dialog.
    ConfirmClearAll,
    /// An error toast was queued. Store write failures keep the in-memory
    /// change, so a re-render is still needed.
    Failed(String),
}
