//! Domain model for the task list and its display preferences.
//!
//! # Responsibility
//! - Define the task record and the filter applied to it.
//! - Define cosmetic settings that live beside, never inside, task data.
//!
//! # Invariants
//! - Every in-memory task carries a `TaskId` unique for the session.
//! - Only `title` and `done` are persisted for a task.

pub mod settings;
pub mod task;
