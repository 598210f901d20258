//! Flutter-facing bindings for the task list core.
//!
//! Only [`api`] is exported to Dart; everything else stays in `tasklist_core`.

pub mod api;
