//! Declarative display projection of the task list.

pub mod render;

pub use render::{render_list, DisplayRow, RenderedList, ViewQuery};
