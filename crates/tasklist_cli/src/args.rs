use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasklist_core::TaskFilter;

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(about = "A small persistent todo list", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store database path (overrides TASKLIST_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a todo
    #[command(alias = "a")]
    Add {
        /// Title of the todo
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List todos
    #[command(alias = "ls")]
    List {
        /// Completion filter: all, done, not-done
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,

        /// Case-insensitive substring search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Dense output for this invocation
        #[arg(long)]
        compact: bool,

        /// Print the rendered rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a todo done / not done
    #[command(alias = "t")]
    Toggle {
        /// Position in the unfiltered list (1-based)
        position: usize,
    },

    /// Change a todo title (prompts when no title is given)
    #[command(alias = "e")]
    Edit {
        /// Position in the unfiltered list (1-based)
        position: usize,

        /// New title
        #[arg(num_args = 0..)]
        title: Vec<String>,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Position in the unfiltered list (1-based)
        position: usize,
    },

    /// Move a todo to another position
    #[command(alias = "mv")]
    Move {
        /// Current position (1-based)
        from: usize,
        /// Target position (1-based)
        to: usize,
    },

    /// Delete every todo
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch between light and dark theme
    Theme,

    /// Cycle to the next background skin
    Background,
}
