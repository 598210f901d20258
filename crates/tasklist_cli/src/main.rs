//! `tasklist` command line front end.
//!
//! # Responsibility
//! - Map one invocation to one interaction event against the persisted list.
//! - Print feedback: success to stdout, errors to stderr.
//!
//! # Invariants
//! - Positions on the command line are 1-based over the unfiltered list.
//! - A rejected operation exits with status 1 and leaves the list unchanged.

use clap::Parser;
use log::warn;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;
use tasklist_core::{
    init_logging, AppConfig, EventOutcome, RenderedList, Severity, SqliteKeyValueStore, TaskApp,
    TaskId, UiEvent,
};

mod args;
use args::{Cli, Commands};

type App = TaskApp<SqliteKeyValueStore>;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode, String> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("Warning: logging disabled: {err}");
        }
    }

    let db_path = cli.db.clone().unwrap_or(config.db_path);
    let store = SqliteKeyValueStore::open(&db_path)
        .map_err(|err| format!("cannot open store `{}`: {err}", db_path.display()))?;
    let mut app = TaskApp::open(store).map_err(|err| format!("cannot load todos: {err}"))?;

    let outcome = match cli.command {
        Some(Commands::Add { title }) => {
            handle(&mut app, UiEvent::AddRequested(title.join(" ")))
        }
        Some(Commands::List {
            filter,
            search,
            compact,
            json,
        }) => {
            handle(&mut app, UiEvent::FilterChanged(filter));
            handle(&mut app, UiEvent::SearchChanged(search));
            if compact {
                handle(&mut app, UiEvent::CompactToggled);
            }
            print_list(&app.render(), json)?;
            EventOutcome::Applied
        }
        Some(Commands::Toggle { position }) => {
            let id = task_at(&app, position)?;
            let outcome = handle(&mut app, UiEvent::ToggleRequested(id));
            if outcome == EventOutcome::Applied {
                if let Some(task) = app.tasks().get(position - 1) {
                    let state = if task.done { "done" } else { "not done" };
                    println!("Todo {position} marked {state}.");
                }
            }
            outcome
        }
        Some(Commands::Edit { position, title }) => {
            let id = task_at(&app, position)?;
            handle_edit(&mut app, id, title)?
        }
        Some(Commands::Delete { position }) => {
            let id = task_at(&app, position)?;
            handle(&mut app, UiEvent::DeleteRequested(id))
        }
        Some(Commands::Move { from, to }) => {
            task_at(&app, from)?;
            task_at(&app, to)?;
            // The default view is unfiltered, so rendered rows equal positions.
            handle(
                &mut app,
                UiEvent::DragEnded {
                    old_index: from - 1,
                    new_index: to - 1,
                },
            )
        }
        Some(Commands::Clear { yes }) => handle_clear(&mut app, yes)?,
        Some(Commands::Theme) => {
            let outcome = handle(&mut app, UiEvent::ThemeToggled);
            println!("Theme: {}", app.settings().theme.as_str());
            outcome
        }
        Some(Commands::Background) => {
            let outcome = handle(&mut app, UiEvent::BackgroundCycled);
            println!("Background: {}", app.settings().background.name());
            outcome
        }
        None => {
            print_list(&app.render(), false)?;
            EventOutcome::Applied
        }
    };

    Ok(match outcome {
        EventOutcome::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// Applies one event and prints the feedback it produced.
fn handle(app: &mut App, event: UiEvent) -> EventOutcome {
    let outcome = app.handle(event, Instant::now());
    for toast in app.toast_queue_mut().drain() {
        match toast.severity {
            Severity::Error => eprintln!("{}", toast.message),
            Severity::Info | Severity::Success => println!("{}", toast.message),
        }
    }
    outcome
}

fn handle_edit(app: &mut App, id: TaskId, title: Vec<String>) -> Result<EventOutcome, String> {
    let prompted = handle(app, UiEvent::EditRequested(id));
    let EventOutcome::EditPrompt { current_title, .. } = prompted else {
        return Ok(prompted);
    };
    let title = if title.is_empty() {
        match prompt(&format!("Edit todo [{current_title}]: "))? {
            Some(answer) => answer,
            None => return Ok(handle(app, UiEvent::EditCancelled)),
        }
    } else {
        title.join(" ")
    };

    let outcome = handle(app, UiEvent::EditSubmitted { id, title });
    if outcome == EventOutcome::Ignored {
        println!("Nothing changed.");
    }
    Ok(outcome)
}

fn handle_clear(app: &mut App, yes: bool) -> Result<EventOutcome, String> {
    if handle(app, UiEvent::ClearAllRequested) != EventOutcome::ConfirmClearAll {
        return Ok(EventOutcome::Ignored);
    }
    let confirmed = yes || {
        let question = format!("Delete all {} todo(s)? [y/N]: ", app.tasks().len());
        let answer = prompt(&question)?.unwrap_or_default();
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    };

    if confirmed {
        Ok(handle(app, UiEvent::ClearAllConfirmed))
    } else {
        println!("Cancelled.");
        Ok(handle(app, UiEvent::ClearAllCancelled))
    }
}

/// Reads one line from stdin; `None` on EOF.
fn prompt(question: &str) -> Result<Option<String>, String> {
    print!("{question}");
    io::stdout().flush().map_err(|err| err.to_string())?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| err.to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn task_at(app: &App, position: usize) -> Result<TaskId, String> {
    position
        .checked_sub(1)
        .and_then(|index| app.tasks().get(index))
        .map(|task| task.id)
        .ok_or_else(|| position_error(position, app))
}

fn position_error(position: usize, app: &App) -> String {
    warn!(
        "event=cli_position module=cli status=error position={} len={}",
        position,
        app.tasks().len()
    );
    format!(
        "no todo at position {position} (list has {} item(s))",
        app.tasks().len()
    )
}

fn print_list(rendered: &RenderedList, json: bool) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(rendered).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if rendered.is_empty() {
        println!("No todos.");
        return Ok(());
    }

    for row in &rendered.rows {
        let mark = if row.done { "x" } else { " " };
        if row.compact {
            println!("{} [{mark}] {}", row.position + 1, row.title);
        } else {
            println!("{:>3}. [{mark}] {}", row.position + 1, row.title);
        }
    }
    Ok(())
}
