//! Task list persistence over a key/value store.
//!
//! # Responsibility
//! - Encode the full task list into the `todos` blob and decode it back.
//! - Recover from absent or malformed blobs by yielding an empty list.
//!
//! # Invariants
//! - Every write replaces the whole blob; there is no incremental diffing.
//! - Decoding never fails the caller: malformed data is logged and dropped.

use crate::model::task::{normalize_title, Task, TaskRecord};
use crate::store::{KeyValueStore, StoreResult, TODOS_KEY};
use log::warn;

/// Loads the persisted task list.
///
/// Absent and malformed blobs load as an empty list. Records with blank titles
/// are skipped so the in-memory list never violates the title invariant.
///
/// # Errors
/// - Propagates store read failures.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Vec<Task>> {
    let Some(blob) = store.load(TODOS_KEY)? else {
        return Ok(Vec::new());
    };

    match decode_tasks(blob.as_str()) {
        Ok(records) => Ok(sanitize_records(records)),
        Err(err) => {
            warn!(
                "event=tasks_load module=repo status=error error_code=malformed_blob bytes={} error={}",
                blob.len(),
                err
            );
            Ok(Vec::new())
        }
    }
}

/// Writes the full task list under the `todos` key.
pub fn save_tasks<S: KeyValueStore + ?Sized>(store: &mut S, tasks: &[Task]) -> StoreResult<()> {
    let blob = encode_tasks(tasks);
    store.save(TODOS_KEY, blob.as_str())
}

/// Serializes tasks into the persisted JSON array layout.
pub fn encode_tasks(tasks: &[Task]) -> String {
    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    // Serializing plain string/bool records cannot fail.
    serde_json::to_string(&records).unwrap_or_else(|_| String::from("[]"))
}

/// Parses the persisted JSON array layout.
pub fn decode_tasks(blob: &str) -> Result<Vec<TaskRecord>, serde_json::Error> {
    serde_json::from_str(blob)
}

fn sanitize_records(records: Vec<TaskRecord>) -> Vec<Task> {
    let total = records.len();
    let mut tasks: Vec<Task> = Vec::with_capacity(total);
    for record in records {
        let Some(title) = normalize_title(record.title.as_str()) else {
            continue;
        };
        if tasks.iter().any(|task| task.title_matches(title.as_str())) {
            continue;
        }
        tasks.push(Task::from(TaskRecord {
            title,
            done: record.done,
        }));
    }

    if tasks.len() != total {
        warn!(
            "event=tasks_load module=repo status=ok dropped_records={} kept_records={}",
            total - tasks.len(),
            tasks.len()
        );
    }
    tasks
}
