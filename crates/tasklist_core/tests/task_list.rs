use tasklist_core::store::TODOS_KEY;
use tasklist_core::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, TaskFilter,
    TaskListService, TaskServiceError,
};

fn open_service(titles: &[&str]) -> TaskListService<SqliteKeyValueStore> {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    let mut service = TaskListService::open(store).unwrap();
    for title in titles {
        service.add(title).unwrap();
    }
    service
}

fn titles<S: KeyValueStore>(service: &TaskListService<S>) -> Vec<String> {
    service
        .tasks()
        .iter()
        .map(|task| task.title.clone())
        .collect()
}

#[test]
fn distinct_adds_append_in_call_order() {
    let inputs = ["Buy Milk", "  Eggs ", "Bread", "Coffee beans"];
    let service = open_service(&inputs);

    assert_eq!(service.len(), inputs.len());
    assert_eq!(titles(&service), ["Buy Milk", "Eggs", "Bread", "Coffee beans"]);
    assert!(service.tasks().iter().all(|task| !task.done));
}

#[test]
fn blank_titles_are_rejected_without_mutation() {
    let mut service = open_service(&["Existing"]);

    for input in ["", "   ", "\t\n"] {
        let err = service.add(input).unwrap_err();
        assert!(matches!(err, TaskServiceError::EmptyTitle));
    }
    assert_eq!(titles(&service), ["Existing"]);
}

#[test]
fn case_insensitive_duplicate_is_rejected() {
    let mut service = open_service(&["Buy Milk"]);

    let err = service.add("buy milk").unwrap_err();
    assert!(matches!(err, TaskServiceError::DuplicateTitle(ref title) if title == "buy milk"));
    assert_eq!(service.len(), 1);

    let err = service.add("  BUY MILK  ").unwrap_err();
    assert!(matches!(err, TaskServiceError::DuplicateTitle(_)));
    assert_eq!(service.len(), 1);
}

#[test]
fn toggle_twice_restores_done_flag() {
    let mut service = open_service(&["A", "B"]);

    assert!(service.toggle(1).unwrap());
    assert!(!service.toggle(1).unwrap());
    assert!(!service.tasks()[1].done);

    let err = service.toggle(2).unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::IndexOutOfRange { position: 2, len: 2 }
    ));
}

#[test]
fn delete_removes_target_and_shifts_followers() {
    let mut service = open_service(&["A", "B", "C"]);
    let c_id = service.tasks()[2].id;

    let removed = service.delete(1).unwrap();
    assert_eq!(removed.title, "B");
    assert_eq!(titles(&service), ["A", "C"]);
    assert_eq!(service.position_of(c_id), Some(1));

    assert!(matches!(
        service.delete(5),
        Err(TaskServiceError::IndexOutOfRange { .. })
    ));
}

#[test]
fn reorder_uses_splice_move_semantics() {
    let mut forward = open_service(&["A", "B", "C"]);
    forward.reorder(0, 2).unwrap();
    assert_eq!(titles(&forward), ["B", "C", "A"]);

    let mut backward = open_service(&["A", "B", "C"]);
    backward.reorder(2, 0).unwrap();
    assert_eq!(titles(&backward), ["C", "A", "B"]);
}

#[test]
fn edit_replaces_title_in_place() {
    let mut service = open_service(&["A", "B"]);
    service.toggle(1).unwrap();

    service.edit(1, "  Beta ").unwrap();
    assert_eq!(titles(&service), ["A", "Beta"]);
    assert!(service.tasks()[1].done);

    let err = service.edit(1, "a").unwrap_err();
    assert!(matches!(err, TaskServiceError::DuplicateTitle(_)));
    assert_eq!(titles(&service), ["A", "Beta"]);
}

#[test]
fn done_filter_preserves_relative_order() {
    let mut service = open_service(&["A", "B", "C", "D"]);
    service.toggle(3).unwrap();
    service.toggle(1).unwrap();

    let done: Vec<_> = service
        .view(TaskFilter::Done, "")
        .into_iter()
        .map(|entry| (entry.position, entry.task.title))
        .collect();
    assert_eq!(done, [(1, "B".to_string()), (3, "D".to_string())]);

    let open: Vec<_> = service
        .view(TaskFilter::NotDone, "")
        .into_iter()
        .map(|entry| entry.position)
        .collect();
    assert_eq!(open, [0, 2]);
}

#[test]
fn search_matches_substring_case_insensitively() {
    let service = open_service(&["Buy Milk", "Eggs"]);

    let hits = service.view(TaskFilter::All, "milk");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].task.title, "Buy Milk");
    assert_eq!(hits[0].position, 0);
}

#[test]
fn clear_all_empties_every_view() {
    let mut service = open_service(&["A", "B"]);
    service.toggle(0).unwrap();
    service.clear_all().unwrap();

    for filter in TaskFilter::ALL {
        assert!(service.view(filter, "").is_empty());
        assert!(service.view(filter, "a").is_empty());
    }
    assert_eq!(
        service.store().load(TODOS_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn id_dispatch_targets_intended_task_under_filter() {
    let mut service = open_service(&["Buy Milk", "Eggs", "Milk chocolate"]);

    let filtered = service.view(TaskFilter::All, "choc");
    assert_eq!(filtered.len(), 1);
    service.delete_task(filtered[0].id).unwrap();
    assert_eq!(titles(&service), ["Buy Milk", "Eggs"]);

    let stale = filtered[0].id;
    assert!(matches!(
        service.toggle_task(stale),
        Err(TaskServiceError::TaskNotFound(id)) if id == stale
    ));
}

#[test]
fn persist_and_reload_roundtrip_through_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let expected = {
        let store = SqliteKeyValueStore::open(&path).unwrap();
        let mut service = TaskListService::open(store).unwrap();
        service.add("Buy Milk").unwrap();
        service.add("Eggs").unwrap();
        service.add("Bread").unwrap();
        service.toggle(1).unwrap();
        service.reorder(2, 0).unwrap();
        service
            .tasks()
            .iter()
            .map(|task| task.to_record())
            .collect::<Vec<_>>()
    };

    let reopened = TaskListService::open(SqliteKeyValueStore::open(&path).unwrap()).unwrap();
    let records: Vec<_> = reopened.tasks().iter().map(|task| task.to_record()).collect();
    assert_eq!(records, expected);
}

#[test]
fn store_failure_keeps_in_memory_mutation() {
    let mut service = TaskListService::open(MemoryKeyValueStore::with_quota(48)).unwrap();
    service.add("short").unwrap();

    let err = service
        .add("a considerably longer title that will not fit")
        .unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Persistence(StoreError::QuotaExceeded { .. })
    ));
    assert_eq!(service.len(), 2);

    let persisted = service.store().load(TODOS_KEY).unwrap().unwrap();
    assert_eq!(persisted, r#"[{"title":"short","done":false}]"#);
}

#[test]
fn malformed_persisted_list_loads_empty() {
    let mut store = MemoryKeyValueStore::new();
    store.insert_raw(TODOS_KEY, "[{\"title\": 42}]");

    let mut service = TaskListService::open(store).unwrap();
    assert!(service.is_empty());

    service.add("fresh start").unwrap();
    assert_eq!(titles(&service), ["fresh start"]);
}

#[test]
fn reload_picks_up_external_writes() {
    let mut service = open_service(&["A"]);
    service
        .store_mut()
        .save(TODOS_KEY, r#"[{"title":"B","done":true}]"#)
        .unwrap();

    service.reload().unwrap();
    assert_eq!(titles(&service), ["B"]);
    assert!(service.tasks()[0].done);
}
