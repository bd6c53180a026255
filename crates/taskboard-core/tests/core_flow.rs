use taskboard_core::datastore::DataStore;
use taskboard_core::service::{CreateTaskRequest, ListQuery, TaskService, UpdateTaskRequest};
use taskboard_shared::TaskStatus;
use tempfile::tempdir;

#[test]
fn tasks_survive_service_restart() {
    let temp = tempdir().expect("tempdir");

    let id = {
        let store = DataStore::open(temp.path(), "tasks.json").expect("open datastore");
        let service = TaskService::new(store);
        let created = service
            .create(CreateTaskRequest {
                title: "Write parity harness".to_string(),
                description: Some("core flow".to_string()),
                status: None,
                priority: Some(4),
                due_date: Some("2026-11-30".to_string()),
            })
            .expect("create task");
        service
            .update(
                &created.id,
                UpdateTaskRequest {
                    status: Some("in_progress".to_string()),
                    ..UpdateTaskRequest::default()
                },
            )
            .expect("update task");
        created.id
    };

    let store = DataStore::open(temp.path(), "tasks.json").expect("reopen datastore");
    let service = TaskService::new(store);
    let tasks = service
        .list(ListQuery {
            status: Some("in_progress".to_string()),
            ..ListQuery::default()
        })
        .expect("list tasks");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert_eq!(tasks[0].priority, 4);
    assert_eq!(tasks[0].due_date.as_deref(), Some("2026-11-30"));
}

#[test]
fn reads_files_written_by_other_backends() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path(), "tasks.json").expect("open datastore");
    std::fs::write(
        &store.tasks_path,
        r#"{
  "tasks": [
    {
      "id": "5f0c1c5e-0000-4000-8000-000000000001",
      "title": "Imported",
      "description": null,
      "status": "done",
      "priority": 5,
      "created_at": "2025-01-02T03:04:05.123456Z",
      "updated_at": "2025-01-02T03:04:05.123456Z",
      "due_date": null
    }
  ]
}"#,
    )
    .expect("seed task file");

    let service = TaskService::new(store);
    let task = service
        .get("5f0c1c5e-0000-4000-8000-000000000001")
        .expect("get imported task");
    assert_eq!(task.title, "Imported");
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.created_at, "2025-01-02T03:04:05.123456Z");
}
