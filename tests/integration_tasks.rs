#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, missing_debug_implementations, unreachable_pub)]
mod common;

use common::MockBackend;
use serde_json::json;
use tasksaathi_client::ClientError;
use tasksaathi_client::config::ApiProfile;
use tasksaathi_client::domain::session::Role;
use tasksaathi_client::domain::task::{NewTask, TaskChanges, TaskPriority, TaskQuery, TaskStatus};
use uuid::Uuid;

#[tokio::test]
async fn test_get_tasks_sends_bearer_and_reads_page() {
    let backend = MockBackend::start().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    backend.respond(
        "GET",
        "/api/tasks/",
        200,
        json!({
            "count": 2,
            "currentPage": 1,
            "totalPages": 1,
            "next": null,
            "previous": null,
            "results": [common::task_json(first, "Stock count", "pending"), common::task_json(second, "Invoices", "completed")]
        }),
    );

    let (client, _) = backend.client(ApiProfile::Current);
    let token = common::seed_session(&client, Role::Employer, None).await;

    let tasks = client.get_tasks(&TaskQuery::default()).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, first);
    assert_eq!(tasks[0].status, Some(TaskStatus::Pending));
    assert_eq!(tasks[0].assigned_to_name.as_deref(), Some("Bikash Thapa"));
    assert_eq!(tasks[1].status, Some(TaskStatus::Completed));

    let request = backend.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.authorization, Some(format!("Bearer {token}")));
    assert_eq!(request.query, None);
}

#[tokio::test]
async fn test_get_tasks_passes_filters() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/tasks/", 200, common::wrapped(json!([])));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employer, None).await;

    let assignee = Uuid::new_v4();
    let query = TaskQuery {
        status: Some(TaskStatus::InProgress),
        priority: Some(TaskPriority::High),
        search: Some("shelf stock".to_string()),
        ordering: Some("-due_date".to_string()),
        assigned_to: Some(assignee),
        limit: Some(10),
        ..TaskQuery::default()
    };
    let tasks = client.get_tasks(&query).await.unwrap();
    assert!(tasks.is_empty());

    let request = backend.last_request();
    assert_eq!(
        request.query.as_deref(),
        Some(
            format!(
                "status=in_progress&priority=high&search=shelf+stock&ordering=-due_date&assignedTo={assignee}&limit=10"
            )
            .as_str()
        )
    );
}

#[tokio::test]
async fn test_get_tasks_failures() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    backend.respond("GET", "/api/tasks/", 401, json!({"detail": "Given token not valid for any token type"}));
    let err = client.get_tasks(&TaskQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Given token not valid for any token type");
    assert_eq!(err.status(), Some(401));

    backend.respond("GET", "/api/tasks/", 500, json!({}));
    let err = client.get_tasks(&TaskQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch tasks");
}

#[tokio::test]
async fn test_unauthenticated_calls_send_nothing() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(ApiProfile::Current);

    assert!(matches!(client.get_tasks(&TaskQuery::default()).await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(client.get_my_tasks().await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(client.get_company_tasks().await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(client.delete_task(Uuid::new_v4()).await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(
        client.update_task_status(Uuid::new_v4(), TaskStatus::Completed).await,
        Err(ClientError::NotAuthenticated)
    ));

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_my_tasks_and_company_tasks() {
    let backend = MockBackend::start().await;
    let mine = Uuid::new_v4();
    backend.respond("GET", "/api/tasks/my-tasks/", 200, json!([common::task_json(mine, "Deliver order", "in_progress")]));
    backend.respond("GET", "/api/tasks/company-tasks/", 403, json!({"detail": "Only employers can view company tasks"}));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    let tasks = client.get_my_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, mine);
    assert_eq!(tasks[0].status, Some(TaskStatus::InProgress));

    let err = client.get_company_tasks().await.unwrap_err();
    assert_eq!(err.to_string(), "Only employers can view company tasks");

    backend.respond("GET", "/api/tasks/company-tasks/", 500, json!(null));
    let err = client.get_company_tasks().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch company tasks");

    backend.respond("GET", "/api/tasks/my-tasks/", 502, json!(null));
    let err = client.get_my_tasks().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch tasks");
}

#[tokio::test]
async fn test_create_task() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.respond("POST", "/api/tasks/", 201, common::task_json(id, "Stock count", "pending"));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employer, None).await;

    let assignee = Uuid::new_v4();
    let task = NewTask {
        title: "Stock count".to_string(),
        description: "Count the warehouse".to_string(),
        assigned_to: assignee,
        status: None,
        priority: Some(TaskPriority::High),
        due_date: Some("2026-11-02".to_string()),
        created_by: None,
        company_id: None,
    };
    let created = client.create_task(&task).await.unwrap();
    assert_eq!(created.id, id);

    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.body,
        json!({
            "title": "Stock count",
            "description": "Count the warehouse",
            "assignedTo": assignee.to_string(),
            "priority": "high",
            "dueDate": "2026-11-02"
        })
    );
}

#[tokio::test]
async fn test_create_task_validation_error() {
    let backend = MockBackend::start().await;
    backend.respond(
        "POST",
        "/api/tasks/",
        400,
        json!({"title": ["Ensure this field has no more than 200 characters."], "assignedTo": ["This field is required."]}),
    );

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employer, None).await;

    let task = NewTask {
        title: "Stock count".to_string(),
        description: String::new(),
        assigned_to: Uuid::new_v4(),
        status: None,
        priority: None,
        due_date: None,
        created_by: None,
        company_id: None,
    };
    let err = client.create_task(&task).await.unwrap_err();
    assert_eq!(err.to_string(), "title: Ensure this field has no more than 200 characters.");

    backend.respond("POST", "/api/tasks/", 500, json!({}));
    let err = client.create_task(&task).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create task");
}

#[tokio::test]
async fn test_update_task_sends_only_changes() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    let path = format!("/api/tasks/{id}/");
    backend.respond("PATCH", &path, 200, common::task_json(id, "Renamed", "pending"));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employer, None).await;

    let changes = TaskChanges { title: Some("Renamed".to_string()), ..TaskChanges::default() };
    let updated = client.update_task(id, &changes).await.unwrap();
    assert_eq!(updated.title.as_deref(), Some("Renamed"));

    let request = backend.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, path);
    assert_eq!(request.body, json!({"title": "Renamed"}));

    backend.respond("PATCH", &path, 500, json!({}));
    let err = client.update_task(id, &changes).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to update task");
}

#[tokio::test]
async fn test_update_task_status() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    let path = format!("/api/tasks/{id}/update-status/");
    backend.respond("PATCH", &path, 200, common::wrapped(common::task_json(id, "Stock count", "completed")));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    let updated = client.update_task_status(id, TaskStatus::Completed).await.unwrap();
    assert_eq!(updated.status, Some(TaskStatus::Completed));
    assert_eq!(backend.last_request().body, json!({"status": "completed"}));

    backend.respond("PATCH", &path, 400, json!({"message": "Invalid status value"}));
    let err = client.update_task_status(id, TaskStatus::Pending).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid status value");

    backend.respond("PATCH", &path, 500, json!(null));
    let err = client.update_task_status(id, TaskStatus::Pending).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to update task status");
}

#[tokio::test]
async fn test_delete_task_accepts_empty_success() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employer, None).await;

    let gone = Uuid::new_v4();
    backend.respond_empty("DELETE", &format!("/api/tasks/{gone}/"), 204);
    client.delete_task(gone).await.unwrap();
    assert_eq!(backend.last_request().method, "DELETE");

    let wrapped = Uuid::new_v4();
    backend.respond("DELETE", &format!("/api/tasks/{wrapped}/"), 200, common::wrapped(json!(null)));
    client.delete_task(wrapped).await.unwrap();
}

#[tokio::test]
async fn test_delete_task_failures() {
    let backend = MockBackend::start().await;
    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    let id = Uuid::new_v4();
    let path = format!("/api/tasks/{id}/");

    backend.respond("DELETE", &path, 403, json!({"detail": "You do not have permission to perform this action."}));
    let err = client.delete_task(id).await.unwrap_err();
    assert_eq!(err.to_string(), "You do not have permission to perform this action.");

    backend.respond_empty("DELETE", &path, 500);
    let err = client.delete_task(id).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete task");
}

#[tokio::test]
async fn test_legacy_profile_paths() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.respond("GET", "/tasks/", 200, json!([]));
    backend.respond("GET", "/tasks/my-tasks/", 200, json!([]));
    backend.respond("GET", "/tasks/company-tasks/", 200, json!([]));
    backend.respond("PATCH", &format!("/tasks/{id}/update-status/"), 200, common::task_json(id, "x", "pending"));

    let (client, _) = backend.client(ApiProfile::Legacy);
    common::seed_session(&client, Role::Employer, None).await;

    client.get_tasks(&TaskQuery::default()).await.unwrap();
    client.get_my_tasks().await.unwrap();
    client.get_company_tasks().await.unwrap();
    client.update_task_status(id, TaskStatus::Pending).await.unwrap();

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/tasks/".to_string(),
            "/tasks/my-tasks/".to_string(),
            "/tasks/company-tasks/".to_string(),
            format!("/tasks/{id}/update-status/"),
        ]
    );
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/api/tasks/my-tasks/", 200, json!({"unexpected": true}));

    let (client, _) = backend.client(ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    let err = client.get_my_tasks().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.to_string(), "Unexpected response from server");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let (client, _) = common::client_for(&common::dead_url().await, ApiProfile::Current);
    common::seed_session(&client, Role::Employee, None).await;

    let err = client.get_my_tasks().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.to_string(), "Network error");
}
