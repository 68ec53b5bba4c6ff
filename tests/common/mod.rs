//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_service::api::{AppState, TaskResponse, router};
use todo_service::domain::Task;
use todo_service::infrastructure::{
    InMemoryTaskRepository, SqliteConfig, SqliteTaskRepository, TaskRepository,
};
use todo_service::service::{IdAllocator, TaskService};

// =============================================================================
// Application Helpers
// =============================================================================

/// Creates a router over an empty in-memory store.
pub fn in_memory_app() -> (InMemoryTaskRepository, Router) {
    let repository = InMemoryTaskRepository::new();
    let service = TaskService::new(Arc::new(repository.clone()), IdAllocator::default());
    (repository, router(AppState::new(service)))
}

/// Creates a router over an in-memory store already holding `tasks`, with
/// the id sequence starting at `next_id`.
pub async fn seeded_app(tasks: &[Task], next_id: u64) -> (InMemoryTaskRepository, Router) {
    let repository = InMemoryTaskRepository::new();
    for task in tasks {
        repository.create(task).await.unwrap();
    }
    let service = TaskService::new(
        Arc::new(repository.clone()),
        IdAllocator::starting_at(next_id),
    );
    (repository, router(AppState::new(service)))
}

/// Opens (or reopens) an `SQLite` store inside `directory`.
pub async fn open_sqlite(directory: &Path) -> SqliteTaskRepository {
    let config = SqliteConfig {
        database_path: directory.join("todo.db"),
        max_connections: 2,
    };
    SqliteTaskRepository::open(&config).await.unwrap()
}

/// Creates a router over an `SQLite` store inside `directory`, resuming the
/// id sequence after the highest stored id.
pub async fn sqlite_app(directory: &Path) -> Router {
    let repository: Arc<dyn TaskRepository> = Arc::new(open_sqlite(directory).await);
    let service = TaskService::bootstrap(repository).await.unwrap();
    router(AppState::new(service))
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Response status, `Content-Type` header and body text.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Decodes the body as a single task.
    pub fn task(&self) -> TaskResponse {
        serde_json::from_str(&self.body).unwrap()
    }

    /// Decodes the body as a task list.
    pub fn tasks(&self) -> Vec<TaskResponse> {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Sends one request through the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Creates a task through `POST /todo` and returns the decoded response.
pub async fn create(app: &Router, title: &str) -> TaskResponse {
    let body = serde_json::json!({ "title": title }).to_string();
    let response = send(app, Method::POST, "/todo", Some(&body)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.task()
}
