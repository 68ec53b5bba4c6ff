//! Integration tests for the `SQLite` store.
//!
//! Each test works on its own database file inside a temporary directory.

mod common;

use axum::http::{Method, StatusCode};
use rstest::rstest;

use common::{create, open_sqlite, send, sqlite_app};
use todo_service::domain::{Task, TaskId};
use todo_service::infrastructure::{RepositoryError, TaskRepository};

#[rstest]
#[tokio::test]
async fn test_listing_keeps_insertion_order() {
    let directory = tempfile::tempdir().unwrap();
    let repository = open_sqlite(directory.path()).await;

    for (id, title) in [(3, "c"), (1, "a"), (2, "b")] {
        repository
            .create(&Task::new(TaskId::new(id), title))
            .await
            .unwrap();
    }

    let titles: Vec<String> = repository
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    // id is the rowid, so rows come back by id
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[rstest]
#[tokio::test]
async fn test_save_overwrites_title_and_flag() {
    let directory = tempfile::tempdir().unwrap();
    let repository = open_sqlite(directory.path()).await;
    repository
        .create(&Task::new(TaskId::new(1), "Clean the room"))
        .await
        .unwrap();

    let updated = Task::new(TaskId::new(1), "Make the bed").with_completed(true);
    repository.save(&updated).await.unwrap();

    assert_eq!(
        repository.find_by_id(TaskId::new(1)).await.unwrap(),
        Some(updated)
    );
}

#[rstest]
#[tokio::test]
async fn test_delete_removes_record() {
    let directory = tempfile::tempdir().unwrap();
    let repository = open_sqlite(directory.path()).await;
    let task = Task::new(TaskId::new(1), "a");
    repository.create(&task).await.unwrap();

    repository.delete(&task).await.unwrap();

    assert!(repository.find_all().await.unwrap().is_empty());
    assert_eq!(
        repository.delete(&task).await,
        Err(RepositoryError::Missing(TaskId::new(1)))
    );
}

#[rstest]
#[tokio::test]
async fn test_out_of_range_id_cannot_be_stored() {
    let directory = tempfile::tempdir().unwrap();
    let repository = open_sqlite(directory.path()).await;
    let task = Task::new(TaskId::new(u64::MAX), "too big");

    assert_eq!(
        repository.create(&task).await,
        Err(RepositoryError::IdOutOfRange(task.id))
    );
}

#[rstest]
#[tokio::test]
async fn test_data_survives_reopen() {
    let directory = tempfile::tempdir().unwrap();

    {
        let repository = open_sqlite(directory.path()).await;
        repository
            .create(&Task::new(TaskId::new(1), "a").with_completed(true))
            .await
            .unwrap();
        repository
            .create(&Task::new(TaskId::new(2), "b"))
            .await
            .unwrap();
        repository.pool().close().await;
    }

    let reopened = open_sqlite(directory.path()).await;
    assert_eq!(
        reopened.find_all().await.unwrap(),
        vec![
            Task::new(TaskId::new(1), "a").with_completed(true),
            Task::new(TaskId::new(2), "b"),
        ]
    );
    assert_eq!(reopened.max_id().await.unwrap(), Some(TaskId::new(2)));
}

#[rstest]
#[tokio::test]
async fn test_id_sequence_resumes_after_restart() {
    let directory = tempfile::tempdir().unwrap();

    {
        let app = sqlite_app(directory.path()).await;
        for title in ["a", "b", "c"] {
            create(&app, title).await;
        }
        let response = send(&app, Method::DELETE, "/todo/3", None).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let app = sqlite_app(directory.path()).await;
    let created = create(&app, "d").await;

    // 3 was deleted, so the highest stored id is 2
    assert_eq!(created.id, 3);

    let listed = send(&app, Method::GET, "/todo", None).await.tasks();
    let ids: Vec<u64> = listed.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test]
async fn test_endpoints_over_sqlite() {
    let directory = tempfile::tempdir().unwrap();
    let app = sqlite_app(directory.path()).await;

    let created = create(&app, "Clean the room").await;
    assert_eq!(created.id, 1);

    let modified = send(
        &app,
        Method::PATCH,
        "/todo",
        Some(r#"{"id":1,"title":"Make the bed","completed":true}"#),
    )
    .await;
    assert_eq!(modified.status, StatusCode::OK);

    let fetched = send(&app, Method::GET, "/todo/1", None).await;
    assert_eq!(
        fetched.body,
        r#"{"id":1,"title":"Make the bed","completed":true}"#
    );

    let missing = send(&app, Method::PATCH, "/todo", Some(r#"{"id":9,"title":"x"}"#)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
