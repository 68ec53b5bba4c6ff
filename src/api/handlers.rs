//! HTTP handlers for task operations.
//!
//! Handlers only decode, delegate to [`TaskService`] and encode. Bodies are
//! taken as raw bytes so that decoding failures go through the same error
//! mapping as every other outcome.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bytes::Bytes;
use serde::Serialize;

use super::dto::{TaskResponse, decode_payload};
use super::error::ApiErrorResponse;
use crate::domain::TaskId;
use crate::service::{TaskError, TaskService};

// =============================================================================
// Application State
// =============================================================================

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Task operations over the configured store.
    pub service: Arc<TaskService>,
}

impl AppState {
    /// Creates a new `AppState`.
    #[must_use]
    pub fn new(service: TaskService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

fn parse_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    raw.parse::<TaskId>()
        .map_err(|error| ApiErrorResponse::from(TaskError::from(error)))
}

// =============================================================================
// Task Handlers
// =============================================================================

/// GET /todo - List every task.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.service.list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /todo - Create a task.
///
/// # Request Body
///
/// ```json
/// { "title": "Clean the room", "completed": false }
/// ```
///
/// # Response
///
/// - **201 Created**: the stored task, with its assigned id
/// - **400 Bad Request**: malformed body, empty title or a client-chosen id
/// - **409 Conflict**: the assigned id is already taken
/// - **500 Internal Server Error**: storage failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for every non-success outcome listed above.
pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let request = decode_payload(&body)?.into_create();
    let task = state.service.create(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// GET /todo/{id} - Fetch one task.
///
/// # Errors
///
/// Returns 400 for a non-numeric id, 404 if absent, 500 on storage failure.
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    let task = state.service.get(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// PATCH /todo - Overwrite title and completion flag of a task.
///
/// # Request Body
///
/// ```json
/// { "id": 1, "title": "Make the bed", "completed": true }
/// ```
///
/// # Errors
///
/// Returns 400 for a malformed body, a missing id or an empty title, 404 if
/// the task does not exist, 500 on storage failure.
pub async fn modify_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let request = decode_payload(&body)?.into_modify()?;
    let task = state.service.modify(request).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /todo/{id} - Delete a task. Responds 200 with an empty body.
///
/// # Errors
///
/// Returns 400 for a non-numeric id, 404 if absent, 500 on storage failure.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::OK)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// GET /health - Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
