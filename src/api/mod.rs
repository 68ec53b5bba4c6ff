//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use dto::{TaskPayload, TaskResponse, decode_payload};
pub use error::ApiErrorResponse;
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, get_task, health_check, list_tasks,
    modify_task,
};
pub use router::router;
