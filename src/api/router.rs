//! Static route table.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, modify_task,
};

/// Builds the application router with tracing and open CORS.
///
/// Other verbs on known paths are answered with 405 by the router itself.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/todo",
            get(list_tasks).post(create_task).patch(modify_task),
        )
        .route("/todo/{id}", get(get_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
