//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{create_job, delete_job, index, job_history, list_jobs};
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// /                              - Greeting
///
/// /api/fetcher
///   GET    /api/fetcher              - List jobs
///   POST   /api/fetcher              - Create job
///   DELETE /api/fetcher/{id}         - Delete job
///   GET    /api/fetcher/{id}/history - Job history
/// ```
///
/// Request bodies larger than `state.request_max_bytes` are rejected with
/// 413 before they are decoded.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.request_max_bytes;

    let fetcher_routes = Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/{id}", delete(delete_job))
        .route("/{id}/history", get(job_history))
        .with_state(state);

    Router::new()
        .route("/", get(index))
        .nest("/api/fetcher", fetcher_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
