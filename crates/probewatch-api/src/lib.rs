//! # probewatch API
//!
//! HTTP layer for registering probe jobs and reading their history.
//!
//! ```text
//! GET    /                           - Greeting
//! GET    /api/fetcher                - List jobs
//! POST   /api/fetcher                - Create job {"url", "interval"}
//! DELETE /api/fetcher/{id}           - Stop and delete job
//! GET    /api/fetcher/{id}/history   - Probe history of a job
//! ```
//!
//! Handlers translate between JSON and the core types; scheduling and
//! storage live in `probewatch-worker` and `probewatch-core`.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::{
    handlers::{CreateJobRequest, CreateJobResponse},
    routes::create_router,
};
pub use server::ApiServer;
pub use state::AppState;
