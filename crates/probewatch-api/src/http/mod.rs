//! HTTP interface module.
//!
//! Provides REST endpoints for job management and probe history.

pub mod handlers;
pub mod routes;
