//! Job API handlers.
//!
//! Create stores the job and then starts probing it; delete stops probing
//! before removing the job, so a deleted job never gets a new tick.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use probewatch_core::{interval_from_secs, HistoryEntry, Job, JobId, NewJob, MAX_INTERVAL};

use crate::error::ApiError;
use crate::state::AppState;

/// Request to register a job.
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    /// URL to probe.
    pub url: String,

    /// Poll interval in seconds; fractions allowed.
    pub interval: f64,
}

impl CreateJobRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if interval_from_secs(self.interval).is_none() {
            return Err(ApiError::BadRequest(format!(
                "interval must be a positive number of seconds up to {}, got {}",
                MAX_INTERVAL.as_secs(),
                self.interval
            )));
        }
        url::Url::parse(&self.url)
            .map_err(|e| ApiError::BadRequest(format!("invalid url '{}': {}", self.url, e)))?;
        Ok(())
    }
}

/// Response to a successful create.
#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub id: JobId,
}

/// GET /
pub async fn index() -> Json<&'static str> {
    Json("Hello world!")
}

/// List all jobs.
///
/// GET /api/fetcher
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<Vec<Job>> {
    Json(state.store.list().await)
}

/// Register a job and start probing it.
///
/// POST /api/fetcher
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreateJobResponse>), ApiError> {
    let request = decode_create_request(body)?;

    let job = state
        .store
        .create(NewJob::new(request.url, request.interval))
        .await;
    state.fetcher.start(&job);
    info!("Created job {} (url: {}, interval: {}s)", job.id, job.url, job.interval);

    Ok((StatusCode::CREATED, Json(CreateJobResponse { id: job.id })))
}

fn decode_create_request(
    body: Result<Bytes, BytesRejection>,
) -> Result<CreateJobRequest, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("create job: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })?;

    let request: CreateJobRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("create job: json decode: {}", e);
        ApiError::BadRequest(e.to_string())
    })?;

    request.validate().inspect_err(|e| warn!("create job: {}", e))?;
    Ok(request)
}

/// Stop probing a job and delete it.
///
/// DELETE /api/fetcher/{id}
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    state.fetcher.stop(id);
    if state.store.delete(id).await {
        info!("Deleted job {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id.to_string()))
    }
}

/// Probe history of a job.
///
/// GET /api/fetcher/{id}/history
pub async fn job_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let id = parse_id(&id)?;

    state
        .store
        .history(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

fn parse_id(raw: &str) -> Result<JobId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(raw.to_string()))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
