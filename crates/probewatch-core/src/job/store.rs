//! Concurrent job store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::definition::{HistoryEntry, Job, JobId, NewJob};

/// Shared store of jobs and their probe history.
///
/// Every read returns an owned snapshot, so callers never observe a partially
/// applied write and never hold the store's lock.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Store a job under the next unused id and return the stored copy.
    async fn create(&self, job: NewJob) -> Job;

    /// All jobs ordered by ascending id, without history.
    async fn list(&self) -> Vec<Job>;

    /// Remove a job. Returns whether it existed.
    async fn delete(&self, id: JobId) -> bool;

    /// Append a probe outcome. Dropped if the job no longer exists.
    ///
    /// Returns whether the job existed.
    async fn append_history(&self, id: JobId, entry: HistoryEntry) -> bool;

    /// History of a job, or `None` if the job does not exist.
    async fn history(&self, id: JobId) -> Option<Vec<HistoryEntry>>;
}

#[derive(Default)]
struct StoreInner {
    last_id: JobId,
    jobs: BTreeMap<JobId, Job>,
}

/// In-memory job store.
pub struct MemoryJobStore {
    inner: RwLock<StoreInner>,
}

impl MemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: NewJob) -> Job {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let job = Job {
            id: inner.last_id,
            url: job.url,
            interval: job.interval,
            history: job.history,
        };
        inner.jobs.insert(job.id, job.clone());
        debug!("Stored job {} ({})", job.id, job.url);
        job
    }

    async fn list(&self) -> Vec<Job> {
        let inner = self.inner.read().await;
        inner.jobs.values().map(Job::summary).collect()
    }

    async fn delete(&self, id: JobId) -> bool {
        let mut inner = self.inner.write().await;
        let existed = inner.jobs.remove(&id).is_some();
        if existed {
            debug!("Removed job {}", id);
        }
        existed
    }

    async fn append_history(&self, id: JobId, entry: HistoryEntry) -> bool {
        let mut inner = self.inner.write().await;
        match inner.jobs.get_mut(&id) {
            Some(job) => {
                job.history.push(entry);
                true
            }
            None => {
                debug!("Discarding probe result for deleted job {}", id);
                false
            }
        }
    }

    async fn history(&self, id: JobId) -> Option<Vec<HistoryEntry>> {
        let inner = self.inner.read().await;
        inner.jobs.get(&id).map(|job| job.history.clone())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
