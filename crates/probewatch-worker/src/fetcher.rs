//! HTTP probe execution.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use probewatch_config::ProbeConfig;
use probewatch_core::{HistoryEntry, Job, JobId, JobStore};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::manager::Manager;

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Starts and stops periodic probing of jobs.
pub trait Fetcher: Send + Sync {
    /// Begin probing `job` on its interval.
    fn start(&self, job: &Job);

    /// Stop probing job `id`. Returns whether it was being probed.
    fn stop(&self, id: JobId) -> bool;

    /// Stop probing every job.
    fn stop_all(&self) -> usize;
}

/// One bounded-time GET against a job's URL.
///
/// Every call to [`Probe::execute`] appends exactly one history entry,
/// whether or not the request succeeded, unless the job has been deleted. Non-2xx responses still count as
/// success; only transport, timeout and decoding failures leave the payload
/// empty.
#[derive(Clone)]
pub struct Probe {
    id: JobId,
    url: Arc<str>,
    client: Client,
    timeout: Duration,
    store: Arc<dyn JobStore>,
}

impl Probe {
    /// Perform the request and append its outcome to the job's history.
    ///
    /// Returns the recorded entry, or `None` when the job no longer exists
    /// and the outcome was discarded.
    pub async fn execute(&self) -> Option<HistoryEntry> {
        let started = Instant::now();
        let response = match self.fetch().await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(job_id = self.id, url = %self.url, timeout = e.is_timeout(), "Probe failed: {}", e);
                None
            }
        };
        let duration = started.elapsed().as_millis() as f64 / 1000.0;
        let created_at = unix_with_fraction(Utc::now());

        let entry = HistoryEntry {
            response,
            duration,
            created_at,
        };
        debug!(job_id = self.id, duration, success = entry.is_success(), "Probe finished");
        self.store
            .append_history(self.id, entry.clone())
            .await
            .then_some(entry)
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&*self.url)
            .timeout(self.timeout)
            .send()
            .await?;
        let body = response.bytes().await?;
        Ok(String::from_utf8(body.to_vec())?)
    }
}

/// Seconds since the Unix epoch with a nanosecond fraction.
fn unix_with_fraction(time: DateTime<Utc>) -> f64 {
    match time.timestamp_nanos_opt() {
        Some(nanos) => nanos as f64 / 1e9,
        None => time.timestamp() as f64,
    }
}

/// [`Fetcher`] that probes jobs over HTTP and records into a [`JobStore`].
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    manager: Arc<Manager>,
    store: Arc<dyn JobStore>,
}

impl HttpFetcher {
    /// Create a fetcher with the default probe timeout.
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self {
            client: Client::new(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            manager: Arc::new(Manager::new()),
            store,
        }
    }

    /// Create a fetcher from probe configuration.
    pub fn from_config(store: Arc<dyn JobStore>, config: &ProbeConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            timeout: config.timeout(),
            manager: Arc::new(Manager::new()),
            store,
        })
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the probe for a job.
    pub fn probe(&self, id: JobId, url: impl Into<Arc<str>>) -> Probe {
        Probe {
            id,
            url: url.into(),
            client: self.client.clone(),
            timeout: self.timeout,
            store: self.store.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> &Manager {
        &self.manager
    }
}

impl Fetcher for HttpFetcher {
    fn start(&self, job: &Job) {
        let Some(interval) = job.interval_duration() else {
            warn!(job_id = job.id, interval = job.interval, "Refusing to start job with invalid interval");
            return;
        };

        // A job deleted before its activity registered cannot be stopped by
        // the delete; the activity stops itself once its result is discarded.
        let probe = self.probe(job.id, job.url.as_str());
        let manager = self.manager.clone();
        self.manager.start(job.id, interval, move || {
            let probe = probe.clone();
            let manager = manager.clone();
            async move {
                if probe.execute().await.is_none() && manager.stop(probe.id) {
                    debug!(job_id = probe.id, "Job deleted, stopped its activity");
                }
            }
        });
    }

    fn stop(&self, id: JobId) -> bool {
        self.manager.stop(id)
    }

    fn stop_all(&self) -> usize {
        self.manager.stop_all()
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
