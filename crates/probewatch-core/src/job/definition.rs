//! Job record and probe history entry.

use std::time::Duration;

use serde::{Serialize, Serializer};

/// Job identifier assigned by the store.
pub type JobId = u64;

/// Longest accepted poll interval, thirty years.
pub const MAX_INTERVAL: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Poll interval in seconds as a [`Duration`].
///
/// `None` unless `secs` is positive, finite and at most [`MAX_INTERVAL`].
pub fn interval_from_secs(secs: f64) -> Option<Duration> {
    if secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|interval| *interval <= MAX_INTERVAL)
}

/// Largest f64 below which every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize fractional seconds, writing integral values without a trailing
/// `.0` (`42` rather than `42.0`).
fn serialize_seconds<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Job to be registered with a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    /// Target URL polled on every tick.
    pub url: String,
    /// Poll interval in seconds.
    pub interval: f64,
    /// Initial history, normally empty.
    pub history: Vec<HistoryEntry>,
}

impl NewJob {
    /// Create a new job with empty history.
    pub fn new(url: impl Into<String>, interval: f64) -> Self {
        Self {
            url: url.into(),
            interval,
            history: Vec::new(),
        }
    }

    /// Seed the job with existing history entries.
    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }
}

/// Stored job record.
///
/// History is never part of the serialized projection; it is exposed
/// separately through [`JobStore::history`](super::JobStore::history).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    /// Unique, strictly increasing identifier.
    pub id: JobId,
    /// Target URL.
    pub url: String,
    /// Poll interval in seconds.
    #[serde(serialize_with = "serialize_seconds")]
    pub interval: f64,
    /// Probe outcomes in chronological order.
    #[serde(skip)]
    pub history: Vec<HistoryEntry>,
}

impl Job {
    /// Poll interval as a [`Duration`], see [`interval_from_secs`].
    pub fn interval_duration(&self) -> Option<Duration> {
        interval_from_secs(self.interval)
    }

    /// Copy of the record without its history.
    pub fn summary(&self) -> Job {
        Job {
            id: self.id,
            url: self.url.clone(),
            interval: self.interval,
            history: Vec::new(),
        }
    }
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Response body, absent when the probe failed.
    pub response: Option<String>,
    /// Probe duration in seconds.
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: f64,
    /// Completion time in seconds since the Unix epoch.
    #[serde(serialize_with = "serialize_seconds")]
    pub created_at: f64,
}

impl HistoryEntry {
    /// Entry for a probe that returned a body.
    pub fn success(response: impl Into<String>, duration: f64, created_at: f64) -> Self {
        Self {
            response: Some(response.into()),
            duration,
            created_at,
        }
    }

    /// Entry for a probe that failed.
    pub fn failure(duration: f64, created_at: f64) -> Self {
        Self {
            response: None,
            duration,
            created_at,
        }
    }

    /// Whether the probe produced a response body.
    pub fn is_success(&self) -> bool {
        self.response.is_some()
    }
}
