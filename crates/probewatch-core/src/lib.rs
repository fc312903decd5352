//! # probewatch Core
//!
//! Data model and shared state for the probewatch service.
//!
//! - [`Job`]: a registered probe target polled on its own interval
//! - [`HistoryEntry`]: the outcome of one probe
//! - [`JobStore`]: the single source of truth for jobs and their history,
//!   safe to share between request handlers and background probes
//!
//! The store knows nothing about scheduling. Whether a job is currently being
//! probed is tracked by the worker crate's `Manager`.

pub mod job;

pub use job::{
    interval_from_secs, HistoryEntry, Job, JobId, JobStore, MemoryJobStore, NewJob, MAX_INTERVAL,
};
