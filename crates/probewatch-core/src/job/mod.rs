//! Job module.
//!
//! Provides job records, probe history and the in-memory job store.

mod definition;
mod store;

pub use definition::{interval_from_secs, HistoryEntry, Job, JobId, NewJob, MAX_INTERVAL};
pub use store::{JobStore, MemoryJobStore};
