//! # probewatch Worker
//!
//! Background probing for registered jobs.
//!
//! - [`Manager`]: runs one cancellable periodic activity per job id
//! - [`Probe`]: one bounded-time HTTP GET whose outcome is appended to the
//!   job's history
//! - [`HttpFetcher`]: ties the two together behind the [`Fetcher`] trait used
//!   by the API layer
//!
//! ```text
//!  create ──► JobStore::create ──► Fetcher::start ──► Manager::start(id, interval, probe)
//!                                                           │ every interval
//!                                                           ▼
//!                                                     Probe::execute ──► JobStore::append_history
//!  delete ──► Fetcher::stop ──► JobStore::delete
//! ```

pub mod error;
pub mod fetcher;
pub mod manager;

pub use error::FetchError;
pub use fetcher::{Fetcher, HttpFetcher, Probe, DEFAULT_PROBE_TIMEOUT};
pub use manager::Manager;
