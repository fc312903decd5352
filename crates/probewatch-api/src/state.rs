//! Application state.

use std::sync::Arc;

use probewatch_core::JobStore;
use probewatch_worker::Fetcher;

/// Default request body limit.
pub const DEFAULT_REQUEST_MAX_BYTES: usize = 1024 * 1024;

/// State shared across handlers.
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub fetcher: Arc<dyn Fetcher>,
    pub request_max_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn JobStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            store,
            fetcher,
            request_max_bytes: DEFAULT_REQUEST_MAX_BYTES,
        }
    }

    /// Set the request body limit.
    pub fn with_request_max_bytes(mut self, limit: usize) -> Self {
        self.request_max_bytes = limit;
        self
    }
}
