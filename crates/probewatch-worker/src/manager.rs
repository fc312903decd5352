//! Periodic activity manager.
//!
//! Each job id maps to at most one background tokio task that runs a unit of
//! work once per interval. Activities are stopped cooperatively through a
//! [`CancellationToken`]:
//!
//! - the first run happens one full interval after [`Manager::start`]
//! - a run never overlaps the previous run of the same job
//! - cancellation is checked before waiting for a tick and again right after
//!   waking, so a stop that races a tick wins
//! - a run already in progress when [`Manager::stop`] is called finishes, but
//!   no new run begins

use std::future::Future;
use std::time::Duration;

use dashmap::DashMap;
use probewatch_core::{JobId, MAX_INTERVAL};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

/// Shortest accepted interval; `tokio::time::interval_at` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Maps job ids to running periodic activities.
pub struct Manager {
    cancels: DashMap<JobId, CancellationToken>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Create a manager with no running activities.
    pub fn new() -> Self {
        Self {
            cancels: DashMap::new(),
        }
    }

    /// Start running `work` every `interval` for `id`.
    ///
    /// `interval` is clamped to `[1ms, MAX_INTERVAL]`.
    ///
    /// If `id` is already running, the previous activity is cancelled first
    /// so that at most one activity exists per id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(&self, id: JobId, interval: Duration, work: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let Some(first_tick) = Instant::now().checked_add(period) else {
            warn!(job_id = id, interval = ?period, "Interval out of range, not starting job activity");
            return;
        };

        let token = CancellationToken::new();
        if let Some(previous) = self.cancels.insert(id, token.clone()) {
            warn!(job_id = id, "Job already running, cancelling previous activity");
            previous.cancel();
        }

        let span = tracing::info_span!("job_activity", job_id = id);
        tokio::spawn(run_periodic(first_tick, period, token, work).instrument(span));

        info!(job_id = id, interval = ?period, "Started job activity");
    }

    /// Stop the activity for `id`. Returns whether one was running.
    pub fn stop(&self, id: JobId) -> bool {
        match self.cancels.remove(&id) {
            Some((_, token)) => {
                token.cancel();
                info!(job_id = id, "Stopped job activity");
                true
            }
            None => false,
        }
    }

    /// Stop every running activity. Returns how many were stopped.
    pub fn stop_all(&self) -> usize {
        let ids: Vec<JobId> = self.cancels.iter().map(|entry| *entry.key()).collect();
        let count = ids.into_iter().filter(|id| self.stop(*id)).count();
        if count > 0 {
            info!(count, "Stopped all job activities");
        }
        count
    }

    /// Whether an activity is registered for `id`.
    pub fn is_running(&self, id: JobId) -> bool {
        self.cancels.contains_key(&id)
    }

    /// Number of registered activities.
    pub fn active_count(&self) -> usize {
        self.cancels.len()
    }
}

async fn run_periodic<F, Fut>(
    first_tick: Instant,
    period: Duration,
    token: CancellationToken,
    work: F,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        // Stop wins over a tick that fired at the same time.
        if token.is_cancelled() {
            break;
        }
        work().await;
    }

    debug!("Job activity finished");
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
