use std::{hash::Hash, sync::Arc};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{clock::Clock, limiter::RateLimiter};

/// Owns the periodic idle sweep of a [`RateLimiter`].
///
/// The sweep stops on [`SweeperHandle::shutdown`] or when the handle is dropped.
#[derive(Debug)]
pub struct SweeperHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Stops the sweep and waits for the task to finish its current pass.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Rate limiter sweeper ended abnormally: {e}");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl<K, C> RateLimiter<K, C>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    C: Clock,
{
    /// Spawns the idle sweep on the current tokio runtime.
    ///
    /// The first pass runs one `sweep_interval` after the call.
    pub fn start_sweeper(self: &Arc<Self>) -> SweeperHandle {
        let token = CancellationToken::new();
        let limiter = Arc::clone(self);
        let cancelled = token.clone();
        let period = self.config().sweep_interval;

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!("Rate limiter sweeper started (every {period:?}).");

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        let evicted = limiter.sweep();
                        if evicted > 0 {
                            tracing::debug!(
                                "Evicted {evicted} idle rate limit buckets, {} still tracked.",
                                limiter.len()
                            );
                        }
                    }
                }
            }

            tracing::info!("Rate limiter sweeper stopped.");
        });

        SweeperHandle {
            token,
            task: Some(task),
        }
    }
}
