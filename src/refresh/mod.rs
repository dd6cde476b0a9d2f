//! Cancellable periodic jobs
//!
//! Each job owns its task handle and shutdown channel. `stop` waits for the
//! current iteration to finish; dropping a job without stopping it aborts the
//! task so no timer outlives its owner.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A task run on a fixed interval until stopped
pub struct PeriodicJob {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicJob {
    /// Spawn `task` every `period`, starting immediately
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.changed() => break,

                    _ = interval.tick() => {
                        task().await;
                    }
                }
            }

            tracing::debug!(job = name, "Periodic job stopped");
        });

        tracing::debug!(job = name, period_ms = period.as_millis() as u64, "Periodic job started");

        Self {
            name,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Job name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal shutdown and wait for the task to exit
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(job = self.name, error = %e, "Periodic job ended abnormally");
            }
        }
    }
}

impl Drop for PeriodicJob {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
