//! Periodic polling task with an owning handle
//!
//! A poll loop runs once immediately and then every `period`. Each iteration
//! is awaited before the next tick is considered, so iterations of one loop
//! never overlap. Shutting down drops the in-flight iteration, which aborts
//! any request it was waiting on.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest accepted period; `tokio::time::interval` panics on zero
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Owns a running poll loop. Dropping the handle aborts the loop.
pub struct PollHandle {
    name: &'static str,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

/// Spawn a poll loop that calls `poll` immediately and then every `period`
pub fn spawn_periodic<F, Fut>(name: &'static str, period: Duration, mut poll: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let period = period.max(MIN_PERIOD);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(poller = name, period_secs = period.as_secs(), "Poll loop started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    tracing::debug!(poller = name, "Dropping in-flight poll");
                    break;
                }
                _ = poll() => {}
            }
        }

        tracing::debug!(poller = name, "Poll loop stopped");
    });

    PollHandle {
        name,
        shutdown_tx,
        task: Some(task),
    }
}

impl PollHandle {
    /// Poller name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// Once this returns, the poll closure will not run again and no
    /// in-flight iteration survives.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(poller = self.name, error = %e, "Poll loop panicked");
                }
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
