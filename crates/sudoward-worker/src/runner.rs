//! Sweeper runner: drives the expiry sweep on a fixed interval until stopped.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing;

use crate::sweeper::ExpirySweeper;

/// Handle to a running sweeper task.
#[derive(Debug)]
pub struct SweeperHandle {
    /// Signals the loop to stop.
    shutdown: watch::Sender<bool>,
    /// The sweeper task.
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop scheduling sweeps and wait for the task to exit.
    ///
    /// A sweep already in progress runs to completion first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Expiry sweeper task ended abnormally");
        }
    }
}

impl ExpirySweeper {
    /// Spawn the periodic sweep loop.
    ///
    /// The first sweep runs immediately, then once per interval.
    pub fn start(self) -> SweeperHandle {
        let (shutdown, cancel) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(cancel).await });
        SweeperHandle { shutdown, task }
    }

    async fn run(self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Expiry sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Expiry sweeper received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let now = self.clock.now();
                    self.sweep_once(now).await;
                }
            }
        }

        tracing::info!("Expiry sweeper stopped");
    }
}
