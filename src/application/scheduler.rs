//! AutoCheckoutScheduler - Background task running the overdue check-in sweep.
//!
//! Sweeps once immediately, then on every interval tick. A failed sweep is
//! logged and the loop keeps ticking; the next tick is the retry.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 5 min | Time between sweeps |
//! | `viewing_today` | true | Raise the refresh notification when rows close |
//!
//! ## Shutdown
//!
//! [`AutoCheckoutScheduler::spawn`] returns an [`AutoCheckoutTask`] owning the
//! loop. `shutdown()` signals it and waits for the loop to exit.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use super::handlers::attendance::{
    SweepOverdueCheckinsCommand, SweepOverdueCheckinsHandler, SweepResult,
};

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct AutoCheckoutScheduler {
    sweep: Arc<SweepOverdueCheckinsHandler>,
    interval: Duration,
    viewing_today: bool,
}

impl AutoCheckoutScheduler {
    pub fn new(sweep: Arc<SweepOverdueCheckinsHandler>) -> Self {
        Self {
            sweep,
            interval: DEFAULT_SWEEP_INTERVAL,
            viewing_today: true,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_viewing_today(mut self, viewing_today: bool) -> Self {
        self.viewing_today = viewing_today;
        self
    }

    /// Runs one sweep. Errors are logged, never returned.
    pub async fn tick_once(&self) -> Option<SweepResult> {
        match self
            .sweep
            .handle(SweepOverdueCheckinsCommand::now(self.viewing_today))
            .await
        {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::error!(error = %err, "auto-checkout sweep failed");
                None
            }
        }
    }

    /// Runs until `shutdown` flips to true. The first tick fires immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("auto-checkout scheduler stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.tick_once().await;
                }
            }
        }
    }

    pub fn spawn(self) -> AutoCheckoutTask {
        let (tx, rx) = watch::channel(false);
        tracing::info!(interval_secs = self.interval.as_secs(), "auto-checkout scheduler started");
        let handle = tokio::spawn(async move { self.run(rx).await });
        AutoCheckoutTask { shutdown: tx, handle }
    }
}

/// Handle owning the spawned sweep loop.
pub struct AutoCheckoutTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AutoCheckoutTask {
    /// Stops the loop and waits for it. An in-flight sweep finishes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.handle.await {
            tracing::error!(error = %err, "auto-checkout scheduler panicked");
        }
    }
}
