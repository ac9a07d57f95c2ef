//! Idle sweep
//!
//! The single periodic background task of the subsystem: every sweep
//! interval it asks the coordinator to evict members idle longer than the
//! configured timeout. Independent of connect/disconnect traffic and
//! tolerant of entries appearing or disappearing mid-scan.

use crate::presence::PresenceLifecycleCoordinator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Periodically evicts stale presence entries
pub struct IdleSweeper {
    coordinator: Arc<PresenceLifecycleCoordinator>,
    /// How often the sweep runs
    sweep_interval: Duration,
    /// Idle time after which a member is evicted
    idle_timeout: Duration,
    /// Whether the sweeper is running
    running: Arc<AtomicBool>,
}

impl IdleSweeper {
    pub fn new(
        coordinator: Arc<PresenceLifecycleCoordinator>,
        sweep_interval: Duration,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            coordinator,
            sweep_interval,
            idle_timeout,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the sweep loop on a background task
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Idle sweeper is already running");
            return;
        }

        let sweeper = self.clone();
        tokio::spawn(async move {
            sweeper.run().await;
        });

        tracing::info!(
            sweep_interval_secs = self.sweep_interval.as_secs(),
            idle_timeout_secs = self.idle_timeout.as_secs(),
            "Idle sweeper started"
        );
    }

    /// Stop the sweep loop after the current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Idle sweeper stopped");
    }

    /// Check if the sweeper is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self) {
        let mut ticker = interval(self.sweep_interval);
        // The first tick fires immediately; skip it so a fresh start does
        // not sweep before anyone had a chance to heartbeat
        ticker.tick().await;

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;

            let evicted = self.coordinator.evict_idle(self.idle_timeout).await;
            if evicted > 0 {
                tracing::info!(evicted = evicted, "Sweep evicted idle members");
            } else {
                tracing::trace!("Sweep found no idle members");
            }
        }

        tracing::debug!("Idle sweeper loop ended");
    }
}

impl Drop for IdleSweeper {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
