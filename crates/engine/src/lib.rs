// In crates/engine/src/lib.rs

pub mod task;

use crate::task::MonitorTask;
use anyhow::Result;
use api_client::PriceFeed;
use app_config::Settings;
use core_types::{Symbol, TickSnapshot};
use signal_engine::SmaCrossover;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The orchestrator for the sampling pipeline.
///
/// Owns the feed and the configuration, and publishes a [`TickSnapshot`] after
/// every successful ingest on a watch channel handed out at construction time.
pub struct Engine {
    feed: Arc<dyn PriceFeed + Send + Sync>,
    settings: Settings,
    snapshot_tx: watch::Sender<Option<TickSnapshot>>,
}

impl Engine {
    /// Creates the engine and the receiver the display layer listens on.
    ///
    /// The channel starts at `None`; it flips to `Some` once the first sample
    /// has been ingested.
    pub fn new(
        feed: Arc<dyn PriceFeed + Send + Sync>,
        settings: Settings,
    ) -> (Self, watch::Receiver<Option<TickSnapshot>>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        (
            Self {
                feed,
                settings,
                snapshot_tx,
            },
            snapshot_rx,
        )
    }

    /// The main run method for the orchestrator.
    /// It validates the engine settings and spawns the monitor task for the
    /// configured symbol.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("Initializing signal monitor engine...");

        let crossover = SmaCrossover::new(self.settings.engine.clone())?;

        let task = MonitorTask::new(
            Symbol(self.settings.feed.symbol.clone()),
            Duration::from_millis(self.settings.feed.tick_interval_ms),
            self.feed.clone(),
            crossover,
            self.snapshot_tx.clone(),
        );

        // Spawn the task to run concurrently. In a healthy system it never
        // returns; if it does, surface that as the engine's own failure.
        let handle = tokio::spawn(task.run());
        let result = handle.await?;

        tracing::error!(?result, "Monitor task has terminated. Shutting down.");
        result
    }
}
