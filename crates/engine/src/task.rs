// In crates/engine/src/task.rs

use api_client::PriceFeed;
use chrono::{DateTime, Utc};
use core_types::{Signal, Symbol, TickSnapshot};
use rust_decimal::Decimal;
use signal_engine::{EngineState, SmaCrossover};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

/// One price observation, stamped when the fetch landed.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub price: Decimal,
    pub observed_at: DateTime<Utc>,
}

/// A self-contained task that manages the whole sampling pipeline for a
/// single symbol: the fixed-cadence ticker, the per-tick fetches, and the
/// serialized state updates.
pub struct MonitorTask {
    symbol: Symbol,
    tick_interval: Duration,
    feed: Arc<dyn PriceFeed + Send + Sync>,
    crossover: SmaCrossover,
    snapshot_tx: watch::Sender<Option<TickSnapshot>>,
    // The single owner of the evolving history and trade log.
    state: EngineState,
}

impl MonitorTask {
    pub fn new(
        symbol: Symbol,
        tick_interval: Duration,
        feed: Arc<dyn PriceFeed + Send + Sync>,
        crossover: SmaCrossover,
        snapshot_tx: watch::Sender<Option<TickSnapshot>>,
    ) -> Self {
        Self {
            symbol,
            tick_interval,
            feed,
            crossover,
            snapshot_tx,
            state: EngineState::new(),
        }
    }

    /// The main, long-running loop for this monitor task.
    pub async fn run(mut self) -> anyhow::Result<()> {
        tracing::info!(
            symbol = %self.symbol.0,
            interval_ms = self.tick_interval.as_millis() as u64,
            "Starting monitor task."
        );

        let (sample_tx, mut sample_rx) = mpsc::channel::<Sample>(64);

        // --- 1. The Ticker ---
        // Fires on a fixed cadence and spawns one independent fetch per tick.
        // A slow fetch only delays its own sample; it never blocks later
        // ticks from being scheduled. Results land on the sample channel in
        // whatever order they arrive.
        let ticker = {
            let feed = self.feed.clone();
            let symbol = self.symbol.clone();
            let tick_interval = self.tick_interval;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick_interval);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    let feed = feed.clone();
                    let symbol = symbol.clone();
                    let sample_tx = sample_tx.clone();
                    tokio::spawn(async move {
                        match feed.latest_price(&symbol).await {
                            Ok(price) => {
                                let sample = Sample {
                                    price,
                                    observed_at: Utc::now(),
                                };
                                // The receiver outlives the ticker; if it is
                                // gone anyway, the sample is simply dropped.
                                let _ = sample_tx.send(sample).await;
                            }
                            Err(error) => {
                                tracing::warn!(
                                    symbol = %symbol.0,
                                    %error,
                                    "Price fetch failed. Skipping this tick."
                                );
                            }
                        }
                    });
                }
            })
        };

        // --- 2. The State Loop ---
        // The only place the engine state is touched. Samples are ingested
        // strictly in arrival order, so overlapping in-flight fetches can
        // never corrupt the history or the trade log.
        while let Some(sample) = sample_rx.recv().await {
            let state = std::mem::take(&mut self.state);
            let (next, report) = self
                .crossover
                .ingest(state, sample.price, sample.observed_at);
            self.state = next;

            if !matches!(report.signal, Signal::Undetermined) {
                tracing::info!(
                    symbol = %self.symbol.0,
                    signal = ?report.signal,
                    price = %report.price,
                    "Tick produced a directional signal."
                );
            }

            let snapshot = TickSnapshot {
                symbol: self.symbol.clone(),
                price: report.price,
                short_ma: report.short_ma,
                long_ma: report.long_ma,
                signal: report.signal,
                trades: self.state.trades().iter().cloned().collect(),
            };
            // Publishing with no listeners attached is not an error.
            let _ = self.snapshot_tx.send(Some(snapshot));
        }

        ticker.abort();
        anyhow::bail!("Sample channel for {} closed unexpectedly.", self.symbol.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::Side;
    use rust_decimal_macros::dec;
    use signal_engine::SmaCrossoverSettings;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A feed that replays a script of responses, then fails forever.
    struct ScriptedFeed {
        responses: Mutex<VecDeque<api_client::Result<Decimal>>>,
    }

    impl ScriptedFeed {
        fn new(responses: Vec<api_client::Result<Decimal>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl PriceFeed for ScriptedFeed {
        async fn latest_price(&self, _symbol: &Symbol) -> api_client::Result<Decimal> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(api_client::Error::ApiError {
                    code: -1,
                    msg: "script exhausted".to_string(),
                }))
        }
    }

    fn small_settings() -> SmaCrossoverSettings {
        SmaCrossoverSettings {
            short_period: 2,
            long_period: 3,
            history_size: 3,
            trade_log_size: 5,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_ticks_skip_and_samples_apply_in_arrival_order() {
        let feed = Arc::new(ScriptedFeed::new(vec![
            Err(api_client::Error::ApiError {
                code: -1003,
                msg: "rate limited".to_string(),
            }),
            Ok(dec!(1)),
            Ok(dec!(2)),
            Ok(dec!(3)),
            Ok(dec!(4)),
        ]));
        let crossover = SmaCrossover::new(small_settings()).unwrap();
        let (snapshot_tx, mut snapshot_rx) = watch::channel(None);
        let task = MonitorTask::new(
            Symbol("TESTUSDT".to_string()),
            Duration::from_millis(10),
            feed,
            crossover,
            snapshot_tx,
        );
        tokio::spawn(task.run());

        // Collect published snapshots until the last scripted sample lands.
        let mut seen_prices = Vec::new();
        let final_snapshot = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                snapshot_rx.changed().await.unwrap();
                let snapshot = snapshot_rx.borrow_and_update().clone().unwrap();
                seen_prices.push(snapshot.price);
                if snapshot.price == dec!(4) {
                    break snapshot;
                }
            }
        })
        .await
        .expect("pipeline never reached the final sample");

        // The failed first tick contributed nothing; every observed snapshot
        // carries a later sample than the one before it.
        assert!(seen_prices.windows(2).all(|w| w[0] < w[1]));

        // With windows of 2/3, the fourth sample is the first tick whose
        // pre-append history fills the long window: short MA 2.5 > long MA 2.
        assert_eq!(final_snapshot.short_ma, Some(dec!(2.5)));
        assert_eq!(final_snapshot.long_ma, Some(dec!(2)));
        assert_eq!(final_snapshot.signal, Signal::Buy);
        assert_eq!(final_snapshot.trades.len(), 1);
        assert_eq!(final_snapshot.trades[0].side, Side::Buy);
        assert_eq!(final_snapshot.trades[0].price, dec!(4));
    }
}
