// In crates/signal-engine/src/sma_crossover.rs

use crate::error::{Error, Result};
use crate::state::EngineState;
use crate::types::{SmaCrossoverSettings, TickReport};
use chrono::{DateTime, Utc};
use core_types::{Side, Signal, TradeRecord};
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// The SMA crossover engine.
///
/// Holds only its settings; all evolving state is passed in and returned by
/// [`SmaCrossover::ingest`], so the owner (one controller loop) threads it
/// between ticks explicitly.
#[derive(Debug, Clone)]
pub struct SmaCrossover {
    settings: SmaCrossoverSettings,
}

impl SmaCrossover {
    /// Creates a new `SmaCrossover` engine from its settings.
    ///
    /// Fails if the windows are degenerate: zero anywhere, a short window that
    /// is not shorter than the long one, or a history too small to ever fill
    /// the long window.
    pub fn new(settings: SmaCrossoverSettings) -> Result<Self> {
        if settings.short_period == 0
            || settings.long_period == 0
            || settings.history_size == 0
            || settings.trade_log_size == 0
        {
            return Err(Error::ZeroParameter);
        }
        if settings.short_period >= settings.long_period {
            return Err(Error::PeriodOrder {
                short: settings.short_period,
                long: settings.long_period,
            });
        }
        if settings.history_size < settings.long_period {
            return Err(Error::HistoryTooSmall {
                capacity: settings.history_size,
                period: settings.long_period,
            });
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SmaCrossoverSettings {
        &self.settings
    }

    /// Applies one tick: consumes the current state and a new price sample,
    /// returns the next state and a report of what this tick produced.
    ///
    /// Both averages are computed over the history as it stood *before* the
    /// new sample is appended, so the signal at tick `t` reflects samples up
    /// to `t-1`. A Buy or Sell signal also prepends a trade record at the
    /// sampled price; an `Undetermined` tick leaves the log alone.
    pub fn ingest(
        &self,
        state: EngineState,
        sample: Decimal,
        observed_at: DateTime<Utc>,
    ) -> (EngineState, TickReport) {
        let short_ma = moving_average(state.history(), self.settings.short_period);
        let long_ma = moving_average(state.history(), self.settings.long_period);
        let signal = derive_signal(short_ma, long_ma);

        let mut next = state;
        next.push_price(sample, self.settings.history_size);

        if let Signal::Buy | Signal::Sell = signal {
            let side = match signal {
                Signal::Buy => Side::Buy,
                _ => Side::Sell,
            };
            next.push_trade(
                TradeRecord {
                    side,
                    price: sample,
                    recorded_at: observed_at,
                },
                self.settings.trade_log_size,
            );
        }

        let report = TickReport {
            price: sample,
            short_ma,
            long_ma,
            signal,
        };
        (next, report)
    }
}

/// The plain arithmetic mean of the last `period` samples.
///
/// Returns `None` while the history holds fewer than `period` samples. No
/// smoothing or weighting; callers round for display, never here.
pub fn moving_average(history: &VecDeque<Decimal>, period: usize) -> Option<Decimal> {
    if period == 0 || history.len() < period {
        return None;
    }
    let sum: Decimal = history.iter().rev().take(period).copied().sum();
    Some(sum / Decimal::from(period as u64))
}

/// Derives the directional signal from the two averages.
///
/// A pure function of its inputs: strictly greater means Buy, strictly smaller
/// means Sell, and a tie or a missing average means Undetermined.
pub fn derive_signal(short_ma: Option<Decimal>, long_ma: Option<Decimal>) -> Signal {
    match (short_ma, long_ma) {
        (Some(short), Some(long)) if short > long => Signal::Buy,
        (Some(short), Some(long)) if short < long => Signal::Sell,
        _ => Signal::Undetermined,
    }
}
