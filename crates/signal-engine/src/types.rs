// In crates/signal-engine/src/types.rs

use core_types::Signal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the SMA crossover engine.
///
/// Every field carries a default matching the stock setup (5/20 windows, a
/// 20-sample history and a 5-entry trade log), so a config file only needs to
/// name the fields it wants to change.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SmaCrossoverSettings {
    /// Window length of the short (fast) moving average.
    #[serde(default = "default_short_period")]
    pub short_period: usize,
    /// Window length of the long (slow) moving average.
    #[serde(default = "default_long_period")]
    pub long_period: usize,
    /// How many price samples the rolling history retains.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// How many trade records the log retains.
    #[serde(default = "default_trade_log_size")]
    pub trade_log_size: usize,
}

impl Default for SmaCrossoverSettings {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
            history_size: default_history_size(),
            trade_log_size: default_trade_log_size(),
        }
    }
}

// Helper functions for serde defaults.
fn default_short_period() -> usize {
    5
}
fn default_long_period() -> usize {
    20
}
fn default_history_size() -> usize {
    20
}
fn default_trade_log_size() -> usize {
    5
}

/// What a single tick produced, alongside the updated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// The price sample ingested on this tick.
    pub price: Decimal,
    /// Short moving average, `None` while there is insufficient history.
    pub short_ma: Option<Decimal>,
    /// Long moving average, `None` while there is insufficient history.
    pub long_ma: Option<Decimal>,
    pub signal: Signal,
}
