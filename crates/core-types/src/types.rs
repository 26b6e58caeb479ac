// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trading pair symbol, e.g. "BTCUSDT".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The direction of a logged trade occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// The directional indicator produced on each tick.
///
/// `Undetermined` covers both "not enough data yet" (either moving average is
/// still undefined) and an exact tie between the two averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Undetermined,
}

/// One logged occurrence of a Buy or Sell signal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: Side,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// The full display-facing state published after each successful ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSnapshot {
    pub symbol: Symbol,
    /// The price observed on this tick.
    pub price: Decimal,
    /// Short moving average, `None` until enough samples have accumulated.
    pub short_ma: Option<Decimal>,
    /// Long moving average, `None` until enough samples have accumulated.
    pub long_ma: Option<Decimal>,
    pub signal: Signal,
    /// Up to the configured number of most recent trades, most-recent-first.
    pub trades: Vec<TradeRecord>,
}
