// In crates/signal-engine/src/state.rs

use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// The evolving state threaded between ticks.
///
/// The price history is most-recent-last and the trade log is most-recent-first;
/// both are bounded, and both are only ever mutated through the append-and-trim
/// operations below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    history: VecDeque<Decimal>,
    trades: VecDeque<TradeRecord>,
}

impl EngineState {
    /// Creates an empty state. Both sequences start empty at process start.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rolling price history, oldest-first / most-recent-last.
    pub fn history(&self) -> &VecDeque<Decimal> {
        &self.history
    }

    /// The trade log, most-recent-first.
    pub fn trades(&self) -> &VecDeque<TradeRecord> {
        &self.trades
    }

    /// Appends a sample at the tail and drops the oldest entries until the
    /// history fits within `capacity`.
    pub(crate) fn push_price(&mut self, price: Decimal, capacity: usize) {
        self.history.push_back(price);
        while self.history.len() > capacity {
            self.history.pop_front();
        }
    }

    /// Prepends a record and truncates the tail to `capacity` entries.
    pub(crate) fn push_trade(&mut self, record: TradeRecord, capacity: usize) {
        self.trades.push_front(record);
        self.trades.truncate(capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn test_history_is_bounded_and_ordered() {
        let mut state = EngineState::new();
        for i in 1..=25u32 {
            state.push_price(Decimal::from(i), 20);
        }

        assert_eq!(state.history().len(), 20);
        // Oldest five samples were dropped; the tail is the latest sample.
        assert_eq!(state.history().front(), Some(&dec!(6)));
        assert_eq!(state.history().back(), Some(&dec!(25)));
    }

    #[test]
    fn test_trade_log_is_bounded_most_recent_first() {
        let mut state = EngineState::new();
        for i in 1..=8u32 {
            let record = TradeRecord {
                side: Side::Buy,
                price: Decimal::from(i),
                recorded_at: Utc::now(),
            };
            state.push_trade(record, 5);
        }

        assert_eq!(state.trades().len(), 5);
        let prices: Vec<Decimal> = state.trades().iter().map(|t| t.price).collect();
        assert_eq!(
            prices,
            vec![dec!(8), dec!(7), dec!(6), dec!(5), dec!(4)]
        );
    }
}
