// In crates/signal-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Short period ({short}) must be smaller than the long period ({long})")]
    PeriodOrder { short: usize, long: usize },

    #[error("History capacity ({capacity}) cannot hold a full long window ({period})")]
    HistoryTooSmall { capacity: usize, period: usize },

    #[error("Periods and capacities must be non-zero")]
    ZeroParameter,
}

pub type Result<T> = std::result::Result<T, Error>;
