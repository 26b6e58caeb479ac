// In crates/signal-engine/src/lib.rs

//! The core signal computation for the monitor.
//!
//! Everything in this crate is pure: the engine takes the current state and one
//! new price sample, and returns the next state plus a report of what that tick
//! produced. All I/O (polling the feed, rendering) lives in other crates.

pub mod error;
pub mod sma_crossover;
pub mod state;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use sma_crossover::{SmaCrossover, derive_signal, moving_average};
pub use state::EngineState;
pub use types::{SmaCrossoverSettings, TickReport};
