// In crates/app-config/src/types.rs

use serde::Deserialize;

use signal_engine::types::SmaCrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the price feed.
    pub feed: FeedSettings,
    /// Signal engine windows and capacities. Every field has a default, so the
    /// whole section may be omitted from the config files.
    #[serde(default)]
    pub engine: SmaCrossoverSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeedSettings {
    /// The REST API base URL for the exchange, e.g. "https://api.binance.com".
    pub rest_base_url: String,
    /// The symbol to track, e.g. "BTCUSDT".
    pub symbol: String,
    /// How often to poll the feed, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

// Helper function for serde defaults.
fn default_tick_interval_ms() -> u64 {
    1_000
}
