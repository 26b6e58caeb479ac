// In crates/api-client/src/types.rs

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The client for the exchange's public REST API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    pub(crate) http_client: Client,
    pub(crate) base_url: String,
}

/// The raw `GET /api/v3/ticker/price` payload.
///
/// The exchange encodes the price as a string; the `serde-str` feature on
/// `rust_decimal` parses it losslessly into a `Decimal`.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Decimal,
}
