// In crates/api-client/src/lib.rs

use app_config::types::FeedSettings;
use async_trait::async_trait;
use core_types::Symbol;
use rust_decimal::Decimal;
use serde_json::Value;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::{FeedClient, TickerPrice};

/// The seam between the engine and the outside world.
///
/// A `PriceFeed` either produces one current numeric price for a symbol or
/// fails; a failure costs the caller that tick and nothing else.
#[async_trait]
pub trait PriceFeed {
    /// Fetches the current price for `symbol`.
    async fn latest_price(&self, symbol: &Symbol) -> Result<Decimal>;
}

impl FeedClient {
    /// Constructs a new FeedClient from FeedSettings.
    pub fn new(settings: &FeedSettings) -> Result<Self> {
        let http_client = reqwest::Client::new();
        // The base_url is taken directly from the settings struct
        // that was populated from your .toml file.
        let base_url = settings.rest_base_url.clone();
        Ok(FeedClient {
            http_client,
            base_url,
        })
    }

    /// Fetches the current ticker price for a symbol.
    ///
    /// This corresponds to the `GET /api/v3/ticker/price` endpoint. The
    /// endpoint is public, so no request signing is involved.
    pub async fn get_ticker_price(&self, symbol: &Symbol) -> Result<Decimal> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url, symbol.0
        );

        let response_body = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let price = parse_ticker_response(&response_body)?;
        tracing::debug!(symbol = %symbol.0, %price, "Fetched ticker price.");
        Ok(price)
    }
}

#[async_trait]
impl PriceFeed for FeedClient {
    async fn latest_price(&self, symbol: &Symbol) -> Result<Decimal> {
        self.get_ticker_price(symbol).await
    }
}

/// Parses a ticker response body into a price.
///
/// The exchange returns an error object on failure, so we check for that
/// first. A syntactically valid but negative price is rejected: downstream
/// consumers assume samples are non-negative.
fn parse_ticker_response(body: &str) -> Result<Decimal> {
    let value: Value = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(Error::ApiError { code, msg });
    }

    let ticker: TickerPrice = serde_json::from_value(value).map_err(Error::DeserializationFailed)?;

    if ticker.price.is_sign_negative() {
        return Err(Error::InvalidPrice {
            price: ticker.price,
        });
    }

    Ok(ticker.price)
}

// Free function to allow api_client::new usage
pub fn new(settings: &FeedSettings) -> Result<FeedClient> {
    FeedClient::new(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_string_encoded_price() {
        let body = r#"{"symbol":"BTCUSDT","price":"64250.47000000"}"#;
        assert_eq!(parse_ticker_response(body).unwrap(), dec!(64250.47));
    }

    #[test]
    fn test_maps_exchange_error_object() {
        let body = r#"{"code":-1121,"msg":"Invalid symbol."}"#;
        match parse_ticker_response(body) {
            Err(Error::ApiError { code, msg }) => {
                assert_eq!(code, -1121);
                assert_eq!(msg, "Invalid symbol.");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_numeric_price() {
        let body = r#"{"symbol":"BTCUSDT","price":"not-a-number"}"#;
        assert!(matches!(
            parse_ticker_response(body),
            Err(Error::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_rejects_negative_price() {
        let body = r#"{"symbol":"BTCUSDT","price":"-1.00"}"#;
        assert!(matches!(
            parse_ticker_response(body),
            Err(Error::InvalidPrice { .. })
        ));
    }
}
