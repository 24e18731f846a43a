//! Market Data Sources
//!
//! Abstractions and implementations for price oracles and DeFi data feeds.

mod cache;
mod http;
mod mock;

pub use cache::CachedMarketData;
pub use http::HttpOracle;
pub use mock::MockMarketData;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ResearchError, Result};
use crate::model::{PriceSample, PriceSeries};
use crate::payload::error_marker;

/// Market data provider (Strategy pattern)
///
/// Implement this for each upstream: CoinGecko/DefiLlama over HTTP, fixtures, etc.
/// Failures come back as [`ResearchError::Fetch`] with a context prefix;
/// nothing here retries.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily price history for a CoinGecko token id
    async fn get_price_history(
        &self,
        token_id: &str,
        days: u32,
        vs_currency: &str,
    ) -> Result<PriceSeries>;

    /// Spot price with 24h change, market cap and 24h volume:
    /// `{"<id>": {"usd": .., "usd_24h_change": .., "usd_market_cap": .., "usd_24h_vol": ..}}`
    async fn get_simple_price(&self, token_id: &str, vs_currency: &str) -> Result<Value>;

    /// Full coin profile including `market_data`
    async fn get_market_data(&self, token_id: &str) -> Result<Value>;

    /// Raw protocol payload. May carry an `"error"` key, which callers
    /// must check before reading metrics.
    async fn get_protocol_data(&self, protocol: &str) -> Result<Value>;

    /// Check if the source is reachable
    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

/// Convert a CoinGecko `market_chart` payload (`{"prices": [[ms, price], ...]}`)
/// into a series. Null prices become NaN; entries without a usable
/// timestamp are skipped.
pub fn parse_market_chart(payload: &Value) -> Result<PriceSeries> {
    if let Some(message) = error_marker(payload) {
        return Err(ResearchError::Fetch(format!("CoinGecko history error: {message}")));
    }

    let Some(points) = payload.get("prices").and_then(Value::as_array) else {
        return Ok(PriceSeries::default());
    };

    let samples = points
        .iter()
        .filter_map(|point| {
            let millis = point.get(0).and_then(timestamp_millis)?;
            let price = point.get(1).and_then(Value::as_f64).unwrap_or(f64::NAN);
            let sample = PriceSample::from_millis(millis, price);
            if sample.is_none() {
                tracing::debug!(millis, "Skipping price point with invalid timestamp");
            }
            sample
        })
        .collect();

    Ok(samples)
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_market_chart() {
        let payload = json!({
            "prices": [
                [1_704_067_200_000_i64, 42_000.5],
                [1_704_153_600_000.0, null],
                ["bad", 1.0]
            ],
            "total_volumes": []
        });

        let series = parse_market_chart(&payload).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.samples()[0].price, 42_000.5);
        assert!(series.samples()[1].price.is_nan());
    }

    #[test]
    fn test_market_chart_error_marker() {
        let err = parse_market_chart(&json!({"error": "coin not found"})).unwrap_err();
        assert!(matches!(err, ResearchError::Fetch(_)));
        assert_eq!(err.to_string(), "CoinGecko history error: coin not found");
    }

    #[test]
    fn test_missing_prices_is_empty() {
        assert!(parse_market_chart(&json!({})).unwrap().is_empty());
    }
}
