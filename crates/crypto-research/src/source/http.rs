//! HTTP Oracle
//!
//! CoinGecko for prices and history, DefiLlama for protocol TVL.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{parse_market_chart, MarketDataSource};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::model::PriceSeries;
use crate::payload::error_marker;

/// Price oracle backed by the public CoinGecko and DefiLlama REST APIs
pub struct HttpOracle {
    client: Client,
    coingecko_url: String,
    defillama_url: String,
}

impl HttpOracle {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("crypto-research/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            coingecko_url: config.coingecko_url.clone(),
            defillama_url: config.defillama_url.clone(),
        })
    }

    /// GET a JSON document. Transport errors, non-2xx statuses and bad
    /// bodies all become `Fetch` errors prefixed with `context`.
    async fn get_json(&self, url: &str, query: &[(&str, String)], context: &str) -> Result<Value> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch_error(context, &e))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| fetch_error(context, &e))
    }
}

fn fetch_error(context: &str, err: &reqwest::Error) -> ResearchError {
    tracing::warn!(error = %err, "{context}");
    ResearchError::Fetch(format!("{context}: {err}"))
}

fn reject_error_marker(payload: Value, context: &str) -> Result<Value> {
    match error_marker(&payload) {
        Some(message) => Err(ResearchError::Fetch(format!("{context}: {message}"))),
        None => Ok(payload),
    }
}

#[async_trait]
impl MarketDataSource for HttpOracle {
    async fn get_price_history(
        &self,
        token_id: &str,
        days: u32,
        vs_currency: &str,
    ) -> Result<PriceSeries> {
        let url = format!("{}/coins/{token_id}/market_chart", self.coingecko_url);
        let query = [
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
            ("interval", "daily".to_string()),
        ];

        let payload = self.get_json(&url, &query, "CoinGecko history error").await?;
        parse_market_chart(&payload)
    }

    async fn get_simple_price(&self, token_id: &str, vs_currency: &str) -> Result<Value> {
        let url = format!("{}/simple/price", self.coingecko_url);
        let query = [
            ("ids", token_id.to_string()),
            ("vs_currencies", vs_currency.to_string()),
            ("include_24hr_change", "true".to_string()),
            ("include_market_cap", "true".to_string()),
            ("include_24hr_vol", "true".to_string()),
        ];

        let payload = self.get_json(&url, &query, "CoinGecko API error").await?;
        reject_error_marker(payload, "CoinGecko API error")
    }

    async fn get_market_data(&self, token_id: &str) -> Result<Value> {
        let url = format!("{}/coins/{token_id}", self.coingecko_url);
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("market_data", "true".to_string()),
            ("community_data", "true".to_string()),
            ("developer_data", "true".to_string()),
            ("sparkline", "false".to_string()),
        ];

        let payload = self.get_json(&url, &query, "CoinGecko market data error").await?;
        reject_error_marker(payload, "CoinGecko market data error")
    }

    async fn get_protocol_data(&self, protocol: &str) -> Result<Value> {
        let url = format!("{}/protocol/{protocol}", self.defillama_url);
        self.get_json(&url, &[], "DefiLlama API error").await
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/ping", self.coingecko_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "CoinGecko health check failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "CoinGecko+DefiLlama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let config = ResearchConfig {
            coingecko_url: "http://127.0.0.1:9".into(),
            request_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let oracle = HttpOracle::new(&config).unwrap();

        let err = oracle.get_price_history("bitcoin", 30, "usd").await.unwrap_err();
        assert!(matches!(err, ResearchError::Fetch(_)));
        assert!(err.to_string().starts_with("CoinGecko history error:"));
    }

    #[test]
    fn test_error_marker_rejected() {
        let err = reject_error_marker(serde_json::json!({"error": "invalid id"}), "CoinGecko API error")
            .unwrap_err();
        assert_eq!(err.to_string(), "CoinGecko API error: invalid id");
    }
}
