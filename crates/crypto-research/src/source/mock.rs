//! Mock Market Data
//!
//! For testing and demo purposes. Serves deterministic synthetic price
//! histories and fixed protocol payloads.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use super::MarketDataSource;
use crate::error::{ResearchError, Result};
use crate::model::PriceSeries;

/// Mock source with static base prices and a smooth synthetic history
pub struct MockMarketData {
    anchor: DateTime<Utc>,
    histories: HashMap<String, PriceSeries>,
    protocols: HashMap<String, Value>,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            anchor: Utc
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            histories: HashMap::new(),
            protocols: default_protocols(),
        }
    }

    /// Serve `series` for `token_id` regardless of the requested lookback
    pub fn with_history(mut self, token_id: impl Into<String>, series: PriceSeries) -> Self {
        self.histories.insert(token_id.into(), series);
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>, payload: Value) -> Self {
        self.protocols.insert(protocol.into(), payload);
        self
    }

    /// (price, 24h change %, market cap, 24h volume) in USD
    fn base_quote(token_id: &str) -> Option<(f64, f64, f64, f64)> {
        match token_id {
            "bitcoin" => Some((97_500.0, 2.5, 1.93e12, 25e9)),
            "ethereum" => Some((3_450.0, 1.8, 4.15e11, 15e9)),
            "uniswap" => Some((14.2, 2.2, 8.5e9, 3.1e8)),
            "chainlink" => Some((24.5, 3.1, 1.5e10, 6.2e8)),
            "aave" => Some((310.0, -1.4, 4.6e9, 4.4e8)),
            "maker" => Some((1_650.0, 0.6, 1.5e9, 9.0e7)),
            "usd-coin" => Some((1.0, 0.0, 4.4e10, 6.0e9)),
            "tether" => Some((1.0, 0.0, 1.38e11, 5.5e10)),
            _ => None,
        }
    }

    fn unknown(token_id: &str, context: &str) -> ResearchError {
        ResearchError::Fetch(format!("{context}: unknown token id '{token_id}'"))
    }

    fn synthetic_history(&self, base: f64, days: u32) -> PriceSeries {
        let prices: Vec<f64> = (0..days)
            .map(|day| {
                let x = f64::from(day);
                base * 0.02_f64.mul_add((x / 6.0).sin(), 0.001_f64.mul_add(x, 0.9))
            })
            .collect();
        let start = self.anchor - Duration::days(i64::from(days));
        PriceSeries::daily(start, &prices)
    }
}

fn default_protocols() -> HashMap<String, Value> {
    HashMap::from([
        (
            "aave".to_string(),
            json!({"name": "Aave", "category": "Lending", "tvl": 21_500_000_000_u64, "change_1d": 1.25, "change_7d": -2.4}),
        ),
        (
            "uniswap".to_string(),
            json!({"name": "Uniswap", "category": "Dexes", "tvl": 5_800_000_000_u64, "change_1d": -0.8, "change_7d": 3.6}),
        ),
        (
            "lido".to_string(),
            json!({"name": "Lido", "category": "Liquid Staking", "tvl": 33_000_000_000_u64, "change_1d": 0.3}),
        ),
    ])
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn get_price_history(
        &self,
        token_id: &str,
        days: u32,
        _vs_currency: &str,
    ) -> Result<PriceSeries> {
        if let Some(series) = self.histories.get(token_id) {
            return Ok(series.clone());
        }

        let (base, ..) = Self::base_quote(token_id)
            .ok_or_else(|| Self::unknown(token_id, "CoinGecko history error"))?;
        Ok(self.synthetic_history(base, days))
    }

    async fn get_simple_price(&self, token_id: &str, vs_currency: &str) -> Result<Value> {
        let (price, change, market_cap, volume) = Self::base_quote(token_id)
            .ok_or_else(|| Self::unknown(token_id, "CoinGecko API error"))?;

        Ok(json!({
            token_id: {
                vs_currency: price,
                format!("{vs_currency}_24h_change"): change,
                format!("{vs_currency}_market_cap"): market_cap,
                format!("{vs_currency}_24h_vol"): volume,
            }
        }))
    }

    async fn get_market_data(&self, token_id: &str) -> Result<Value> {
        let (price, change, market_cap, volume) = Self::base_quote(token_id)
            .ok_or_else(|| Self::unknown(token_id, "CoinGecko market data error"))?;

        Ok(json!({
            "id": token_id,
            "market_data": {
                "current_price": {"usd": price},
                "price_change_percentage_24h": change,
                "market_cap": {"usd": market_cap},
                "total_volume": {"usd": volume},
            }
        }))
    }

    async fn get_protocol_data(&self, protocol: &str) -> Result<Value> {
        Ok(self
            .protocols
            .get(&protocol.to_lowercase())
            .cloned()
            .unwrap_or_else(|| json!({"error": format!("Protocol '{protocol}' not found")})))
    }

    fn name(&self) -> &str {
        "MockMarketData"
    }
}
