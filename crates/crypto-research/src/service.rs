//! Research Service
//!
//! Orchestrates fetch → compute for the agent tools. Upstream failures are
//! propagated unchanged; the only core-raised failure is an empty history.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ResearchConfig;
use crate::error::Result;
use crate::indicators::TechnicalIndicatorEngine;
use crate::model::{IndicatorSnapshot, ProtocolMetrics, VolumeSummary};
use crate::payload::decimal_field;
use crate::protocol::ProtocolMetricsExtractor;
use crate::source::{CachedMarketData, HttpOracle, MarketDataSource, MockMarketData};
use crate::symbols::resolve_token_id;

pub struct ResearchService {
    source: Arc<dyn MarketDataSource>,
    engine: TechnicalIndicatorEngine,
    extractor: ProtocolMetricsExtractor,
    config: ResearchConfig,
}

impl ResearchService {
    pub fn new(source: Arc<dyn MarketDataSource>, config: ResearchConfig) -> Self {
        Self {
            source,
            engine: TechnicalIndicatorEngine::new(),
            extractor: ProtocolMetricsExtractor,
            config,
        }
    }

    /// Cached HTTP oracle, or the mock source when `use_mock` is set
    pub fn from_config(config: ResearchConfig) -> Result<Self> {
        config.validate()?;

        let source: Arc<dyn MarketDataSource> = if config.use_mock {
            Arc::new(CachedMarketData::new(MockMarketData::new(), config.cache_ttl))
        } else {
            Arc::new(CachedMarketData::new(HttpOracle::new(&config)?, config.cache_ttl))
        };

        Ok(Self::new(source, config))
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn MarketDataSource> {
        &self.source
    }

    /// Fetch the configured lookback for `symbol` and run the indicator engine
    #[tracing::instrument(skip(self))]
    pub async fn compute_technical_snapshot(&self, symbol: &str) -> Result<IndicatorSnapshot> {
        let token_id = resolve_token_id(symbol);
        let series = self
            .source
            .get_price_history(&token_id, self.config.history_days, &self.config.vs_currency)
            .await
            .inspect_err(|e| tracing::warn!(%token_id, error = %e, "Price history fetch failed"))?;

        tracing::debug!(%token_id, samples = series.len(), "Fetched price history");
        self.engine.compute(&series)
    }

    #[tracing::instrument(skip(self))]
    pub async fn compute_protocol_metrics(&self, protocol: &str) -> Result<ProtocolMetrics> {
        let payload = self
            .source
            .get_protocol_data(protocol)
            .await
            .inspect_err(|e| tracing::warn!(protocol, error = %e, "Protocol fetch failed"))?;

        self.extractor.extract(protocol, &payload)
    }

    #[tracing::instrument(skip(self))]
    pub async fn price_data(&self, symbol: &str, vs_currency: &str) -> Result<Value> {
        let token_id = resolve_token_id(symbol);
        self.source
            .get_simple_price(&token_id, &vs_currency.to_lowercase())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn market_data(&self, symbol: &str) -> Result<Value> {
        let token_id = resolve_token_id(symbol);
        self.source.get_market_data(&token_id).await
    }

    /// 24h volume and market cap in the configured quote currency; zero when absent
    #[tracing::instrument(skip(self))]
    pub async fn volume_summary(&self, symbol: &str) -> Result<VolumeSummary> {
        let token_id = resolve_token_id(symbol);
        let vs = &self.config.vs_currency;
        let payload = self.source.get_simple_price(&token_id, vs).await?;
        let quote = payload.get(&token_id).unwrap_or(&Value::Null);

        Ok(VolumeSummary {
            volume_24h: decimal_field(quote, &format!("{vs}_24h_vol")),
            market_cap: decimal_field(quote, &format!("{vs}_market_cap")),
        })
    }
}
