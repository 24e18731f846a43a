//! Market Data Tools
//!
//! Spot price, coin profile and 24h volume lookups.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use super::{format_usd, token_symbol_param};
use crate::service::ResearchService;

/// Tool for current price, 24h change and market cap
pub struct CryptoPriceDataTool {
    service: Arc<ResearchService>,
}

impl CryptoPriceDataTool {
    const NAME: &'static str = "crypto_price_data";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CryptoPriceDataTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get current crypto price data from CoinGecko. Returns price, 24h change, market cap and 24h volume.".into(),
            parameters: vec![
                token_symbol_param(),
                ParameterSchema::string("vs_currency", "Quote currency (e.g., usd, eur)")
                    .with_default(self.service.config().vs_currency.as_str()),
            ],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbol = call.required_str("token_symbol")?;
        let vs_currency = call.str_arg_or("vs_currency", &self.service.config().vs_currency);

        match self.service.price_data(symbol, vs_currency).await {
            Ok(data) => {
                let output = format!(
                    "Price data for {symbol}: {}",
                    serde_json::to_string_pretty(&data)?
                );
                Ok(ToolResult::success(Self::NAME, output).with_data(data))
            }
            Err(e) => Ok(ToolResult::failure(
                Self::NAME,
                format!("Error getting price data for {symbol}: {e}"),
            )),
        }
    }
}

/// Tool for the full coin profile (market, community and developer data)
pub struct CryptoMarketMetricsTool {
    service: Arc<ResearchService>,
}

impl CryptoMarketMetricsTool {
    const NAME: &'static str = "crypto_market_metrics";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CryptoMarketMetricsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get comprehensive market metrics for a crypto token".into(),
            parameters: vec![token_symbol_param()],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbol = call.required_str("token_symbol")?;

        match self.service.market_data(symbol).await {
            Ok(data) => {
                let output = format!(
                    "Market metrics for {symbol}: {}",
                    serde_json::to_string_pretty(&data)?
                );
                Ok(ToolResult::success(Self::NAME, output).with_data(data))
            }
            Err(e) => Ok(ToolResult::failure(
                Self::NAME,
                format!("Error getting market data for {symbol}: {e}"),
            )),
        }
    }
}

/// Tool summarizing 24h trading volume against market cap
pub struct CryptoVolumeAnalysisTool {
    service: Arc<ResearchService>,
}

impl CryptoVolumeAnalysisTool {
    const NAME: &'static str = "crypto_volume_analysis";

    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CryptoVolumeAnalysisTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get 24h trading volume and market cap for a crypto token".into(),
            parameters: vec![token_symbol_param()],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbol = call.required_str("token_symbol")?;

        match self.service.volume_summary(symbol).await {
            Ok(summary) => {
                let output = format!(
                    "Volume analysis for {symbol}: 24h Volume: {}, Market Cap: {}",
                    format_usd(summary.volume_24h),
                    format_usd(summary.market_cap)
                );
                Ok(ToolResult::success(Self::NAME, output).with_data(serde_json::to_value(&summary)?))
            }
            Err(e) => Ok(ToolResult::failure(
                Self::NAME,
                format!("Error getting volume data for {symbol}: {e}"),
            )),
        }
    }
}
