//! # crypto-research
//!
//! Market research toolkit for crypto assets: technical indicators over
//! daily price history, DeFi protocol TVL metrics and on-chain summaries,
//! all exposed as `agent_core` tools.
//!
//! ## Data flow
//!
//! ```text
//! ┌──────────────┐   PriceSeries   ┌───────────────────────────┐
//! │ MarketData   │────────────────▶│ TechnicalIndicatorEngine  │──▶ IndicatorSnapshot
//! │ Source       │                 └───────────────────────────┘
//! │ (HTTP/mock,  │   JSON payload  ┌───────────────────────────┐
//! │  TTL cache)  │────────────────▶│ ProtocolMetricsExtractor  │──▶ ProtocolMetrics
//! └──────────────┘                 └───────────────────────────┘
//! ```
//!
//! Indicator values that cannot be computed yet (window still filling,
//! zero RSI denominator) are `None`, never errors. Upstream failures are
//! propagated with their context and never retried.

pub mod config;
pub mod error;
pub mod indicators;
pub mod model;
pub mod onchain;
pub mod payload;
pub mod protocol;
pub mod service;
pub mod source;
pub mod svckit;
pub mod symbols;

#[cfg(test)]
mod test_util;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use indicators::TechnicalIndicatorEngine;
pub use model::{
    IndicatorRow, IndicatorSnapshot, PriceSample, PriceSeries, ProtocolMetrics, VolumeSummary,
};
pub use onchain::{OnchainAnalytics, OnchainSource, UnavailableOnchain};
pub use protocol::ProtocolMetricsExtractor;
pub use service::ResearchService;
pub use source::MarketDataSource;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        CryptoMarketMetricsTool, CryptoPriceDataTool, CryptoTechnicalIndicatorsTool,
        CryptoVolumeAnalysisTool, DefiGovernanceDataTool, DefiProtocolDataTool, DefiRiskDataTool,
        DefiTvlDataTool, DefiYieldDataTool, OnchainHolderDataTool, OnchainLiquidityDataTool,
        OnchainSupplyDataTool, OnchainTransactionDataTool,
    };
}

/// Register every research tool. On-chain tools default to the service's
/// configured network.
pub fn register_tools(
    registry: &mut ToolRegistry,
    service: &Arc<ResearchService>,
    onchain: &Arc<OnchainAnalytics>,
) {
    use tools::{
        CryptoMarketMetricsTool, CryptoPriceDataTool, CryptoTechnicalIndicatorsTool,
        CryptoVolumeAnalysisTool, DefiGovernanceDataTool, DefiProtocolDataTool, DefiRiskDataTool,
        DefiTvlDataTool, DefiYieldDataTool, OnchainHolderDataTool, OnchainLiquidityDataTool,
        OnchainSupplyDataTool, OnchainTransactionDataTool,
    };

    let network = service.config().network.clone();

    registry.register(CryptoPriceDataTool::new(service.clone()));
    registry.register(CryptoTechnicalIndicatorsTool::new(service.clone()));
    registry.register(CryptoMarketMetricsTool::new(service.clone()));
    registry.register(CryptoVolumeAnalysisTool::new(service.clone()));
    registry.register(DefiProtocolDataTool::new(service.clone()));
    registry.register(DefiTvlDataTool::new(service.clone()));
    registry.register(DefiYieldDataTool::new(service.clone()));
    registry.register(DefiGovernanceDataTool::new(service.clone()));
    registry.register(DefiRiskDataTool::new(service.clone()));
    registry.register(OnchainLiquidityDataTool::new(onchain.clone(), network.as_str()));
    registry.register(OnchainHolderDataTool::new(onchain.clone(), network.as_str()));
    registry.register(OnchainTransactionDataTool::new(onchain.clone(), network.as_str()));
    registry.register(OnchainSupplyDataTool::new(onchain.clone(), network));
}

/// System prompt for a research agent driving these tools
pub const CRYPTO_RESEARCH_PROMPT: &str = r"You are a crypto market research analyst. Ground every claim in tool output.

## Workflow

1. Use `crypto_price_data` and `crypto_market_metrics` for the current market picture
2. Use `crypto_technical_indicators` for trend and momentum (SMA, EMA, RSI, Bollinger Bands, MACD)
3. Use `crypto_volume_analysis` to judge liquidity and participation
4. For DeFi tokens, use `defi_protocol_data` and `defi_tvl_data` for TVL and its trend, then `defi_yield_data`, `defi_governance_data` and `defi_risk_data` for the protocol profile behind it
5. When a contract address is known, use the `onchain_*` tools for liquidity, holder concentration, activity and supply

## Reading Indicators

- RSI above 70 is overbought, below 30 oversold
- Price outside the Bollinger Bands signals a stretched move
- MACD crossing its signal line marks a momentum shift
- A null indicator means there was not enough history to compute it; say so instead of guessing

Report tool errors plainly. Never invent numbers.";
