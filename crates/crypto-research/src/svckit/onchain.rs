//! On-chain Analytics Tools
//!
//! All four take a token contract address and an optional network that
//! falls back to the configured default chain.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::error::Result;
use crate::onchain::OnchainAnalytics;

fn onchain_schema(name: &str, description: &str, default_network: &str) -> ToolSchema {
    ToolSchema {
        name: name.into(),
        description: description.into(),
        parameters: vec![
            ParameterSchema::string("token_address", "Token contract address"),
            ParameterSchema::string("network", "Blockchain network (e.g., ethereum, polygon)")
                .with_default(default_network),
        ],
        category: Some("onchain".into()),
        has_side_effects: false,
    }
}

/// Shared result formatting: `"<label> analysis: {json}"` or
/// `"Error getting <topic> data: <error>"`
fn render<T: Serialize>(
    name: &str,
    label: &str,
    topic: &str,
    outcome: Result<T>,
) -> CoreResult<ToolResult> {
    match outcome {
        Ok(metrics) => {
            let data = serde_json::to_value(&metrics)?;
            let output = format!(
                "{label} analysis: {}",
                serde_json::to_string_pretty(&data)?
            );
            Ok(ToolResult::success(name, output).with_data(data))
        }
        Err(e) => Ok(ToolResult::failure(
            name,
            format!("Error getting {topic} data: {e}"),
        )),
    }
}

/// DEX liquidity pools for a token
pub struct OnchainLiquidityDataTool {
    analytics: Arc<OnchainAnalytics>,
    network: String,
}

impl OnchainLiquidityDataTool {
    const NAME: &'static str = "onchain_liquidity_data";

    pub fn new(analytics: Arc<OnchainAnalytics>, network: impl Into<String>) -> Self {
        Self {
            analytics,
            network: network.into(),
        }
    }
}

#[async_trait]
impl Tool for OnchainLiquidityDataTool {
    fn schema(&self) -> ToolSchema {
        onchain_schema(
            Self::NAME,
            "Get on-chain liquidity data for a token: total pool TVL and its distribution across DEXes",
            &self.network,
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let address = call.required_str("token_address")?;
        let network = call.str_arg_or("network", &self.network);
        let outcome = self.analytics.liquidity(address, network).await;
        render(Self::NAME, "Liquidity", "liquidity", outcome)
    }
}

/// Holder concentration for a token
pub struct OnchainHolderDataTool {
    analytics: Arc<OnchainAnalytics>,
    network: String,
}

impl OnchainHolderDataTool {
    const NAME: &'static str = "onchain_holder_data";

    pub fn new(analytics: Arc<OnchainAnalytics>, network: impl Into<String>) -> Self {
        Self {
            analytics,
            network: network.into(),
        }
    }
}

#[async_trait]
impl Tool for OnchainHolderDataTool {
    fn schema(&self) -> ToolSchema {
        onchain_schema(
            Self::NAME,
            "Get on-chain holder data for a token: holder count, top-10 share and whale count",
            &self.network,
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let address = call.required_str("token_address")?;
        let network = call.str_arg_or("network", &self.network);
        let outcome = self.analytics.holders(address, network).await;
        render(Self::NAME, "Holder", "holder", outcome)
    }
}

/// Transfer and DEX trade activity for a token
pub struct OnchainTransactionDataTool {
    analytics: Arc<OnchainAnalytics>,
    network: String,
}

impl OnchainTransactionDataTool {
    const NAME: &'static str = "onchain_transaction_data";

    pub fn new(analytics: Arc<OnchainAnalytics>, network: impl Into<String>) -> Self {
        Self {
            analytics,
            network: network.into(),
        }
    }
}

#[async_trait]
impl Tool for OnchainTransactionDataTool {
    fn schema(&self) -> ToolSchema {
        onchain_schema(
            Self::NAME,
            "Get on-chain transaction data for a token: transfer and DEX trade volumes and averages",
            &self.network,
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let address = call.required_str("token_address")?;
        let network = call.str_arg_or("network", &self.network);
        let outcome = self.analytics.transactions(address, network).await;
        render(Self::NAME, "Transaction", "transaction", outcome)
    }
}

/// Circulating and total supply for a token
pub struct OnchainSupplyDataTool {
    analytics: Arc<OnchainAnalytics>,
    network: String,
}

impl OnchainSupplyDataTool {
    const NAME: &'static str = "onchain_supply_data";

    pub fn new(analytics: Arc<OnchainAnalytics>, network: impl Into<String>) -> Self {
        Self {
            analytics,
            network: network.into(),
        }
    }
}

#[async_trait]
impl Tool for OnchainSupplyDataTool {
    fn schema(&self) -> ToolSchema {
        onchain_schema(
            Self::NAME,
            "Get on-chain supply data for a token",
            &self.network,
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let address = call.required_str("token_address")?;
        let network = call.str_arg_or("network", &self.network);
        let outcome = self.analytics.supply(address, network).await;
        render(Self::NAME, "Supply", "supply", outcome)
    }
}
