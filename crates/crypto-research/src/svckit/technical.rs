//! Technical Indicators Tool
//!
//! SMA, EMA, RSI, Bollinger Bands and MACD over the configured lookback.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use super::token_symbol_param;
use crate::service::ResearchService;

const NAME: &str = "crypto_technical_indicators";

/// Tool for computing technical indicators on a token's price history
pub struct CryptoTechnicalIndicatorsTool {
    service: Arc<ResearchService>,
}

impl CryptoTechnicalIndicatorsTool {
    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CryptoTechnicalIndicatorsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Get technical indicators for a crypto token: SMA 20/50, EMA 12/26, RSI 14, Bollinger Bands and MACD, plus the last 30 days of indicator rows.".into(),
            parameters: vec![token_symbol_param()],
            category: Some("technical_analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbol = call.required_str("token_symbol")?;

        match self.service.compute_technical_snapshot(symbol).await {
            Ok(snapshot) => {
                let data = serde_json::to_value(&snapshot)?;
                let output = format!(
                    "Technical analysis for {symbol}: {}",
                    serde_json::to_string_pretty(&data)?
                );
                Ok(ToolResult::success(NAME, output).with_data(data))
            }
            Err(e) => Ok(ToolResult::failure(
                NAME,
                format!("Error getting technical data for {symbol}: {e}"),
            )),
        }
    }
}
