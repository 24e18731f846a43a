//! Service Kit - Agent Tools
//!
//! Research tools that implement `agent_core::Tool`. Upstream failures come
//! back as failed `ToolResult`s with a context prefix, never as `Err`.

mod defi;
mod market;
mod onchain;
mod technical;

pub use defi::{
    DefiGovernanceDataTool, DefiProtocolDataTool, DefiRiskDataTool, DefiTvlDataTool,
    DefiYieldDataTool,
};
pub use market::{CryptoMarketMetricsTool, CryptoPriceDataTool, CryptoVolumeAnalysisTool};
pub use onchain::{
    OnchainHolderDataTool, OnchainLiquidityDataTool, OnchainSupplyDataTool,
    OnchainTransactionDataTool,
};
pub use technical::CryptoTechnicalIndicatorsTool;

use agent_core::ParameterSchema;
use rust_decimal::Decimal;

fn token_symbol_param() -> ParameterSchema {
    ParameterSchema::string("token_symbol", "Token symbol (e.g., BTC, ETH, UNI)")
}

fn protocol_param() -> ParameterSchema {
    ParameterSchema::string(
        "protocol",
        "DeFi protocol name (e.g., uniswap, aave, compound)",
    )
}

/// Whole-dollar amount with thousands separators, e.g. `$1,234`
fn format_usd(value: Decimal) -> String {
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0");
        assert_eq!(format_usd(dec!(999)), "$999");
        assert_eq!(format_usd(dec!(1234)), "$1,234");
        assert_eq!(format_usd(dec!(25000000000)), "$25,000,000,000");
        assert_eq!(format_usd(dec!(1234567.6)), "$1,234,568");
        assert_eq!(format_usd(dec!(-4200.2)), "$-4,200");
    }
}
