//! DeFi Protocol Metrics
//!
//! Normalizes a raw DefiLlama-style protocol payload into [`ProtocolMetrics`].
//! An upstream error marker is passed through untouched; otherwise missing
//! fields default to zero.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{ResearchError, Result};
use crate::model::ProtocolMetrics;
use crate::payload::{decimal, decimal_field, error_marker};

#[derive(Clone, Copy, Debug, Default)]
pub struct ProtocolMetricsExtractor;

impl ProtocolMetricsExtractor {
    pub fn extract(&self, protocol: &str, payload: &Value) -> Result<ProtocolMetrics> {
        if let Some(message) = error_marker(payload) {
            return Err(ResearchError::Upstream(message));
        }

        Ok(ProtocolMetrics {
            protocol: protocol.to_string(),
            tvl: current_tvl(payload),
            tvl_change_1d: decimal_field(payload, "change_1d"),
            tvl_change_7d: decimal_field(payload, "change_7d"),
            protocol_data: payload.clone(),
        })
    }
}

/// `tvl` is a plain number in protocol listings but a history of
/// `{date, totalLiquidityUSD}` points on the per-protocol endpoint.
fn current_tvl(payload: &Value) -> Decimal {
    match payload.get("tvl") {
        Some(Value::Array(points)) => points
            .last()
            .map_or(Decimal::ZERO, |p| decimal_field(p, "totalLiquidityUSD")),
        Some(value) => decimal(value),
        None => Decimal::ZERO,
    }
}
