//! On-chain Analytics
//!
//! Liquidity, holder and transaction summaries built from an
//! [`OnchainSource`]. The source is optional infrastructure: without a
//! provider configured, [`UnavailableOnchain`] answers every request with a
//! fetch error that the tools surface verbatim.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::error::{ResearchError, Result};
use crate::model::{HolderMetrics, LiquidityMetrics, TransactionMetrics};
use crate::payload::{array_field, decimal_field, error_marker};

/// Holders above this share of supply count as whales
pub const WHALE_THRESHOLD: Decimal = dec!(0.01);

const TRANSFER_LIMIT: usize = 1000;
const TRADE_LIMIT: usize = 500;
const RECENT_LIMIT: usize = 50;

/// Blockchain data provider (Strategy pattern)
#[async_trait]
pub trait OnchainSource: Send + Sync {
    /// `{"pools": [{"dex", "tvl", ...}]}`
    async fn liquidity_pools(&self, token_address: &str, network: &str) -> Result<Value>;

    /// `{"holders": [{"address", "percentage", ...}], "total_supply"}`
    async fn holders(&self, token_address: &str, network: &str) -> Result<Value>;

    async fn supply(&self, token_address: &str, network: &str) -> Result<Value>;

    /// `{"transfers": [{"value", ...}]}`
    async fn transfers(&self, token_address: &str, network: &str, limit: usize) -> Result<Value>;

    /// `{"trades": [{"value", ...}]}`
    async fn dex_trades(&self, token_address: &str, network: &str, limit: usize) -> Result<Value>;

    fn name(&self) -> &str;
}

/// Stand-in used when no on-chain provider is configured
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableOnchain;

impl UnavailableOnchain {
    fn unavailable<T>() -> Result<T> {
        Err(ResearchError::Fetch(
            "on-chain analytics provider not available".into(),
        ))
    }
}

#[async_trait]
impl OnchainSource for UnavailableOnchain {
    async fn liquidity_pools(&self, _: &str, _: &str) -> Result<Value> {
        Self::unavailable()
    }

    async fn holders(&self, _: &str, _: &str) -> Result<Value> {
        Self::unavailable()
    }

    async fn supply(&self, _: &str, _: &str) -> Result<Value> {
        Self::unavailable()
    }

    async fn transfers(&self, _: &str, _: &str, _: usize) -> Result<Value> {
        Self::unavailable()
    }

    async fn dex_trades(&self, _: &str, _: &str, _: usize) -> Result<Value> {
        Self::unavailable()
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// On-chain metric computations over a source
pub struct OnchainAnalytics {
    source: Arc<dyn OnchainSource>,
}

impl OnchainAnalytics {
    pub fn new(source: Arc<dyn OnchainSource>) -> Self {
        Self { source }
    }

    #[tracing::instrument(skip(self))]
    pub async fn liquidity(&self, token_address: &str, network: &str) -> Result<LiquidityMetrics> {
        let payload = self.source.liquidity_pools(token_address, network).await?;
        liquidity_metrics(&payload)
    }

    #[tracing::instrument(skip(self))]
    pub async fn holders(&self, token_address: &str, network: &str) -> Result<HolderMetrics> {
        let payload = self.source.holders(token_address, network).await?;
        holder_metrics(&payload)
    }

    #[tracing::instrument(skip(self))]
    pub async fn transactions(
        &self,
        token_address: &str,
        network: &str,
    ) -> Result<TransactionMetrics> {
        let transfers = self
            .source
            .transfers(token_address, network, TRANSFER_LIMIT)
            .await?;
        let trades = self
            .source
            .dex_trades(token_address, network, TRADE_LIMIT)
            .await?;
        transaction_metrics(&transfers, &trades)
    }

    #[tracing::instrument(skip(self))]
    pub async fn supply(&self, token_address: &str, network: &str) -> Result<Value> {
        let payload = self.source.supply(token_address, network).await?;
        passthrough(&payload)?;
        Ok(payload)
    }
}

fn passthrough(payload: &Value) -> Result<()> {
    match error_marker(payload) {
        Some(message) => Err(ResearchError::Upstream(message)),
        None => Ok(()),
    }
}

pub fn liquidity_metrics(payload: &Value) -> Result<LiquidityMetrics> {
    passthrough(payload)?;

    let pools = array_field(payload, "pools");
    let mut distribution: BTreeMap<String, Decimal> = BTreeMap::new();
    for pool in pools {
        let dex = pool
            .get("dex")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        *distribution.entry(dex.to_string()).or_default() += decimal_field(pool, "tvl");
    }

    Ok(LiquidityMetrics {
        total_liquidity: distribution.values().copied().sum(),
        pool_count: pools.len(),
        liquidity_distribution: distribution,
        pools: pools.to_vec(),
    })
}

pub fn holder_metrics(payload: &Value) -> Result<HolderMetrics> {
    passthrough(payload)?;

    let holders = array_field(payload, "holders");
    let top_10_percentage = holders
        .iter()
        .take(10)
        .map(|h| decimal_field(h, "percentage"))
        .sum();
    let whale_count = holders
        .iter()
        .filter(|h| decimal_field(h, "percentage") > WHALE_THRESHOLD)
        .count();

    Ok(HolderMetrics {
        total_holders: holders.len(),
        total_supply: decimal_field(payload, "total_supply"),
        top_10_percentage,
        whale_count,
        holder_distribution: holders.to_vec(),
    })
}

pub fn transaction_metrics(transfers: &Value, trades: &Value) -> Result<TransactionMetrics> {
    passthrough(transfers)?;
    passthrough(trades)?;

    let transfers = array_field(transfers, "transfers");
    let trades = array_field(trades, "trades");

    let total_transfer_volume: Decimal = transfers.iter().map(|t| decimal_field(t, "value")).sum();
    let total_trade_volume: Decimal = trades.iter().map(|t| decimal_field(t, "value")).sum();

    Ok(TransactionMetrics {
        total_transfers: transfers.len(),
        total_transfer_volume,
        avg_transfer_size: average(total_transfer_volume, transfers.len()),
        total_trades: trades.len(),
        total_trade_volume,
        avg_trade_size: average(total_trade_volume, trades.len()),
        recent_transfers: transfers.iter().take(RECENT_LIMIT).cloned().collect(),
        recent_trades: trades.iter().take(RECENT_LIMIT).cloned().collect(),
    })
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}
