//! Domain Models
//!
//! Price history, indicator output, and protocol/on-chain metric types.
//! Indicator math runs on `f64` (NaN and undefined windows are part of the
//! domain there); TVL, supply and volume figures use `rust_decimal`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single observed price
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Build from a unix timestamp in milliseconds (CoinGecko's format)
    pub fn from_millis(millis: i64, price: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|timestamp| Self { timestamp, price })
    }
}

/// Price history for one token, normally ascending by timestamp
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    pub fn new(samples: Vec<PriceSample>) -> Self {
        Self { samples }
    }

    /// One sample per day starting at `start`
    pub fn daily(start: DateTime<Utc>, prices: &[f64]) -> Self {
        prices
            .iter()
            .zip(0_i64..)
            .map(|(&price, day)| PriceSample::new(start + Duration::days(day), price))
            .collect()
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.last()
    }

    /// True if timestamps never decrease
    pub fn is_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}

impl FromIterator<PriceSample> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// All indicator values computed at one sample.
///
/// `None` means the indicator has no value at this point (window still
/// filling, zero RSI denominator, non-finite input in the window).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub middle: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub value: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Indicator values at the most recent sample plus a trailing window of rows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub current_price: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub bollinger: BollingerBands,
    pub macd: MacdValues,
    /// Most-recent-last
    pub recent_window: Vec<IndicatorRow>,
}

impl IndicatorSnapshot {
    /// Build from the computed rows; `None` when there are no rows
    pub fn from_rows(rows: &[IndicatorRow], window: usize) -> Option<Self> {
        let latest = rows.last()?;
        let start = rows.len().saturating_sub(window);

        Some(Self {
            current_price: latest.price,
            sma_20: latest.sma_20,
            sma_50: latest.sma_50,
            ema_12: latest.ema_12,
            ema_26: latest.ema_26,
            rsi: latest.rsi,
            bollinger: BollingerBands {
                middle: latest.bb_middle,
                upper: latest.bb_upper,
                lower: latest.bb_lower,
            },
            macd: MacdValues {
                value: latest.macd,
                signal: latest.macd_signal,
                histogram: latest.macd_histogram,
            },
            recent_window: rows[start..].to_vec(),
        })
    }
}

/// Normalized TVL metrics for a DeFi protocol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMetrics {
    pub protocol: String,
    pub tvl: Decimal,
    pub tvl_change_1d: Decimal,
    pub tvl_change_7d: Decimal,

    /// Raw upstream payload
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub protocol_data: serde_json::Value,
}

impl ProtocolMetrics {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            tvl: Decimal::ZERO,
            tvl_change_1d: Decimal::ZERO,
            tvl_change_7d: Decimal::ZERO,
            protocol_data: serde_json::Value::Null,
        }
    }
}

/// Liquidity pool summary for a token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    pub total_liquidity: Decimal,
    pub pool_count: usize,
    /// TVL per DEX
    pub liquidity_distribution: BTreeMap<String, Decimal>,
    pub pools: Vec<serde_json::Value>,
}

/// Holder concentration summary for a token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HolderMetrics {
    pub total_holders: usize,
    pub total_supply: Decimal,
    pub top_10_percentage: Decimal,
    pub whale_count: usize,
    pub holder_distribution: Vec<serde_json::Value>,
}

/// Transfer and DEX trade activity summary for a token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetrics {
    pub total_transfers: usize,
    pub total_transfer_volume: Decimal,
    pub avg_transfer_size: Decimal,
    pub total_trades: usize,
    pub total_trade_volume: Decimal,
    pub avg_trade_size: Decimal,
    pub recent_transfers: Vec<serde_json::Value>,
    pub recent_trades: Vec<serde_json::Value>,
}

/// 24h volume and market capitalization for a token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub volume_24h: Decimal,
    pub market_cap: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_series() {
        let series = PriceSeries::daily(start(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
        assert!(series.is_ordered());
        assert_eq!(series.latest().unwrap().price, 3.0);
        assert_eq!(
            series.samples()[2].timestamp - series.samples()[0].timestamp,
            Duration::days(2)
        );
    }

    #[test]
    fn test_from_millis() {
        let sample = PriceSample::from_millis(1_704_067_200_000, 42.0).unwrap();
        assert_eq!(sample.timestamp, start());
    }

    #[test]
    fn test_unordered_series_detected() {
        let series = PriceSeries::new(vec![
            PriceSample::new(start() + Duration::days(1), 1.0),
            PriceSample::new(start(), 2.0),
        ]);
        assert!(!series.is_ordered());
    }

    #[test]
    fn test_snapshot_keeps_trailing_rows() {
        let rows: Vec<IndicatorRow> = (0..40)
            .map(|i| IndicatorRow {
                timestamp: start() + Duration::days(i),
                price: f64::from(i32::try_from(i).unwrap()),
                sma_20: None,
                sma_50: None,
                ema_12: None,
                ema_26: None,
                rsi: None,
                bb_middle: None,
                bb_upper: None,
                bb_lower: None,
                macd: None,
                macd_signal: None,
                macd_histogram: None,
            })
            .collect();

        let snapshot = IndicatorSnapshot::from_rows(&rows, 30).unwrap();
        assert_eq!(snapshot.current_price, 39.0);
        assert_eq!(snapshot.recent_window.len(), 30);
        assert_eq!(snapshot.recent_window[0].price, 10.0);
        assert!(IndicatorSnapshot::from_rows(&[], 30).is_none());
    }
}
