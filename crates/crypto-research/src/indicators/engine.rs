use std::borrow::Cow;

use super::{
    Bollinger, Macd, Rsi, Sma, BOLLINGER_STD_DEVS, BOLLINGER_WINDOW, EMA_FAST_SPAN,
    EMA_SLOW_SPAN, MACD_SIGNAL_SPAN, RECENT_ROWS, RSI_PERIOD, SMA_LONG_WINDOW,
    SMA_SHORT_WINDOW,
};
use crate::error::{ResearchError, Result};
use crate::model::{IndicatorRow, IndicatorSnapshot, PriceSample, PriceSeries};

/// Computes the fixed indicator set over a price history.
///
/// Stateless between calls: every `compute` builds fresh accumulators and
/// walks the series once in timestamp order.
#[derive(Clone, Debug)]
pub struct TechnicalIndicatorEngine {
    recent_rows: usize,
}

impl Default for TechnicalIndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TechnicalIndicatorEngine {
    pub fn new() -> Self {
        Self {
            recent_rows: RECENT_ROWS,
        }
    }

    /// Indicators at the latest sample plus the trailing rows.
    ///
    /// Fails only when the series is empty; individual fields may still be
    /// `None`.
    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorSnapshot> {
        let rows = self.rows(series);
        let snapshot = IndicatorSnapshot::from_rows(&rows, self.recent_rows)
            .ok_or_else(ResearchError::no_price_data)?;

        tracing::debug!(
            samples = rows.len(),
            price = snapshot.current_price,
            rsi = ?snapshot.rsi,
            "Computed indicator snapshot"
        );

        Ok(snapshot)
    }

    /// One row per sample, in timestamp order
    pub fn rows(&self, series: &PriceSeries) -> Vec<IndicatorRow> {
        let samples = ordered(series);
        let mut state = IndicatorState::new();
        samples.iter().map(|sample| state.update(sample)).collect()
    }
}

/// Samples sorted by timestamp. Stable, so duplicate timestamps keep input order.
fn ordered(series: &PriceSeries) -> Cow<'_, [PriceSample]> {
    if series.is_ordered() {
        Cow::Borrowed(series.samples())
    } else {
        tracing::debug!(samples = series.len(), "Sorting out-of-order price series");
        let mut samples = series.samples().to_vec();
        samples.sort_by_key(|s| s.timestamp);
        Cow::Owned(samples)
    }
}

struct IndicatorState {
    sma_short: Sma,
    sma_long: Sma,
    rsi: Rsi,
    bollinger: Bollinger,
    macd: Macd,
}

impl IndicatorState {
    fn new() -> Self {
        Self {
            sma_short: Sma::new(SMA_SHORT_WINDOW),
            sma_long: Sma::new(SMA_LONG_WINDOW),
            rsi: Rsi::new(RSI_PERIOD),
            bollinger: Bollinger::new(BOLLINGER_WINDOW, BOLLINGER_STD_DEVS),
            macd: Macd::new(EMA_FAST_SPAN, EMA_SLOW_SPAN, MACD_SIGNAL_SPAN),
        }
    }

    fn update(&mut self, sample: &PriceSample) -> IndicatorRow {
        let price = sample.price;
        let bands = self.bollinger.update(price);
        let macd = self.macd.update(price);

        IndicatorRow {
            timestamp: sample.timestamp,
            price,
            sma_20: self.sma_short.update(price),
            sma_50: self.sma_long.update(price),
            ema_12: self.macd.fast(),
            ema_26: self.macd.slow(),
            rsi: self.rsi.update(price),
            bb_middle: bands.middle,
            bb_upper: bands.upper,
            bb_lower: bands.lower,
            macd: macd.value,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, series};
    use chrono::{Duration, TimeZone, Utc};

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64;
                100.0 + 10.0 * (x / 5.0).sin() + x * 0.3
            })
            .collect()
    }

    #[test]
    fn empty_series_is_no_data() {
        let engine = TechnicalIndicatorEngine::new();
        let err = engine.compute(&PriceSeries::default()).unwrap_err();
        assert!(matches!(err, ResearchError::NoData(_)));
        assert_eq!(err.to_string(), "No price data available");
    }

    #[test]
    fn short_series_leaves_windows_undefined() {
        let engine = TechnicalIndicatorEngine::new();
        for len in [1, 5, 19] {
            let snapshot = engine.compute(&series(&wave(len))).unwrap();
            assert_eq!(snapshot.sma_20, None);
            assert_eq!(snapshot.sma_50, None);
            assert_eq!(snapshot.bollinger.middle, None);
            assert_eq!(snapshot.bollinger.upper, None);
            assert_eq!(snapshot.bollinger.lower, None);
            assert!(snapshot.ema_12.is_some());
            assert!(snapshot.macd.value.is_some());
        }
    }

    #[test]
    fn bands_are_symmetric_once_defined() {
        let engine = TechnicalIndicatorEngine::new();
        for len in [20, 21, 60, 90] {
            let snapshot = engine.compute(&series(&wave(len))).unwrap();
            let bb = snapshot.bollinger;
            let (middle, upper, lower) = (bb.middle.unwrap(), bb.upper.unwrap(), bb.lower.unwrap());
            assert_approx!(upper - middle, middle - lower);
            assert_eq!(snapshot.sma_20, bb.middle);
        }
    }

    #[test]
    fn sma_50_is_mean_of_last_fifty() {
        let engine = TechnicalIndicatorEngine::new();
        let prices = wave(49);
        assert_eq!(engine.compute(&series(&prices)).unwrap().sma_50, None);

        let prices = wave(90);
        let snapshot = engine.compute(&series(&prices)).unwrap();
        let expected = prices[40..].iter().sum::<f64>() / 50.0;
        assert_approx!(snapshot.sma_50.unwrap(), expected);
    }

    #[test]
    fn macd_identities_hold_on_every_row() {
        let engine = TechnicalIndicatorEngine::new();
        for row in engine.rows(&series(&wave(90))) {
            let macd = row.macd.unwrap();
            assert_eq!(macd, row.ema_12.unwrap() - row.ema_26.unwrap());
            assert_eq!(row.macd_histogram.unwrap(), macd - row.macd_signal.unwrap());
        }
    }

    #[test]
    fn rsi_stays_in_range() {
        let engine = TechnicalIndicatorEngine::new();
        let falling: Vec<f64> = (0..60).map(|i| 5_000.0 * 0.93_f64.powi(i)).collect();
        let spikes: Vec<f64> = (0..80)
            .map(|i| if i % 11 == 0 { 250_000.0 } else { 12.5 + f64::from(i % 3) })
            .collect();
        let alternating: Vec<f64> = (0..80)
            .map(|i| if i % 2 == 0 { 40_000.0 } else { 0.003 })
            .collect();

        for prices in [wave(90), falling.clone(), spikes, alternating] {
            let rows = engine.rows(&series(&prices));
            let defined: Vec<f64> = rows.iter().filter_map(|r| r.rsi).collect();
            assert!(!defined.is_empty());
            assert!(defined.iter().all(|v| (0.0..=100.0).contains(v)));
        }

        let rows = engine.rows(&series(&falling));
        assert!(rows[14..].iter().all(|r| r.rsi == Some(0.0)));
    }

    #[test]
    fn bands_collapse_after_level_shift() {
        let engine = TechnicalIndicatorEngine::new();
        let mut prices: Vec<f64> = (0..60).map(|i| 61_234.0 + f64::from(i % 9) * 17.3).collect();
        prices.extend([0.0123; 30]);

        let snapshot = engine.compute(&series(&prices)).unwrap();
        let bb = snapshot.bollinger;
        assert_eq!(bb.middle, Some(0.0123));
        assert_eq!(bb.upper, Some(0.0123));
        assert_eq!(bb.lower, Some(0.0123));
        assert_eq!(snapshot.sma_20, Some(0.0123));
    }

    #[test]
    fn sma_50_forgets_earlier_magnitudes() {
        let engine = TechnicalIndicatorEngine::new();
        let mut prices = vec![1e17; 50];
        prices.extend([1.0; 50]);
        let snapshot = engine.compute(&series(&prices)).unwrap();
        assert_eq!(snapshot.sma_50, Some(1.0));
        assert_eq!(snapshot.sma_20, Some(1.0));
    }

    #[test]
    fn rsi_first_defined_at_fifteenth_sample() {
        let engine = TechnicalIndicatorEngine::new();
        let mut prices = vec![
            100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 106.0, 110.0, 108.0, 112.0, 111.0, 115.0,
            113.0, 117.0,
        ];
        assert_eq!(engine.compute(&series(&prices)).unwrap().rsi, None);

        prices.push(116.0);
        let rows = engine.rows(&series(&prices));
        assert!(rows[..14].iter().all(|r| r.rsi.is_none()));
        assert_approx!(rows[14].rsi.unwrap(), 100.0 - 100.0 / 3.6);
    }

    #[test]
    fn constant_series_edge_case() {
        let engine = TechnicalIndicatorEngine::new();
        let snapshot = engine.compute(&series(&[100.0; 50])).unwrap();
        assert_eq!(snapshot.bollinger.middle, Some(100.0));
        assert_eq!(snapshot.bollinger.upper, Some(100.0));
        assert_eq!(snapshot.bollinger.lower, Some(100.0));
        assert_eq!(snapshot.sma_50, Some(100.0));
        assert_eq!(snapshot.rsi, None);
    }

    #[test]
    fn compute_is_idempotent() {
        let engine = TechnicalIndicatorEngine::new();
        let input = series(&wave(90));
        let first = engine.compute(&input).unwrap();
        let second = engine.compute(&input).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.rsi.map(f64::to_bits),
            second.rsi.map(f64::to_bits)
        );
    }

    #[test]
    fn recent_window_is_last_thirty_rows() {
        let engine = TechnicalIndicatorEngine::new();
        let input = series(&wave(90));
        let snapshot = engine.compute(&input).unwrap();
        assert_eq!(snapshot.recent_window.len(), 30);
        assert_eq!(
            snapshot.recent_window.last().unwrap().timestamp,
            input.latest().unwrap().timestamp
        );
        assert_eq!(snapshot.current_price, input.latest().unwrap().price);

        let short = engine.compute(&series(&wave(7))).unwrap();
        assert_eq!(short.recent_window.len(), 7);
    }

    #[test]
    fn out_of_order_input_is_sorted() {
        let engine = TechnicalIndicatorEngine::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ordered = series(&wave(30));
        let mut shuffled = ordered.samples().to_vec();
        shuffled.reverse();
        let shuffled = PriceSeries::new(shuffled);

        assert_eq!(
            engine.compute(&shuffled).unwrap(),
            engine.compute(&ordered).unwrap()
        );
        // the caller's series is untouched
        assert_eq!(shuffled.samples()[0].timestamp, start + Duration::days(29));
    }

    #[test]
    fn non_finite_price_does_not_panic() {
        let engine = TechnicalIndicatorEngine::new();
        let mut prices = wave(40);
        prices[35] = f64::NAN;
        let snapshot = engine.compute(&series(&prices)).unwrap();
        // NaN still inside the 20-sample window
        assert_eq!(snapshot.sma_20, None);
        assert_eq!(snapshot.rsi, None);
        assert!(snapshot.ema_12.is_some());
    }
}
