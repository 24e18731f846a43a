//! Technical Indicators
//!
//! Streaming accumulators (one price in, one value out, O(1) each) and the
//! [`TechnicalIndicatorEngine`] that runs the fixed indicator set over a
//! price history.
//!
//! ```text
//! price ─┬─ Sma(20) ──────────── sma_20
//!        ├─ Sma(50) ──────────── sma_50
//!        ├─ Rsi(14) ──────────── rsi
//!        ├─ Bollinger(20, 2σ) ── bb_middle / bb_upper / bb_lower
//!        └─ Macd(12, 26, 9) ──── ema_12 / ema_26 / macd / signal / histogram
//! ```

mod bollinger;
mod ema;
mod engine;
mod macd;
mod ring_buffer;
mod rsi;
mod sma;

pub use bollinger::Bollinger;
pub use ema::Ema;
pub use engine::TechnicalIndicatorEngine;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;

pub const SMA_SHORT_WINDOW: usize = 20;
pub const SMA_LONG_WINDOW: usize = 50;
pub const EMA_FAST_SPAN: usize = 12;
pub const EMA_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_STD_DEVS: f64 = 2.0;

/// Rows kept in a snapshot's trailing window
pub const RECENT_ROWS: usize = 30;
