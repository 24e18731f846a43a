use super::ema::Ema;
use crate::model::MacdValues;

/// MACD: fast EMA − slow EMA, with an EMA signal line of the MACD itself.
///
/// Owns both price EMAs so callers can report them alongside the MACD
/// without computing them twice.
#[derive(Clone, Debug)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    last: MacdValues,
}

impl Macd {
    pub fn new(fast_span: usize, slow_span: usize, signal_span: usize) -> Self {
        Self {
            fast: Ema::with_span(fast_span),
            slow: Ema::with_span(slow_span),
            signal: Ema::with_span(signal_span),
            last: MacdValues::default(),
        }
    }

    pub fn update(&mut self, price: f64) -> MacdValues {
        if !price.is_finite() {
            return self.last;
        }

        let fast = self.fast.update(price);
        let slow = self.slow.update(price);

        let value = fast.zip(slow).map(|(f, s)| f - s);
        let signal = value.and_then(|v| self.signal.update(v));
        let histogram = value.zip(signal).map(|(v, s)| v - s);

        self.last = MacdValues {
            value,
            signal,
            histogram,
        };
        self.last
    }

    pub fn fast(&self) -> Option<f64> {
        self.fast.value()
    }

    pub fn slow(&self) -> Option<f64> {
        self.slow.value()
    }
}
