/// Exponential Moving Average with decay `α = 2 / (span + 1)`.
///
/// Recursive form seeded with the first finite value:
/// `ema = α·x + (1 − α)·ema_prev`. Non-finite inputs leave the average
/// unchanged.
#[derive(Clone, Debug)]
pub struct Ema {
    alpha: f64,
    current: Option<f64>,
}

impl Ema {
    pub fn with_span(span: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let alpha = 2.0 / (span as f64 + 1.0);
        Self {
            alpha,
            current: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn update(&mut self, value: f64) -> Option<f64> {
        if value.is_finite() {
            self.current = Some(match self.current {
                None => value,
                Some(prev) => self.alpha.mul_add(value - prev, prev),
            });
        }
        self.current
    }

    pub fn value(&self) -> Option<f64> {
        self.current
    }
}
