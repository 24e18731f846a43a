use super::ring_buffer::RollingWindow;
use crate::model::BollingerBands;

/// Bollinger Bands: SMA middle band ± `k` sample standard deviations.
#[derive(Clone, Debug)]
pub struct Bollinger {
    window: RollingWindow,
    std_devs: f64,
}

impl Bollinger {
    pub fn new(length: usize, std_devs: f64) -> Self {
        assert!(length > 1, "sample standard deviation needs at least two prices");
        Self {
            window: RollingWindow::new(length),
            std_devs,
        }
    }

    pub fn update(&mut self, price: f64) -> BollingerBands {
        self.window.push(price);

        let Some(middle) = self.window.mean() else {
            return BollingerBands::default();
        };

        let width = self.std_devs * self.sample_std_dev(middle);

        BollingerBands {
            middle: Some(middle),
            upper: Some(middle + width),
            lower: Some(middle - width),
        }
    }

    /// Two-pass deviation over the (fixed-size) window, avoiding the
    /// cancellation of a running sum of squares.
    fn sample_std_dev(&self, mean: f64) -> f64 {
        let squares: f64 = self.window.iter().map(|x| (x - mean).powi(2)).sum();
        #[allow(clippy::cast_precision_loss)]
        let n = self.window.capacity() as f64;
        (squares / (n - 1.0)).sqrt()
    }
}
