use super::ring_buffer::RollingWindow;

/// Simple Moving Average over a fixed trailing window.
///
/// Undefined until the window is full, and while a non-finite price sits
/// inside it. The mean is taken over the stored window on every update.
#[derive(Clone, Debug)]
pub struct Sma {
    window: RollingWindow,
}

impl Sma {
    pub fn new(length: usize) -> Self {
        Self {
            window: RollingWindow::new(length),
        }
    }

    pub fn update(&mut self, price: f64) -> Option<f64> {
        self.window.push(price);
        self.window.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_approx;

    #[test]
    fn none_until_window_full() {
        let mut sma = Sma::new(3);
        assert_eq!(sma.update(10.0), None);
        assert_eq!(sma.update(20.0), None);
        assert_eq!(sma.update(30.0), Some(20.0));
    }

    #[test]
    fn slides_across_many_prices() {
        let mut sma = Sma::new(2);
        for price in [10.0, 20.0, 30.0, 40.0] {
            sma.update(price);
        }
        // (40 + 50) / 2
        assert_eq!(sma.update(50.0), Some(45.0));
    }

    #[test]
    fn matches_direct_mean_over_long_run() {
        let prices: Vec<f64> = (0..200).map(|i| 100.0 + f64::from(i % 17) * 0.37).collect();
        let mut sma = Sma::new(50);
        let mut last = None;
        for &price in &prices {
            last = sma.update(price);
        }
        let expected = prices[150..].iter().sum::<f64>() / 50.0;
        assert_approx!(last.unwrap(), expected);
    }

    #[test]
    fn nan_in_window_is_undefined() {
        let mut sma = Sma::new(2);
        sma.update(1.0);
        assert_eq!(sma.update(f64::NAN), None);
        assert_eq!(sma.update(2.0), None);
        assert_eq!(sma.update(4.0), Some(3.0));
    }
}
