use super::ring_buffer::RollingWindow;

/// Relative Strength Index with simple rolling means of gains and losses.
///
/// `RSI = 100 − 100 / (1 + RS)`, `RS = mean(gain) / mean(loss)` over the
/// last `length` price deltas. The first value appears once `length` deltas
/// exist, i.e. at sample `length + 1`.
///
/// Undefined while the mean loss is zero (flat or strictly rising window);
/// no value is forced to 100.
#[derive(Clone, Debug)]
pub struct Rsi {
    prev: Option<f64>,
    gains: RollingWindow,
    losses: RollingWindow,
}

impl Rsi {
    pub fn new(length: usize) -> Self {
        Self {
            prev: None,
            gains: RollingWindow::new(length),
            losses: RollingWindow::new(length),
        }
    }

    pub fn update(&mut self, price: f64) -> Option<f64> {
        let prev = self.prev.replace(price)?;
        let delta = price - prev;

        if delta.is_finite() {
            self.gains.push(delta.max(0.0));
            self.losses.push((-delta).max(0.0));
        } else {
            self.gains.push(f64::NAN);
            self.losses.push(f64::NAN);
        }

        let avg_gain = self.gains.mean()?;
        let avg_loss = self.losses.mean()?;

        if avg_loss <= 0.0 {
            return None;
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_approx;

    const RISING: [f64; 14] = [
        100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 106.0, 110.0, 108.0, 112.0, 111.0, 115.0,
        113.0, 117.0,
    ];

    #[test]
    fn first_value_needs_fourteen_deltas() {
        let mut rsi = Rsi::new(14);
        for price in RISING {
            assert_eq!(rsi.update(price), None);
        }
        // gains 26 / losses 10 over 14 deltas: RS = 2.6
        assert_approx!(rsi.update(116.0).unwrap(), 100.0 - 100.0 / 3.6);
    }

    #[test]
    fn all_losses_is_zero() {
        let mut rsi = Rsi::new(3);
        let values: Vec<_> = [10.0, 9.0, 8.0, 7.0].iter().map(|&p| rsi.update(p)).collect();
        assert_eq!(values[3], Some(0.0));
    }

    #[test]
    fn zero_loss_is_undefined() {
        let mut rsi = Rsi::new(3);
        for price in [1.0, 2.0, 3.0, 4.0, 5.0] {
            assert_eq!(rsi.update(price), None);
        }
    }

    #[test]
    fn undefined_again_once_large_loss_leaves() {
        let mut rsi = Rsi::new(3);
        rsi.update(1e12);
        rsi.update(0.5);
        assert_eq!(rsi.update(0.6), None);
        let value = rsi.update(0.7).unwrap();
        assert!(value > 0.0 && value < 1e-9);
        // the loss has left the window; only gains remain
        assert_eq!(rsi.update(0.8), None);
        assert_eq!(rsi.update(0.9), None);
    }

    #[test]
    fn nan_delta_blocks_window() {
        let mut rsi = Rsi::new(2);
        rsi.update(10.0);
        rsi.update(9.0);
        assert_eq!(rsi.update(f64::NAN), None);
        // delta NaN -> 11 is also non-finite
        assert_eq!(rsi.update(11.0), None);
        assert_eq!(rsi.update(10.0), None);
        // window: [-1, +2] after 10 -> 9 -> ... -> 10 -> 12
        let value = rsi.update(12.0).unwrap();
        assert!((0.0..=100.0).contains(&value));
    }
}
