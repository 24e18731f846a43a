use chrono::{TimeZone, Utc};

use crate::model::PriceSeries;

/// Asserts that two `f64` values agree to within `1e-9`, relative to the
/// expected magnitude (absolute below 1.0).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() <= 1e-9 * e.abs().max(1.0),
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Daily series starting 2024-01-01
pub fn series(prices: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::daily(start, prices)
}
