//! Concrete indicator implementations.
//!
//! Every indicator implements `Indicator` and is computed once per series
//! by the `IndicatorEngine`. Two-line indicators (MACD) are exposed as one
//! named instance per line, keeping the single-column trait unchanged.

pub mod ema;
pub mod indicator;
pub mod macd;
pub mod returns;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod volatility;
pub mod volume_ratio;

pub use ema::ema_of_series;
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{Macd, MacdLine};
pub use returns::{pct_change, GapOpen, PctChange};
pub use rsi::Rsi;
pub use sma::Sma;
pub use volatility::Volatility;
pub use volume_ratio::VolumeRatio;

/// Create synthetic sessions from close prices for testing.
///
/// open = previous close (or close for the first session),
/// high/low = max/min(open, close) ± 1.0, volume = 1000.
#[cfg(test)]
pub fn make_points(closes: &[f64]) -> Vec<crate::domain::PricePoint> {
    use crate::domain::PricePoint;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
