//! Session returns: close-to-close change and opening gap.

use super::indicator::Indicator;
use crate::domain::PricePoint;

/// Relative change of `values` versus the previous element; NaN at 0.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        result[i] = (values[i] - values[i - 1]) / values[i - 1];
    }
    result
}

/// Close-to-close return: (close[t] - close[t-1]) / close[t-1].
#[derive(Debug, Clone, Default)]
pub struct PctChange;

impl Indicator for PctChange {
    fn name(&self) -> &str {
        "pct_change"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        pct_change(&closes)
    }
}

/// Opening gap: (open[t] - close[t-1]) / close[t-1].
#[derive(Debug, Clone, Default)]
pub struct GapOpen;

impl Indicator for GapOpen {
    fn name(&self) -> &str {
        "gap_open"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let mut result = vec![f64::NAN; points.len()];
        for i in 1..points.len() {
            let prev_close = points[i - 1].close;
            result[i] = (points[i].open - prev_close) / prev_close;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points, DEFAULT_EPSILON};

    #[test]
    fn pct_change_basic() {
        let result = PctChange.compute(&make_points(&[100.0, 110.0, 99.0]));
        assert!(result[0].is_nan());
        assert_approx(result[1], 0.10, DEFAULT_EPSILON);
        assert_approx(result[2], -0.10, DEFAULT_EPSILON);
    }

    #[test]
    fn gap_open_uses_previous_close() {
        let mut points = make_points(&[100.0, 104.0]);
        points[1].open = 102.0;
        let result = GapOpen.compute(&points);
        assert!(result[0].is_nan());
        assert_approx(result[1], 0.02, DEFAULT_EPSILON);
    }

    #[test]
    fn single_point_is_undefined() {
        assert!(PctChange.compute(&make_points(&[50.0]))[0].is_nan());
        assert!(GapOpen.compute(&make_points(&[50.0]))[0].is_nan());
    }
}
