//! Rolling volatility: sample standard deviation of close-to-close returns.
//!
//! The first return is undefined, so the first valid value sits at index
//! `period` (the window needs `period` defined returns).

use super::indicator::Indicator;
use super::returns::pct_change;
use super::rolling::rolling_sample_std;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    name: String,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "volatility period must be >= 2");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        rolling_sample_std(&pct_change(&closes), self.period)
    }
}
