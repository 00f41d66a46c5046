//! Simple Moving Average (SMA).
//!
//! Rolling mean of one session field over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::indicator::Indicator;
use super::rolling::rolling_mean;
use crate::domain::{PriceField, PricePoint};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    field: PriceField,
    name: String,
}

impl Sma {
    /// SMA of closing prices.
    pub fn new(period: usize) -> Self {
        Self::of_field(period, PriceField::Close)
    }

    /// SMA of traded volume, named `vol_sma_{period}`.
    pub fn volume(period: usize) -> Self {
        Self::of_field(period, PriceField::Volume)
    }

    pub fn of_field(period: usize, field: PriceField) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        let name = match field {
            PriceField::Close => format!("sma_{period}"),
            PriceField::Volume => format!("vol_sma_{period}"),
        };
        Self {
            period,
            field,
            name,
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let values: Vec<f64> = points.iter().map(|p| self.field.of(p)).collect();
        rolling_mean(&values, self.period)
    }
}
