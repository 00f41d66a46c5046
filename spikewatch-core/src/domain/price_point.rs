//! PricePoint: one trading session of one instrument.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV record for a single instrument on a single trading day.
///
/// Created by a series loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Which field of a session an indicator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Close,
    Volume,
}

impl PriceField {
    pub fn of(self, point: &PricePoint) -> f64 {
        match self {
            PriceField::Close => point.close,
            PriceField::Volume => point.volume as f64,
        }
    }
}

impl PricePoint {
    /// Prices must be finite and strictly positive. High/low ordering is
    /// not checked.
    pub fn has_positive_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}
