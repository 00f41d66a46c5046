//! Indicator trait and the named container of computed series.
//!
//! Indicators are pure functions: session history in, numeric column out.
//! Each is computed once over the whole series; nothing is recomputed later.

use crate::domain::PricePoint;
use std::collections::HashMap;

/// A per-session technical indicator.
///
/// `compute` returns one value per input session. Sessions without enough
/// history hold `f64::NAN`.
///
/// # Look-ahead guard
/// The value at session t may only depend on sessions `0..=t`.
pub trait Indicator: Send + Sync {
    /// Column name (e.g. "sma_14", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading sessions that are always undefined.
    fn lookback(&self) -> usize;

    fn compute(&self, points: &[PricePoint]) -> Vec<f64>;
}

/// Named indicator columns for one series, aligned by session index.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Raw value at a session index; may be NaN.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    /// Finite value at a session index, `None` when undefined.
    pub fn defined(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name, index).filter(|v| v.is_finite())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
