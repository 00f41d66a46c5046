//! Fraud Heuristic: four independent extremity rules OR-ed together.
//!
//! - RSI outside [rsi_lower, rsi_upper]
//! - volatility above mean + 2σ of the series' volatility
//! - volume above 3× its rolling average
//! - |MACD| above mean + 2σ of the series' |MACD|
//!
//! Statistics cover every session, including ones already flagged as
//! spikes.

use serde::{Deserialize, Serialize};

use super::exceeds;
use crate::domain::{FraudTriggers, IndicatorRecord};
use crate::stats::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FraudRules {
    pub rsi_upper: f64,
    pub rsi_lower: f64,
    pub volatility_sigma: f64,
    pub macd_sigma: f64,
    pub volume_ratio_max: f64,
}

impl Default for FraudRules {
    fn default() -> Self {
        Self {
            rsi_upper: 80.0,
            rsi_lower: 20.0,
            volatility_sigma: 2.0,
            macd_sigma: 2.0,
            volume_ratio_max: 3.0,
        }
    }
}

/// Series-wide cut-offs for the two statistical rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FraudThresholds {
    pub volatility: Option<f64>,
    pub macd_abs: Option<f64>,
}

impl FraudRules {
    pub fn thresholds(&self, records: &[IndicatorRecord]) -> FraudThresholds {
        let volatility = Summary::of(records.iter().filter_map(|r| r.volatility14))
            .and_then(|s| s.upper_band(self.volatility_sigma));
        let macd_abs = Summary::of(records.iter().filter_map(|r| r.macd.map(f64::abs)))
            .and_then(|s| s.upper_band(self.macd_sigma));
        FraudThresholds {
            volatility,
            macd_abs,
        }
    }

    pub fn evaluate(&self, thresholds: &FraudThresholds, record: &IndicatorRecord) -> FraudTriggers {
        FraudTriggers {
            rsi_extreme: record
                .rsi14
                .is_some_and(|rsi| rsi > self.rsi_upper || rsi < self.rsi_lower),
            volatility_high: exceeds(record.volatility14, thresholds.volatility),
            volume_anomaly: exceeds(record.volume_to_vol_sma, Some(self.volume_ratio_max)),
            macd_anomaly: exceeds(record.macd.map(f64::abs), thresholds.macd_abs),
        }
    }

    /// Thresholds plus the triggers of every session.
    pub fn assess(&self, records: &[IndicatorRecord]) -> (FraudThresholds, Vec<FraudTriggers>) {
        let thresholds = self.thresholds(records);
        let triggers = records
            .iter()
            .map(|r| self.evaluate(&thresholds, r))
            .collect();
        (thresholds, triggers)
    }
}
