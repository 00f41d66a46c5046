//! Derived per-session records: indicator values and anomaly labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::price_point::PricePoint;

/// Indicator values for one session. `None` means insufficient history
/// (or a degenerate denominator) for that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub sma14: Option<f64>,
    pub pct_change: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub volatility14: Option<f64>,
    pub gap_open: Option<f64>,
    pub vol_sma14: Option<f64>,
    pub volume_to_vol_sma: Option<f64>,
}

/// Spike classification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    None,
    Price,
    Both,
}

/// Sign of the close-to-close move of a price spike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudSuspicion {
    Suspect,
    Normal,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            AnomalyKind::None => "NONE",
            AnomalyKind::Price => "PRICE",
            AnomalyKind::Both => "BOTH",
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        })
    }
}

impl fmt::Display for FraudSuspicion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            FraudSuspicion::Suspect => "SUSPECT",
            FraudSuspicion::Normal => "NORMAL",
        })
    }
}

/// Which of the four fraud rules fired for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudTriggers {
    pub rsi_extreme: bool,
    pub volatility_high: bool,
    pub volume_anomaly: bool,
    pub macd_anomaly: bool,
}

impl FraudTriggers {
    pub fn any(&self) -> bool {
        self.rsi_extreme || self.volatility_high || self.volume_anomaly || self.macd_anomaly
    }

    pub fn suspicion(&self) -> FraudSuspicion {
        if self.any() {
            FraudSuspicion::Suspect
        } else {
            FraudSuspicion::Normal
        }
    }
}

/// Spike and fraud labels for one session.
///
/// `kind == Both` implies both spike flags; `direction` is `Some` exactly
/// when `price_spike` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub price_spike: bool,
    pub volume_spike: bool,
    pub both_spike: bool,
    pub kind: AnomalyKind,
    pub direction: Option<Direction>,
    pub fraud: FraudSuspicion,
    pub triggers: FraudTriggers,
}

impl AnomalyRecord {
    pub fn is_anomaly(&self) -> bool {
        self.kind != AnomalyKind::None
    }
}

/// A session with everything derived from it, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub point: PricePoint,
    pub indicators: IndicatorRecord,
    pub anomaly: AnomalyRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_upper_case() {
        assert_eq!(serde_json::to_string(&AnomalyKind::Both).unwrap(), "\"BOTH\"");
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"DOWN\"");
        assert_eq!(
            serde_json::to_string(&FraudSuspicion::Suspect).unwrap(),
            "\"SUSPECT\""
        );
    }

    #[test]
    fn display_matches_serialized_labels() {
        assert_eq!(AnomalyKind::Price.to_string(), "PRICE");
        assert_eq!(Direction::Up.to_string(), "UP");
        assert_eq!(FraudSuspicion::Normal.to_string(), "NORMAL");
    }

    #[test]
    fn any_trigger_marks_suspect() {
        let none = FraudTriggers::default();
        assert_eq!(none.suspicion(), FraudSuspicion::Normal);

        let macd_only = FraudTriggers {
            macd_anomaly: true,
            ..Default::default()
        };
        assert_eq!(macd_only.suspicion(), FraudSuspicion::Suspect);
    }
}
