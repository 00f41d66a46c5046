//! Spike Detector.
//!
//! price threshold  = k * std(pct_change) over the defined returns
//! volume threshold = k * std(volume) over every session
//! with k = 3 by default. A session spikes when |pct_change| (resp. its
//! volume) is strictly above the threshold. Zero variance gives a zero
//! threshold and is not special-cased.

use serde::{Deserialize, Serialize};

use super::exceeds;
use crate::domain::{AnomalyKind, Direction, IndicatorRecord, PricePoint};
use crate::stats::sample_std_dev;

/// Thresholds computed once per series. `None` when fewer than two
/// observations exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeThresholds {
    pub price: Option<f64>,
    pub volume: Option<f64>,
}

/// Spike labels for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpikeFlags {
    pub price_spike: bool,
    pub volume_spike: bool,
    pub both_spike: bool,
    pub kind: AnomalyKind,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeDetector {
    pub sigma_multiple: f64,
}

impl Default for SpikeDetector {
    fn default() -> Self {
        Self { sigma_multiple: 3.0 }
    }
}

impl SpikeDetector {
    pub fn thresholds(&self, points: &[PricePoint], records: &[IndicatorRecord]) -> SpikeThresholds {
        let k = self.sigma_multiple;
        SpikeThresholds {
            price: sample_std_dev(records.iter().filter_map(|r| r.pct_change)).map(|sd| k * sd),
            volume: sample_std_dev(points.iter().map(|p| p.volume as f64)).map(|sd| k * sd),
        }
    }

    pub fn classify(
        &self,
        thresholds: &SpikeThresholds,
        point: &PricePoint,
        record: &IndicatorRecord,
    ) -> SpikeFlags {
        let price_spike = exceeds(record.pct_change.map(f64::abs), thresholds.price);
        let volume_spike = exceeds(Some(point.volume as f64), thresholds.volume);
        let both_spike = price_spike && volume_spike;

        let kind = if both_spike {
            AnomalyKind::Both
        } else if price_spike {
            AnomalyKind::Price
        } else {
            AnomalyKind::None
        };

        let direction = match record.pct_change {
            Some(change) if price_spike && change > 0.0 => Some(Direction::Up),
            Some(change) if price_spike && change < 0.0 => Some(Direction::Down),
            _ => None,
        };

        SpikeFlags {
            price_spike,
            volume_spike,
            both_spike,
            kind,
            direction,
        }
    }

    /// Thresholds plus one flag set per session.
    pub fn detect(
        &self,
        points: &[PricePoint],
        records: &[IndicatorRecord],
    ) -> (SpikeThresholds, Vec<SpikeFlags>) {
        let thresholds = self.thresholds(points, records);
        let flags = points
            .iter()
            .zip(records)
            .map(|(p, r)| self.classify(&thresholds, p, r))
            .collect();
        (thresholds, flags)
    }
}
