//! The per-instrument pipeline: engine → spike detector → fraud heuristic.
//!
//! Each stage reads the previous stage's output and adds its own fields;
//! nothing is recomputed once a stage has finished.

use serde::Serialize;
use tracing::debug;

use crate::detect::{FraudRules, FraudThresholds, SpikeDetector, SpikeThresholds};
use crate::domain::{AnomalyRecord, FraudSuspicion, Series, SessionRecord};
use crate::engine::IndicatorEngine;

/// Fully labelled sessions of one instrument plus the thresholds used.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentAnalysis {
    pub instrument: String,
    pub sessions: Vec<SessionRecord>,
    pub spike_thresholds: SpikeThresholds,
    pub fraud_thresholds: FraudThresholds,
}

impl InstrumentAnalysis {
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions whose anomaly kind is not `None`, in date order.
    pub fn anomalies(&self) -> impl Iterator<Item = &SessionRecord> {
        self.sessions.iter().filter(|s| s.anomaly.is_anomaly())
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies().count()
    }

    pub fn suspect_count(&self) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.anomaly.fraud == FraudSuspicion::Suspect)
            .count()
    }
}

/// Stage configuration for the pipeline.
#[derive(Default)]
pub struct Pipeline {
    pub engine: IndicatorEngine,
    pub spikes: SpikeDetector,
    pub fraud: FraudRules,
}

impl Pipeline {
    pub fn new(engine: IndicatorEngine, spikes: SpikeDetector, fraud: FraudRules) -> Self {
        Self {
            engine,
            spikes,
            fraud,
        }
    }

    /// Run all stages. An empty series yields an empty analysis.
    pub fn analyze(&self, series: &Series) -> InstrumentAnalysis {
        let points = series.points();
        let indicators = self.engine.compute(series);
        let (spike_thresholds, flags) = self.spikes.detect(points, &indicators);
        let (fraud_thresholds, triggers) = self.fraud.assess(&indicators);

        debug!(
            instrument = series.instrument(),
            sessions = points.len(),
            first = ?series.first_date(),
            last = ?series.last_date(),
            warmup = self.engine.warmup(),
            price_threshold = ?spike_thresholds.price,
            volume_threshold = ?spike_thresholds.volume,
            "thresholds computed"
        );

        let sessions = points
            .iter()
            .zip(indicators)
            .zip(flags.into_iter().zip(triggers))
            .map(|((point, indicators), (flags, triggers))| SessionRecord {
                point: point.clone(),
                indicators,
                anomaly: AnomalyRecord {
                    price_spike: flags.price_spike,
                    volume_spike: flags.volume_spike,
                    both_spike: flags.both_spike,
                    kind: flags.kind,
                    direction: flags.direction,
                    fraud: triggers.suspicion(),
                    triggers,
                },
            })
            .collect();

        InstrumentAnalysis {
            instrument: series.instrument().to_string(),
            sessions,
            spike_thresholds,
            fraud_thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnomalyKind, Direction};
    use crate::indicators::make_points;

    #[test]
    fn empty_series_is_empty_analysis() {
        let analysis = Pipeline::default().analyze(&Series::empty("NVDA"));
        assert!(analysis.is_empty());
        assert_eq!(analysis.anomaly_count(), 0);
        assert_eq!(analysis.instrument, "NVDA");
    }

    #[test]
    fn labels_flow_through() {
        let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 2) as f64).collect();
        closes[15] = 1010.0;
        let mut points = make_points(&closes);
        for (i, p) in points.iter_mut().enumerate() {
            p.volume = if i % 2 == 0 { 1000 } else { 100 };
        }
        let series = Series::new("TEST", points).unwrap();

        let analysis = Pipeline::default().analyze(&series);
        assert_eq!(analysis.len(), 20);

        let flagged: Vec<_> = analysis.anomalies().collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].point.close, 1010.0);
        assert_eq!(flagged[0].anomaly.kind, AnomalyKind::Price);
        assert_eq!(flagged[0].anomaly.direction, Some(Direction::Up));
    }

    #[test]
    fn rsi_extreme_marks_suspect() {
        // Monotonic rise: RSI pinned at 100 once the window fills.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let series = Series::new("UP", make_points(&closes)).unwrap();
        let analysis = Pipeline::default().analyze(&series);

        assert_eq!(analysis.sessions[12].anomaly.fraud, FraudSuspicion::Normal);
        assert!(analysis.sessions[13].anomaly.triggers.rsi_extreme);
        assert_eq!(analysis.suspect_count(), 30 - 13);
    }
}
