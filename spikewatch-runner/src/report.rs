//! Anomaly Reporter: per-instrument anomaly tables and their aggregation.
//!
//! A table holds only sessions whose kind is not NONE, sorted by descending
//! |pct_change| with ties kept in date order. The global table is the
//! concatenation of per-instrument tables in processing order.

use chrono::NaiveDate;
use serde::Serialize;

use spikewatch_core::domain::{AnomalyKind, Direction, FraudSuspicion, IndicatorRecord};
use spikewatch_core::InstrumentAnalysis;

/// One flagged session, tagged with its instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub pct_change: Option<f64>,
    pub kind: AnomalyKind,
    pub direction: Option<Direction>,
    pub fraud: FraudSuspicion,
    pub indicators: IndicatorRecord,
}

impl AnomalyRow {
    /// Sort key. Undefined changes rank last.
    pub fn magnitude(&self) -> f64 {
        self.pct_change.map_or(f64::NEG_INFINITY, f64::abs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnomalyTable {
    rows: Vec<AnomalyRow>,
}

impl AnomalyTable {
    pub fn from_analysis(analysis: &InstrumentAnalysis) -> Self {
        let mut rows: Vec<AnomalyRow> = analysis
            .anomalies()
            .map(|s| AnomalyRow {
                ticker: analysis.instrument.clone(),
                date: s.point.date,
                close: s.point.close,
                volume: s.point.volume,
                pct_change: s.indicators.pct_change,
                kind: s.anomaly.kind,
                direction: s.anomaly.direction,
                fraud: s.anomaly.fraud,
                indicators: s.indicators.clone(),
            })
            .collect();

        rows.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
        Self { rows }
    }

    /// Concatenate tables in the given order.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a AnomalyTable>) -> Self {
        Self {
            rows: tables
                .into_iter()
                .flat_map(|t| t.rows.iter().cloned())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[AnomalyRow] {
        &self.rows
    }

    pub fn top(&self, n: usize) -> &[AnomalyRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spikewatch_core::domain::{PricePoint, Series};
    use spikewatch_core::Pipeline;

    /// Quiet alternating series with two planted moves: +40% at 20, -60% at 30.
    fn analysis(id: &str) -> InstrumentAnalysis {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 * (1.0 + 0.01 * (i % 2) as f64)).collect();
        for c in closes.iter_mut().skip(20) {
            *c *= 1.4;
        }
        for c in closes.iter_mut().skip(30) {
            *c *= 0.4;
        }
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: if i % 2 == 0 { 1000 } else { 900 },
            })
            .collect();
        Pipeline::default().analyze(&Series::new(id, points).unwrap())
    }

    #[test]
    fn sorted_by_magnitude_and_tagged() {
        let table = AnomalyTable::from_analysis(&analysis("AAA"));
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| r.ticker == "AAA"));
        assert_eq!(table.rows()[0].direction, Some(Direction::Down));
        assert_eq!(table.rows()[1].direction, Some(Direction::Up));
        assert!(table.rows()[0].magnitude() >= table.rows()[1].magnitude());
    }

    #[test]
    fn concat_keeps_processing_order() {
        let a = AnomalyTable::from_analysis(&analysis("AAA"));
        let empty = AnomalyTable::default();
        let b = AnomalyTable::from_analysis(&analysis("BBB"));

        let global = AnomalyTable::concat([&a, &empty, &b]);
        assert_eq!(global.len(), a.len() + b.len());
        let tickers: Vec<_> = global.rows().iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAA", "AAA", "BBB", "BBB"]);
    }

    #[test]
    fn top_clamps() {
        let table = AnomalyTable::from_analysis(&analysis("AAA"));
        assert_eq!(table.top(1).len(), 1);
        assert_eq!(table.top(10).len(), 2);
        assert!(AnomalyTable::default().top(3).is_empty());
    }
}
