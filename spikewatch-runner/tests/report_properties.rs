//! Property tests for the Anomaly Reporter.
//!
//! 1. Ordering: rows sorted by descending |pct_change|, ties in date order
//! 2. Filtering: exactly the sessions whose kind is not NONE, all tagged
//! 3. Aggregation: the global table is the per-instrument tables in order

use chrono::NaiveDate;
use proptest::prelude::*;
use spikewatch_core::domain::{AnomalyKind, PricePoint, Series};
use spikewatch_core::{InstrumentAnalysis, Pipeline};
use spikewatch_runner::AnomalyTable;

fn arb_analysis(id: &'static str) -> impl Strategy<Value = InstrumentAnalysis> {
    prop::collection::vec((1.0..500.0_f64, 0..5_000_000u64), 2..80).prop_map(move |sessions| {
        let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let points = sessions
            .iter()
            .enumerate()
            .map(|(i, &(close, volume))| PricePoint {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume,
            })
            .collect();
        Pipeline::default().analyze(&Series::new(id, points).unwrap())
    })
}

proptest! {
    #[test]
    fn rows_sorted_and_filtered(analysis in arb_analysis("AAA")) {
        let table = AnomalyTable::from_analysis(&analysis);

        prop_assert_eq!(table.len(), analysis.anomaly_count());
        for row in table.rows() {
            prop_assert!(row.kind != AnomalyKind::None);
            prop_assert_eq!(row.ticker.as_str(), "AAA");
        }
        for pair in table.rows().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.magnitude() >= b.magnitude());
            if a.magnitude() == b.magnitude() {
                prop_assert!(a.date < b.date);
            }
        }
    }

    #[test]
    fn global_is_concatenation(a in arb_analysis("AAA"), b in arb_analysis("BBB")) {
        let ta = AnomalyTable::from_analysis(&a);
        let tb = AnomalyTable::from_analysis(&b);
        let global = AnomalyTable::concat([&ta, &tb]);

        prop_assert_eq!(global.len(), ta.len() + tb.len());
        prop_assert_eq!(&global.rows()[..ta.len()], ta.rows());
        prop_assert_eq!(&global.rows()[ta.len()..], tb.rows());
    }
}
