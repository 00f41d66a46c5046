//! SpikeWatch Core: domain types, indicators, spike detection, fraud heuristics, loaders.
//!
//! This crate contains the per-instrument analysis pipeline:
//! - Domain types (price points, series, indicator and anomaly records)
//! - Indicator trait plus the fourteen-session indicator set
//! - Indicator engine producing one record per session
//! - Spike detector (series-wide 3σ thresholds on price and volume moves)
//! - Fraud heuristic (RSI, volatility, MACD and volume-ratio rules)
//! - Series loaders (Yahoo Finance, CSV directory, synthetic)

pub mod analysis;
pub mod data;
pub mod detect;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod indicators;
pub mod stats;

pub use analysis::{InstrumentAnalysis, Pipeline};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can move across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::SessionRecord>();
        require_sync::<domain::SessionRecord>();
        require_send::<analysis::InstrumentAnalysis>();
        require_sync::<analysis::InstrumentAnalysis>();
        require_send::<analysis::Pipeline>();
        require_sync::<analysis::Pipeline>();
        require_send::<data::YahooLoader>();
        require_sync::<data::YahooLoader>();
        require_send::<data::CsvDirLoader>();
        require_sync::<data::CsvDirLoader>();
    }

    /// Loaders are usable as trait objects.
    #[test]
    fn loader_trait_is_object_safe() {
        let loaders: Vec<Box<dyn data::SeriesLoader>> = vec![
            Box::new(data::SyntheticLoader::default()),
            Box::new(data::CsvDirLoader::new("does-not-exist")),
        ];
        let names: Vec<_> = loaders.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["synthetic", "csv_dir"]);
    }
}
