//! SpikeWatch Runner: scan orchestration, anomaly reports, exports, charts.
//!
//! Wires the core pipeline into a batch scan:
//! - `ScanConfig` (TOML) selects instruments, date range, source and outputs
//! - `run_scan()` loads, analyses and exports each instrument in turn
//! - `AnomalyTable` ranks flagged sessions; tables concatenate into a global one
//! - CSV tables, SVG charts and a JSON manifest land in the output directory

pub mod chart;
pub mod config;
pub mod export;
pub mod manifest;
pub mod report;
pub mod runner;

pub use chart::{ChartRenderer, SvgChartRenderer};
pub use config::{ConfigError, OutputConfig, ScanConfig, SourceConfig};
pub use export::{format_pct, read_anomaly_csv, write_anomaly_csv, ExportError, ExportedRow};
pub use manifest::{InstrumentEntry, InstrumentStatus, RunManifest};
pub use report::{AnomalyRow, AnomalyTable};
pub use runner::{
    run_scan, InstrumentReport, LogProgress, ScanError, ScanProgress, ScanSummary,
    SkippedInstrument,
};
