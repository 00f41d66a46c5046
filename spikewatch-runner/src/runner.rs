//! Scan orchestrator: wires loader, pipeline, reporter and exporters.
//!
//! Instruments are processed one after another, each start to finish.
//! A loader failure or an empty series skips that instrument and the scan
//! continues; an export failure aborts the scan. Chart failures are logged
//! and otherwise ignored. `manifest.json` is written last.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use spikewatch_core::data::SeriesLoader;
use spikewatch_core::fingerprint::dataset_hash;
use spikewatch_core::{InstrumentAnalysis, Pipeline};

use crate::chart::ChartRenderer;
use crate::config::{ConfigError, ScanConfig};
use crate::export::{write_anomaly_csv, ExportError};
use crate::manifest::{write_manifest, InstrumentEntry, InstrumentStatus, RunManifest};
use crate::report::AnomalyTable;

pub const GLOBAL_TABLE: &str = "global_anomalies.csv";
pub const MANIFEST: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Callbacks for per-instrument progress.
pub trait ScanProgress: Send {
    fn on_start(&self, instrument: &str, index: usize, total: usize);

    fn on_skipped(&self, instrument: &str, reason: &str);

    fn on_complete(&self, report: &InstrumentReport);

    fn on_finished(&self, summary: &ScanSummary);
}

/// Progress reporter that logs through `tracing`.
pub struct LogProgress;

impl ScanProgress for LogProgress {
    fn on_start(&self, instrument: &str, index: usize, total: usize) {
        info!("[{}/{}] processing {instrument}", index + 1, total);
    }

    fn on_skipped(&self, instrument: &str, reason: &str) {
        warn!(instrument, reason, "skipped");
    }

    fn on_complete(&self, report: &InstrumentReport) {
        info!(
            instrument = %report.analysis.instrument,
            sessions = report.analysis.len(),
            anomalies = report.table.len(),
            suspects = report.analysis.suspect_count(),
            "analyzed"
        );
    }

    fn on_finished(&self, summary: &ScanSummary) {
        info!(
            analyzed = summary.manifest.analyzed_count(),
            skipped = summary.skipped.len(),
            anomalies = summary.global.len(),
            manifest = %summary.manifest_path.display(),
            "scan complete"
        );
    }
}

/// Everything produced for one analysed instrument.
#[derive(Debug, Clone)]
pub struct InstrumentReport {
    pub analysis: InstrumentAnalysis,
    pub table: AnomalyTable,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SkippedInstrument {
    pub instrument: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Analysed instruments in processing order.
    pub reports: Vec<InstrumentReport>,
    pub skipped: Vec<SkippedInstrument>,
    pub global: AnomalyTable,
    pub manifest: RunManifest,
    pub manifest_path: PathBuf,
}

impl ScanSummary {
    pub fn has_anomalies(&self) -> bool {
        !self.global.is_empty()
    }
}

/// Run a scan over every configured instrument.
///
/// `renderer` is ignored when charts are disabled in the config.
pub fn run_scan(
    config: &ScanConfig,
    loader: &dyn SeriesLoader,
    renderer: Option<&dyn ChartRenderer>,
    progress: &dyn ScanProgress,
) -> Result<ScanSummary, ScanError> {
    config.validate()?;
    let out = config.output_dir.as_path();
    std::fs::create_dir_all(out).map_err(|source| ScanError::OutputDir {
        path: out.to_path_buf(),
        source,
    })?;

    let renderer = renderer.filter(|_| config.output.charts);
    let pipeline = Pipeline::default();
    let total = config.instruments.len();

    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    let mut entries = Vec::with_capacity(total);

    for (index, instrument) in config.instruments.iter().enumerate() {
        progress.on_start(instrument, index, total);

        let series = match loader.load(instrument, config.start_date, config.end_date) {
            Ok(series) if series.is_empty() => Err("no sessions in range".to_string()),
            Ok(series) => Ok(series),
            Err(e) => Err(e.to_string()),
        };
        let series = match series {
            Ok(series) => series,
            Err(reason) => {
                progress.on_skipped(instrument, &reason);
                entries.push(InstrumentEntry {
                    instrument: instrument.clone(),
                    status: InstrumentStatus::Skipped {
                        reason: reason.clone(),
                    },
                });
                skipped.push(SkippedInstrument {
                    instrument: instrument.clone(),
                    reason,
                });
                continue;
            }
        };

        let analysis = pipeline.analyze(&series);
        let table = AnomalyTable::from_analysis(&analysis);

        let csv_path = out.join(format!("{instrument}_anomalies.csv"));
        write_anomaly_csv(&csv_path, &table)?;
        let mut files = vec![csv_path];

        if let Some(renderer) = renderer {
            let chart_path = out.join(format!("{instrument}_chart.{}", renderer.extension()));
            match renderer.render(&analysis, &chart_path) {
                Ok(()) => files.push(chart_path),
                Err(e) => warn!(%instrument, error = %e, "chart not rendered"),
            }
        }

        entries.push(InstrumentEntry {
            instrument: instrument.clone(),
            status: InstrumentStatus::Analyzed {
                sessions: analysis.len(),
                anomalies: table.len(),
                suspects: analysis.suspect_count(),
                spike_thresholds: analysis.spike_thresholds,
                fraud_thresholds: analysis.fraud_thresholds,
                dataset_hash: dataset_hash(&series),
                files: files.iter().map(|f| relative(out, f)).collect(),
            },
        });

        let report = InstrumentReport {
            analysis,
            table,
            files,
        };
        progress.on_complete(&report);
        reports.push(report);
    }

    let global = AnomalyTable::concat(reports.iter().map(|r| &r.table));
    let global_table = if global.is_empty() {
        None
    } else {
        let path = out.join(GLOBAL_TABLE);
        write_anomaly_csv(&path, &global)?;
        Some(relative(out, &path))
    };

    let manifest = RunManifest {
        run_id: config.run_id(),
        timestamp: chrono::Utc::now(),
        start_date: config.start_date,
        end_date: config.end_date,
        source: loader.name().to_string(),
        instruments: entries,
        total_anomalies: global.len(),
        global_table,
    };
    let manifest_path = out.join(MANIFEST);
    write_manifest(&manifest_path, &manifest)?;

    let summary = ScanSummary {
        reports,
        skipped,
        global,
        manifest,
        manifest_path,
    };
    progress.on_finished(&summary);
    Ok(summary)
}

fn relative(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
