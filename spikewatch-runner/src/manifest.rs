//! Run manifest export (JSON).

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use spikewatch_core::detect::{FraudThresholds, SpikeThresholds};

use crate::export::{write_json, ExportError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InstrumentStatus {
    Analyzed {
        sessions: usize,
        anomalies: usize,
        suspects: usize,
        spike_thresholds: SpikeThresholds,
        fraud_thresholds: FraudThresholds,
        dataset_hash: String,
        files: Vec<PathBuf>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentEntry {
    pub instrument: String,
    #[serde(flatten)]
    pub status: InstrumentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub source: String,
    pub instruments: Vec<InstrumentEntry>,
    pub total_anomalies: usize,
    /// `None` when no instrument produced an anomaly.
    pub global_table: Option<PathBuf>,
}

impl RunManifest {
    pub fn analyzed_count(&self) -> usize {
        self.instruments
            .iter()
            .filter(|e| matches!(e.status, InstrumentStatus::Analyzed { .. }))
            .count()
    }
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<(), ExportError> {
    write_json(path, manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_tagged_and_flattened() {
        let entry = InstrumentEntry {
            instrument: "ZZZZ".into(),
            status: InstrumentStatus::Skipped {
                reason: "symbol not found: ZZZZ".into(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["instrument"], "ZZZZ");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "symbol not found: ZZZZ");
    }

    #[test]
    fn manifest_roundtrip_through_file() {
        let manifest = RunManifest {
            run_id: "abc".into(),
            timestamp: Utc::now(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            source: "synthetic".into(),
            instruments: vec![InstrumentEntry {
                instrument: "SPY".into(),
                status: InstrumentStatus::Analyzed {
                    sessions: 500,
                    anomalies: 3,
                    suspects: 40,
                    spike_thresholds: SpikeThresholds {
                        price: Some(0.05),
                        volume: None,
                    },
                    fraud_thresholds: FraudThresholds {
                        volatility: Some(0.02),
                        macd_abs: Some(1.5),
                    },
                    dataset_hash: "h".into(),
                    files: vec![PathBuf::from("SPY_anomalies.csv")],
                },
            }],
            total_anomalies: 3,
            global_table: Some(PathBuf::from("global_anomalies.csv")),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        write_manifest(&path, &manifest).unwrap();
        let back: RunManifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.instruments, manifest.instruments);
        assert_eq!(back.analyzed_count(), 1);
        assert_eq!(back.total_anomalies, 3);
    }
}
