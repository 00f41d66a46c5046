//! Table Exporter: anomaly tables as CSV.
//!
//! Column order is fixed. `pct_change` is the percentage string with two
//! decimals (`"-12.34 %"`); undefined indicator values are empty cells.
//! The header is written even when the table has no rows.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use spikewatch_core::domain::{AnomalyKind, Direction, FraudSuspicion};

use crate::report::{AnomalyRow, AnomalyTable};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

pub const COLUMNS: [&str; 16] = [
    "date",
    "ticker",
    "close",
    "volume",
    "pct_change",
    "anomaly",
    "direction",
    "fraud_suspicion",
    "sma_14",
    "rsi_14",
    "macd",
    "macd_signal",
    "volatility_14",
    "gap_open",
    "vol_sma_14",
    "volume_to_vol_sma",
];

/// One CSV line, in `COLUMNS` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRow {
    pub date: NaiveDate,
    pub ticker: String,
    pub close: f64,
    pub volume: u64,
    pub pct_change: String,
    pub anomaly: AnomalyKind,
    pub direction: Option<Direction>,
    pub fraud_suspicion: FraudSuspicion,
    pub sma_14: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub volatility_14: Option<f64>,
    pub gap_open: Option<f64>,
    pub vol_sma_14: Option<f64>,
    pub volume_to_vol_sma: Option<f64>,
}

impl From<&AnomalyRow> for ExportedRow {
    fn from(row: &AnomalyRow) -> Self {
        let ind = &row.indicators;
        Self {
            date: row.date,
            ticker: row.ticker.clone(),
            close: row.close,
            volume: row.volume,
            pct_change: row.pct_change.map(format_pct).unwrap_or_default(),
            anomaly: row.kind,
            direction: row.direction,
            fraud_suspicion: row.fraud,
            sma_14: ind.sma14,
            rsi_14: ind.rsi14,
            macd: ind.macd,
            macd_signal: ind.macd_signal,
            volatility_14: ind.volatility14,
            gap_open: ind.gap_open,
            vol_sma_14: ind.vol_sma14,
            volume_to_vol_sma: ind.volume_to_vol_sma,
        }
    }
}

/// A fractional change as a percentage string: `0.1234` → `"12.34 %"`.
pub fn format_pct(change: f64) -> String {
    format!("{:.2} %", change * 100.0)
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> ExportError + '_ {
    move |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a table to `path`, replacing any existing file.
pub fn write_anomaly_csv(path: &Path, table: &AnomalyTable) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error(path))?;

    wtr.write_record(COLUMNS).map_err(csv_error(path))?;
    for row in table.rows() {
        wtr.serialize(ExportedRow::from(row))
            .map_err(csv_error(path))?;
    }
    wtr.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read back a table written by [`write_anomaly_csv`].
pub fn read_anomaly_csv(path: &Path) -> Result<Vec<ExportedRow>, ExportError> {
    let mut rdr = csv::Reader::from_path(path).map_err(csv_error(path))?;
    rdr.deserialize()
        .collect::<Result<Vec<ExportedRow>, _>>()
        .map_err(csv_error(path))
}

/// Pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
