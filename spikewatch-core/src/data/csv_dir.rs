//! Series loader over a directory of `<ID>.csv` files.
//!
//! Each file has the header `date,open,high,low,close,volume`, one row per
//! session. Rows are sorted by date and filtered to the requested range.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::provider::{DataError, DataSource, SeriesLoader};
use crate::domain::{PricePoint, Series};

#[derive(Debug, Clone)]
pub struct CsvDirLoader {
    dir: PathBuf,
}

impl CsvDirLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, instrument: &str) -> PathBuf {
        self.dir.join(format!("{instrument}.csv"))
    }
}

/// Read every row of a price CSV.
pub fn read_price_csv(path: &Path) -> Result<Vec<PricePoint>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    reader
        .deserialize()
        .collect::<Result<Vec<PricePoint>, _>>()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

impl SeriesLoader for CsvDirLoader {
    fn name(&self) -> &str {
        "csv_dir"
    }

    fn source(&self) -> DataSource {
        DataSource::Csv
    }

    fn load(&self, instrument: &str, start: NaiveDate, end: NaiveDate) -> Result<Series, DataError> {
        let path = self.path_for(instrument);
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: instrument.to_string(),
            });
        }

        let mut points = read_price_csv(&path)?;
        let total = points.len();
        points.retain(|p| p.date >= start && p.date <= end);
        points.sort_by_key(|p| p.date);
        debug!(instrument, path = %path.display(), total, kept = points.len(), "read price csv");

        Ok(Series::new(instrument, points)?)
    }
}
