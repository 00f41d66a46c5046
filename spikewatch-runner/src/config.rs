//! Serializable scan configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use spikewatch_core::data::{
    CircuitBreaker, CsvDirLoader, DataError, SeriesLoader, SyntheticLoader, YahooLoader,
};

/// Unique identifier for a scan (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("cannot build loader: {0}")]
    Loader(#[from] DataError),
}

/// Where series come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Yahoo,
    Csv { dir: PathBuf },
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render an SVG chart per analysed instrument.
    pub charts: bool,
    /// Rows per instrument in the console summary.
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            charts: true,
            top_n: 10,
        }
    }
}

/// Everything needed to reproduce a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Instruments in processing order.
    pub instruments: Vec<String>,
    /// Inclusive.
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub output_dir: PathBuf,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            instruments: ["NVDA", "AAPL", "MSFT", "TSLA"]
                .into_iter()
                .map(String::from)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            output_dir: PathBuf::from("exports"),
            source: SourceConfig::Yahoo,
            output: OutputConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid("instrument list is empty".into()));
        }
        if let Some(blank) = self.instruments.iter().find(|id| id.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "blank instrument identifier {blank:?}"
            )));
        }
        // Ids become file stems under output_dir.
        if let Some(bad) = self.instruments.iter().find(|id| !is_file_safe(id)) {
            return Err(ConfigError::Invalid(format!(
                "instrument identifier {bad:?} cannot name an output file"
            )));
        }
        if self.start_date > self.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }

    /// Deterministic hash of the configuration.
    ///
    /// Two scans with identical configs share a RunId.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn build_loader(&self) -> Result<Box<dyn SeriesLoader>, ConfigError> {
        Ok(match &self.source {
            SourceConfig::Yahoo => {
                let breaker = Arc::new(CircuitBreaker::for_provider());
                Box::new(YahooLoader::new(breaker)?)
            }
            SourceConfig::Csv { dir } => Box::new(CsvDirLoader::new(dir.clone())),
            SourceConfig::Synthetic => Box::new(SyntheticLoader::default()),
        })
    }
}

fn is_file_safe(id: &str) -> bool {
    !id.contains(['/', '\\', '\0']) && !id.contains("..")
}
