//! Series loaders: Yahoo Finance, a local CSV directory, and synthetic data.

pub mod circuit_breaker;
pub mod csv_dir;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_dir::{read_price_csv, CsvDirLoader};
pub use provider::{DataError, DataSource, SeriesLoader};
pub use synthetic::SyntheticLoader;
pub use yahoo::YahooLoader;
