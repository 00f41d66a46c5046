//! Deterministic synthetic sessions for offline runs and demos.
//!
//! A random walk from 100.0 seeded by the BLAKE3 hash of the instrument id, so
//! the same id always yields the same series. Weekends are skipped. Rare shock
//! sessions (a large move on heavy volume) give the detectors something to find.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataSource, SeriesLoader};
use crate::domain::{PricePoint, Series};

#[derive(Debug, Clone)]
pub struct SyntheticLoader {
    pub start_price: f64,
    pub daily_range: f64,
    pub shock_probability: f64,
}

impl Default for SyntheticLoader {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            daily_range: 0.03,
            shock_probability: 0.01,
        }
    }
}

impl SyntheticLoader {
    pub fn generate(&self, instrument: &str, start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
        let seed: [u8; 32] = *blake3::hash(instrument.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut points = Vec::new();
        let mut price = self.start_price;

        for date in start.iter_days().take_while(|d| *d <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let shock = rng.gen_bool(self.shock_probability);
            let daily_return: f64 = if shock {
                let size = rng.gen_range(0.15..0.30);
                if rng.gen_bool(0.5) {
                    size
                } else {
                    -size
                }
            } else {
                rng.gen_range(-self.daily_range..self.daily_range)
            };

            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let mut volume = rng.gen_range(500_000..5_000_000u64);
            if shock {
                volume *= 8;
            }

            points.push(PricePoint {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
        }

        points
    }
}

impl SeriesLoader for SyntheticLoader {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn load(&self, instrument: &str, start: NaiveDate, end: NaiveDate) -> Result<Series, DataError> {
        Ok(Series::new(instrument, self.generate(instrument, start, end))?)
    }
}
