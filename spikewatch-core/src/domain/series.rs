//! Series: the ordered session history of one instrument.

use super::price_point::PricePoint;
use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised while assembling a series from loader output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("{instrument}: dates not strictly increasing at {date}")]
    NotChronological { instrument: String, date: NaiveDate },

    #[error("{instrument}: non-positive or missing price on {date}")]
    InvalidPrice { instrument: String, date: NaiveDate },
}

/// Chronologically ordered sessions for one instrument.
///
/// Dates are strictly increasing. Missing calendar days are simply absent;
/// rolling windows count sessions, not days.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    instrument: String,
    points: Vec<PricePoint>,
}

impl Series {
    /// Validate and wrap loader output.
    pub fn new(instrument: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        let instrument = instrument.into();

        for (i, point) in points.iter().enumerate() {
            if !point.has_positive_prices() {
                return Err(SeriesError::InvalidPrice {
                    instrument,
                    date: point.date,
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(SeriesError::NotChronological {
                    instrument,
                    date: point.date,
                });
            }
        }

        Ok(Self { instrument, points })
    }

    /// A series with no sessions ("no data" for this instrument).
    pub fn empty(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            points: Vec::new(),
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
