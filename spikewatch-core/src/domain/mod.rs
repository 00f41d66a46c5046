//! Domain types for SpikeWatch

pub mod price_point;
pub mod records;
pub mod series;

pub use price_point::{PriceField, PricePoint};
pub use records::{
    AnomalyKind, AnomalyRecord, Direction, FraudSuspicion, FraudTriggers, IndicatorRecord,
    SessionRecord,
};
pub use series::{Series, SeriesError};
