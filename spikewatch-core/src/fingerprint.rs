//! Dataset fingerprinting.
//!
//! A BLAKE3 digest over the instrument id and every OHLCV value lets a run
//! manifest say exactly which data produced its reports.

use crate::domain::Series;

pub fn dataset_hash(series: &Series) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(series.instrument().as_bytes());
    for point in series.points() {
        hasher.update(point.date.to_string().as_bytes());
        hasher.update(&point.open.to_le_bytes());
        hasher.update(&point.high.to_le_bytes());
        hasher.update(&point.low.to_le_bytes());
        hasher.update(&point.close.to_le_bytes());
        hasher.update(&point.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
