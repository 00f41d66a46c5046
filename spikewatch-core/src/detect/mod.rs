//! Session labelling: statistical spikes and the fraud heuristic.
//!
//! Both detectors derive their thresholds from the instrument's own
//! whole-series statistics. A rule whose input or threshold is undefined
//! never fires.

pub mod fraud;
pub mod spike;

pub use fraud::{FraudRules, FraudThresholds};
pub use spike::{SpikeDetector, SpikeFlags, SpikeThresholds};

/// `value > threshold`, false when either side is undefined.
pub(crate) fn exceeds(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(v), Some(t)) if v > t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exceeds_requires_both_sides() {
        assert!(exceeds(Some(2.0), Some(1.0)));
        assert!(!exceeds(Some(1.0), Some(1.0)));
        assert!(!exceeds(None, Some(0.0)));
        assert!(!exceeds(Some(5.0), None));
    }
}
