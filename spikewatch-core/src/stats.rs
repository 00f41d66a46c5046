//! Whole-series descriptive statistics.
//!
//! Non-finite inputs are skipped. Standard deviations are sample (n-1)
//! deviations and are undefined below two observations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
}

impl Summary {
    /// Summarise the finite values of an iterator; `None` if there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = if values.len() < 2 {
            None
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((ss / (n - 1.0)).sqrt())
        };

        Some(Self {
            count: values.len(),
            mean,
            std_dev,
        })
    }

    /// `mean + k * std_dev`, undefined when the deviation is.
    pub fn upper_band(&self, k: f64) -> Option<f64> {
        self.std_dev.map(|sd| self.mean + k * sd)
    }
}

/// Sample standard deviation of the finite values.
pub fn sample_std_dev<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    Summary::of(values).and_then(|s| s.std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_known_values() {
        let s = Summary::of([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert!((s.std_dev.unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn skips_nan() {
        let s = Summary::of([f64::NAN, 1.0, 3.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 2.0);
    }

    #[test]
    fn single_value_has_no_deviation() {
        let s = Summary::of([7.0]).unwrap();
        assert_eq!(s.std_dev, None);
        assert_eq!(s.upper_band(2.0), None);
    }

    #[test]
    fn empty_is_none() {
        assert!(Summary::of(Vec::<f64>::new()).is_none());
        assert_eq!(sample_std_dev([f64::NAN]), None);
    }

    #[test]
    fn constant_has_zero_deviation() {
        assert_eq!(sample_std_dev([3.0; 10]), Some(0.0));
    }

    #[test]
    fn upper_band() {
        let s = Summary::of([1.0, 3.0]).unwrap();
        // mean 2, sample std sqrt(2)
        assert!((s.upper_band(2.0).unwrap() - (2.0 + 2.0 * 2.0_f64.sqrt())).abs() < 1e-12);
    }
}
