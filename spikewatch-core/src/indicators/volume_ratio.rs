//! Volume relative to its own simple moving average.
//!
//! ratio[t] = volume[t] / SMA(volume, period)[t]; undefined during warmup
//! and when the average is zero.

use super::indicator::Indicator;
use super::sma::Sma;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct VolumeRatio {
    avg: Sma,
    name: String,
}

impl VolumeRatio {
    pub fn new(period: usize) -> Self {
        Self {
            avg: Sma::volume(period),
            name: format!("volume_to_vol_sma_{period}"),
        }
    }
}

impl Indicator for VolumeRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.avg.lookback()
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        self.avg
            .compute(points)
            .iter()
            .zip(points)
            .map(|(&avg, p)| {
                if avg.is_nan() || avg == 0.0 {
                    f64::NAN
                } else {
                    p.volume as f64 / avg
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points, DEFAULT_EPSILON};

    #[test]
    fn ratio_of_surge() {
        let mut points = make_points(&[10.0; 4]);
        for p in points.iter_mut() {
            p.volume = 100;
        }
        points[3].volume = 400;
        let result = VolumeRatio::new(4).compute(&points);
        assert!(result[2].is_nan());
        // avg = 700/4 = 175
        assert_approx(result[3], 400.0 / 175.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_average_is_undefined() {
        let mut points = make_points(&[10.0; 3]);
        for p in points.iter_mut() {
            p.volume = 0;
        }
        let result = VolumeRatio::new(3).compute(&points);
        assert!(result[2].is_nan());
    }
}
