//! Exponential Moving Average (EMA), recursive form.
//!
//! EMA[0] = x[0]; EMA[t] = EMA[t-1] + alpha * (x[t] - EMA[t-1]),
//! alpha = 2 / (span + 1). No warmup: defined from the first session.
//! The increment form keeps a constant input exactly constant.

/// Recursive EMA of an arbitrary series, seeded with its first value.
///
/// A NaN input taints every later value.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    result[0] = prev;

    for i in 1..n {
        if prev.is_nan() || values[i].is_nan() {
            return result;
        }
        prev += alpha * (values[i] - prev);
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn span_1_equals_input() {
        let result = ema_of_series(&[100.0, 200.0, 300.0], 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn span_3_known_values() {
        // alpha = 0.5, seeded with the first value
        // EMA = 10, 10.5, 11.25, 12.125
        let result = ema_of_series(&[10.0, 11.0, 12.0, 13.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result[3], 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_input_stays_exact() {
        let result = ema_of_series(&[0.1; 50], 26);
        assert!(result.iter().all(|v| *v == 0.1));
    }

    #[test]
    fn nan_taints_rest() {
        let result = ema_of_series(&[1.0, 2.0, f64::NAN, 4.0], 3);
        assert!(!result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn empty_input() {
        assert!(ema_of_series(&[], 12).is_empty());
    }
}
