//! Window helpers shared by the rolling indicators.
//!
//! A window containing any NaN yields NaN, so undefined values never leak
//! into a defined result.

/// Mean over the trailing `window` values, NaN until the window is full.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Sample (n-1) standard deviation over the trailing `window` values.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<f64> {
    if window < 2 {
        return vec![f64::NAN; values.len()];
    }
    rolling(values, window, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let ss: f64 = w.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    })
}

fn rolling(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }
    for i in (window - 1)..n {
        let w = &values[(i + 1 - window)..=i];
        if w.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(w);
    }
    result
}
