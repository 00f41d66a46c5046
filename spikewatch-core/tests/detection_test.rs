//! End-to-end detection scenarios over hand-built series.

use chrono::NaiveDate;
use spikewatch_core::domain::{AnomalyKind, Direction, FraudSuspicion, PricePoint, Series};
use spikewatch_core::Pipeline;

fn series(closes: &[f64], volumes: &[u64]) -> Series {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let points = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume,
            }
        })
        .collect();
    Series::new("TEST", points).unwrap()
}

#[test]
fn tenfold_jump_is_an_up_price_spike() {
    let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 2) as f64).collect();
    closes[15] = 1010.0;
    let volumes: Vec<u64> = (0..20).map(|i| if i % 2 == 0 { 1000 } else { 100 }).collect();

    let analysis = Pipeline::default().analyze(&series(&closes, &volumes));

    let jump = &analysis.sessions[15];
    assert!(jump.anomaly.price_spike);
    assert!(!jump.anomaly.volume_spike);
    assert_eq!(jump.anomaly.kind, AnomalyKind::Price);
    assert_eq!(jump.anomaly.direction, Some(Direction::Up));

    // The fall back to 100 is large too, but smaller than the 3σ cut-off.
    assert!(!analysis.sessions[16].anomaly.price_spike);
    assert_eq!(analysis.anomaly_count(), 1);
    assert!(analysis.spike_thresholds.price.unwrap() > 0.0);
}

#[test]
fn flat_series_has_no_anomalies() {
    let closes = vec![50.0; 30];
    let volumes = vec![1000; 30];
    let analysis = Pipeline::default().analyze(&series(&closes, &volumes));

    assert_eq!(analysis.anomaly_count(), 0);
    assert_eq!(analysis.spike_thresholds.price, Some(0.0));
    for session in &analysis.sessions {
        assert_eq!(session.anomaly.kind, AnomalyKind::None);
        assert_eq!(session.anomaly.direction, None);
        assert_eq!(session.indicators.macd, Some(0.0));
    }
    // Flat closes: RSI sits at 50, nothing else is extreme.
    assert_eq!(analysis.suspect_count(), 0);
}

#[test]
fn short_series_has_no_windowed_indicators() {
    let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let volumes = vec![1000; 10];
    let analysis = Pipeline::default().analyze(&series(&closes, &volumes));

    assert_eq!(analysis.len(), 10);
    for session in &analysis.sessions {
        assert!(session.indicators.sma14.is_none());
        assert!(session.indicators.rsi14.is_none());
        assert!(session.indicators.volatility14.is_none());
        assert_eq!(session.anomaly.fraud, FraudSuspicion::Normal);
    }
}

#[test]
fn single_session_is_never_flagged() {
    let analysis = Pipeline::default().analyze(&series(&[42.0], &[10]));
    assert_eq!(analysis.len(), 1);
    assert_eq!(analysis.anomaly_count(), 0);
    assert!(analysis.sessions[0].indicators.pct_change.is_none());
    assert_eq!(analysis.spike_thresholds.price, None);
}

#[test]
fn heavy_volume_crash_is_both() {
    // Level drop 100 -> 60 on twentyfold volume, quiet alternating moves otherwise.
    let closes: Vec<f64> = (0..40)
        .map(|i| {
            let base = if i < 25 { 100.0 } else { 60.0 };
            base * (1.0 + 0.01 * (i % 2) as f64)
        })
        .collect();
    let mut volumes = vec![1000u64; 40];
    volumes[25] = 20_000;

    let analysis = Pipeline::default().analyze(&series(&closes, &volumes));
    let crash = &analysis.sessions[25];
    assert_eq!(crash.anomaly.kind, AnomalyKind::Both);
    assert_eq!(crash.anomaly.direction, Some(Direction::Down));
    assert_eq!(analysis.anomaly_count(), 1);
}
