//! Indicator Engine: raw series in, one `IndicatorRecord` per session out.

use crate::domain::{IndicatorRecord, PricePoint, Series};
use crate::indicators::{
    GapOpen, Indicator, IndicatorValues, Macd, MacdLine, PctChange, Rsi, Sma, Volatility,
    VolumeRatio,
};

/// Rolling window length, in sessions, of every windowed indicator.
pub const WINDOW: usize = 14;

/// Column names of the standard indicator set.
pub mod columns {
    pub const SMA: &str = "sma_14";
    pub const PCT_CHANGE: &str = "pct_change";
    pub const RSI: &str = "rsi_14";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const VOLATILITY: &str = "volatility_14";
    pub const GAP_OPEN: &str = "gap_open";
    pub const VOL_SMA: &str = "vol_sma_14";
    pub const VOLUME_RATIO: &str = "volume_to_vol_sma_14";
}

/// Computes a fixed set of indicators over a series.
pub struct IndicatorEngine {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorEngine {
    pub fn new(indicators: Vec<Box<dyn Indicator>>) -> Self {
        Self { indicators }
    }

    /// SMA/RSI/volatility/volume ratio over 14 sessions, MACD 12/26/9,
    /// close-to-close change and opening gap.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Sma::new(WINDOW)),
            Box::new(PctChange),
            Box::new(Rsi::new(WINDOW)),
            Box::new(Macd::standard(MacdLine::Macd)),
            Box::new(Macd::standard(MacdLine::Signal)),
            Box::new(Volatility::new(WINDOW)),
            Box::new(GapOpen),
            Box::new(Sma::volume(WINDOW)),
            Box::new(VolumeRatio::new(WINDOW)),
        ])
    }

    /// Number of leading sessions without a full set of indicators.
    pub fn warmup(&self) -> usize {
        self.indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
    }

    /// Compute every indicator column once.
    pub fn precompute(&self, points: &[PricePoint]) -> IndicatorValues {
        let mut values = IndicatorValues::new();
        for indicator in &self.indicators {
            let column = indicator.compute(points);
            debug_assert_eq!(
                column.len(),
                points.len(),
                "indicator '{}' produced {} values for {} sessions",
                indicator.name(),
                column.len(),
                points.len()
            );
            values.insert(indicator.name(), column);
        }
        values
    }

    /// One record per session; an empty series gives an empty vector.
    pub fn compute(&self, series: &Series) -> Vec<IndicatorRecord> {
        let values = self.precompute(series.points());
        (0..series.len())
            .map(|i| IndicatorRecord {
                sma14: values.defined(columns::SMA, i),
                pct_change: values.defined(columns::PCT_CHANGE, i),
                rsi14: values.defined(columns::RSI, i),
                macd: values.defined(columns::MACD, i),
                macd_signal: values.defined(columns::MACD_SIGNAL, i),
                volatility14: values.defined(columns::VOLATILITY, i),
                gap_open: values.defined(columns::GAP_OPEN, i),
                vol_sma14: values.defined(columns::VOL_SMA, i),
                volume_to_vol_sma: values.defined(columns::VOLUME_RATIO, i),
            })
            .collect()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::standard()
    }
}
