//! Renderer: a line chart of close prices with detected spikes.
//!
//! Close as a solid line, the 14-session SMA as a dashed overlay, combined
//! price+volume spikes as filled magenta dots and price-only spikes as red
//! dots. Dates map to day offsets from the first session.

use std::error::Error;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use spikewatch_core::domain::AnomalyKind;
use spikewatch_core::InstrumentAnalysis;

use crate::export::ExportError;

const SMA_COLOR: RGBColor = RGBColor(255, 140, 0);
/// Pixels.
const DASH_LENGTH: u32 = 10;
const DASH_GAP: u32 = 6;

pub trait ChartRenderer {
    /// File extension of the produced image, without the dot.
    fn extension(&self) -> &str;

    fn render(&self, analysis: &InstrumentAnalysis, path: &Path) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
        }
    }
}

pub fn caption(instrument: &str) -> String {
    format!("{instrument} - price spike detection")
}

impl ChartRenderer for SvgChartRenderer {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, analysis: &InstrumentAnalysis, path: &Path) -> Result<(), ExportError> {
        draw(analysis, path, (self.width, self.height)).map_err(|e| ExportError::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn draw(
    analysis: &InstrumentAnalysis,
    path: &Path,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let sessions = &analysis.sessions;
    let (Some(first), Some(last)) = (sessions.first(), sessions.last()) else {
        return Err("series has no sessions".into());
    };

    let origin = first.point.date;
    let offset = |d: NaiveDate| (d - origin).num_days();
    let x_max = offset(last.point.date).max(1);

    let (lo, hi) = sessions.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
        (lo.min(s.point.close), hi.max(s.point.close))
    });
    let pad = ((hi - lo) * 0.05).max(hi.abs() * 0.01).max(1e-6);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption(&analysis.instrument), ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0i64..x_max, (lo - pad)..(hi + pad))?;

    let date_label = |d: &i64| (origin + Duration::days(*d)).format("%Y-%m-%d").to_string();
    chart
        .configure_mesh()
        .x_labels(10)
        .x_label_formatter(&date_label)
        .x_desc("date")
        .y_desc("close")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            sessions.iter().map(|s| (offset(s.point.date), s.point.close)),
            &BLUE,
        ))?
        .label("close")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    let sma: Vec<(i64, f64)> = sessions
        .iter()
        .filter_map(|s| s.indicators.sma14.map(|v| (offset(s.point.date), v)))
        .collect();
    chart
        .draw_series(DashedLineSeries::new(
            sma,
            DASH_LENGTH,
            DASH_GAP,
            SMA_COLOR.stroke_width(2),
        ))?
        .label("SMA 14")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], SMA_COLOR.stroke_width(2)));

    let spikes = |kind: AnomalyKind| -> Vec<(i64, f64)> {
        sessions
            .iter()
            .filter(|s| s.anomaly.kind == kind)
            .map(|s| (offset(s.point.date), s.point.close))
            .collect()
    };

    chart
        .draw_series(
            spikes(AnomalyKind::Both)
                .into_iter()
                .map(|p| Circle::new(p, 6, MAGENTA.filled())),
        )?
        .label("price + volume spike")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, MAGENTA.filled()));

    chart
        .draw_series(
            spikes(AnomalyKind::Price)
                .into_iter()
                .map(|p| Circle::new(p, 5, RED.filled())),
        )?
        .label("price spike")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
