//! Scatter plot rendering using plotters (SVG output)
//!
//! The SVG backend needs no system fonts, so plots render the same on
//! headless machines.

use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::RangedCoordusize;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::RenderError;
use crate::metrics::MetricSeries;

const MARKER_RADIUS: i32 = 4;
const MAX_X_LABELS: usize = 20;

/// Render `series` as a scatter plot of value against record index.
///
/// An empty series produces an empty chart with the same axes and caption.
pub fn plot(
    series: &MetricSeries,
    title: &str,
    path: &Path,
    size: (u32, u32),
) -> Result<(), RenderError> {
    let start_time = Instant::now();
    let len = series.len();
    let draw_error = |e: &dyn std::fmt::Display| RenderError::Draw {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_error(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_axis(len), y_range(series.max()))
        .map_err(|e| draw_error(&e))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_label_count(len))
        .x_label_formatter(&|x| index_label(x, len))
        .y_desc(title)
        .draw()
        .map_err(|e| draw_error(&e))?;

    chart
        .draw_series(points(series).map(|point| {
            Circle::new(point, MARKER_RADIUS, BLUE.filled())
        }))
        .map_err(|e| draw_error(&e))?;
    chart
        .draw_series(points(series).map(|point| {
            Circle::new(point, MARKER_RADIUS, ShapeStyle::from(&BLACK))
        }))
        .map_err(|e| draw_error(&e))?;

    root.present().map_err(|e| draw_error(&e))?;

    let render_time = start_time.elapsed();
    info!(
        action = "render",
        component = "scatter_plot",
        title = title,
        point_count = len,
        file_path = ?path,
        duration_ms = render_time.as_millis(),
        "Scatter plot written"
    );
    Ok(())
}

fn points(series: &MetricSeries) -> impl Iterator<Item = (SegmentValue<usize>, u64)> + '_ {
    series
        .values()
        .iter()
        .enumerate()
        .map(|(index, &value)| (SegmentValue::CenterOf(index), value))
}

// One segment per record, markers and labels sit at segment centers.
fn x_axis(len: usize) -> SegmentedCoord<RangedCoordusize> {
    (0..len.saturating_sub(1)).into_segmented()
}

fn x_label_count(len: usize) -> usize {
    len.clamp(1, MAX_X_LABELS)
}

fn index_label(value: &SegmentValue<usize>, len: usize) -> String {
    match value {
        SegmentValue::CenterOf(index) if *index < len => index.to_string(),
        _ => String::new(),
    }
}

fn y_range(max: Option<u64>) -> Range<u64> {
    let top = (max.unwrap_or(0) as f64 * 1.1).ceil() as u64;
    0..top.max(1)
}
