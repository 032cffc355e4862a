//! Timeline chart rendering.
//!
//! One horizontal bar per report row, spanning start to end, banded by
//! group. Rendered into an RGB buffer with plotters and encoded as PNG.
//! Failures here are surfaced to the caller as `ExportError::Chart` —
//! the exporter shows the error instead of crashing.

use plotters::prelude::*;
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};

use super::{ExportError, Report};

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 400;

/// Fill colors cycled per group band.
const PALETTE: [RGBColor; 6] = [
    RGBColor(124, 58, 237),
    RGBColor(16, 185, 129),
    RGBColor(6, 182, 212),
    RGBColor(245, 158, 11),
    RGBColor(239, 68, 68),
    RGBColor(59, 130, 246),
];

/// Renders the report timeline as PNG bytes.
pub fn render_timeline(report: &Report) -> Result<Vec<u8>, ExportError> {
    render_timeline_sized(report, CHART_WIDTH, CHART_HEIGHT)
}

pub fn render_timeline_sized(
    report: &Report,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    if report.timeline.is_empty() {
        return Err(ExportError::Chart("no rows in the selected range".into()));
    }

    // Distinct groups in first-seen order become y bands.
    let mut groups: Vec<&str> = Vec::new();
    for row in &report.timeline {
        if !groups.contains(&row.group.as_str()) {
            groups.push(&row.group);
        }
    }

    let (t0, t1) = report.timeline.iter().fold(
        (report.timeline[0].start, report.timeline[0].end),
        |(lo, hi), row| (lo.min(row.start), hi.max(row.end)),
    );
    let span_secs = ((t1 - t0).num_seconds() as f64).max(1.0);

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ExportError::Chart(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_2d(0.0..span_secs, 0.0..groups.len() as f64)
            .map_err(|e| ExportError::Chart(e.to_string()))?;

        for row in &report.timeline {
            let idx = groups
                .iter()
                .position(|g| *g == row.group)
                .unwrap_or_default();
            let band = idx as f64;
            let x0 = (row.start - t0).num_seconds() as f64;
            let x1 = ((row.end - t0).num_seconds() as f64).max(x0 + span_secs / 200.0);
            let color = PALETTE[idx % PALETTE.len()];

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, band + 0.15), (x1, band + 0.85)],
                    color.mix(0.8).filled(),
                )))
                .map_err(|e| ExportError::Chart(e.to_string()))?;
        }

        root.present()
            .map_err(|e| ExportError::Chart(e.to_string()))?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ExportError::Chart("buffer did not fill the image".into()))?;
    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| ExportError::Chart(e.to_string()))?;

    Ok(png_bytes)
}
