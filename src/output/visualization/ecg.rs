//! ECG chart rendering
//!
//! Draws a [`SampleSeries`] as a trace (amplitude vs. paper position) over
//! an ECG paper grid, on any plotters drawing backend.
//!
//! A chart is made of pages stacked vertically, each `config.width` by
//! `config.height` pixels, each holding one or more rows laid out by a
//! [`StripPlan`]. In the default continuous mode that is a single page with
//! a single row.
//!
//! Drawing order per row is grid, trace, then text. The text layer needs a
//! system font; when none is available the failure is logged and the chart is
//! kept without labels instead of failing the whole render.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ecg_graph::output::visualization::{render_rgb, render_svg_pages, PlotConfig};
//!
//! let image = render_rgb(&series, &PlotConfig::default())?;             // raster export
//! let pages = render_svg_pages(&series, &PlotConfig::rhythm_strip())?;  // one SVG per PDF page
//! ```

use std::ops::Range;

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::PlotConfig;
use super::grid::{row_x_range, GridLine, GridWeight, PaperLayout, StripPlan};
use crate::error::{EcgGraphError, Result};
use crate::signal::SampleSeries;

/// Upper bound on pixels in one rendered canvas
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

// =================================================================================================
// Public API
// =================================================================================================

/// Render every page into one RGB image, `config.width` wide and
/// `config.height` tall per page
///
/// # Errors
///
/// - [`EcgGraphError::InvalidSetting`] for an unusable frequency or strip setting
/// - [`EcgGraphError::Render`] for a zero-sized or oversized chart, or a backend failure
pub fn render_rgb(series: &SampleSeries, config: &PlotConfig) -> Result<RgbImage> {
    let (width, height) = canvas_size(series, config)?;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let backend = BitMapBackend::with_buffer(&mut buffer, (width, height));
        draw_ecg(backend, series, config)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| EcgGraphError::Render("pixel buffer does not match chart size".to_string()))
}

/// Render every page into one SVG document
pub fn render_svg(series: &SampleSeries, config: &PlotConfig) -> Result<String> {
    let size = canvas_size(series, config)?;
    let mut svg = String::new();

    {
        let backend = SVGBackend::with_string(&mut svg, size);
        draw_ecg(backend, series, config)?;
    }

    Ok(svg)
}

/// Render one SVG document per page, each `config.width × config.height`
pub fn render_svg_pages(series: &SampleSeries, config: &PlotConfig) -> Result<Vec<String>> {
    canvas_size(series, config)?;
    let plan = StripPlan::new(series.len(), config);

    (0..plan.page_count())
        .map(|page| {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                    .into_drawing_area();
                root.fill(&config.background).map_err(render_error)?;
                draw_page(&root, series, &plan, page, config)?;
                root.present().map_err(render_error)?;
            }
            Ok(svg)
        })
        .collect()
}

/// Draw the ECG chart on the given backend and present it
///
/// The backend should be `config.width` wide and `config.height` tall per page.
pub fn draw_ecg<DB: DrawingBackend>(
    backend: DB,
    series: &SampleSeries,
    config: &PlotConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    config.validate()?;
    let plan = StripPlan::new(series.len(), config);
    log::debug!(
        "drawing {} samples in {} strip(s) on {} page(s)",
        series.len(),
        plan.strip_count(),
        plan.page_count()
    );

    let root = backend.into_drawing_area();
    root.fill(&config.background).map_err(render_error)?;

    for (page, area) in root.split_evenly((plan.page_count(), 1)).iter().enumerate() {
        draw_page(area, series, &plan, page, config)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}

// =================================================================================================
// Pages and rows
// =================================================================================================

fn draw_page<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &SampleSeries,
    plan: &StripPlan,
    page: usize,
    config: &PlotConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let plot_area = if config.show_labels {
        titled_area(area, &config.title)
    } else {
        area.clone()
    };

    let y_range = config.amplitude_range.resolve(series.min(), series.max());
    let rows: Vec<Range<usize>> = plan.page_rows(page).collect();
    let slots = plot_area.split_evenly((rows.len(), 1));
    let style = RowStyle::new(config, plan.is_strips());

    for (index, (row, slot)) in rows.iter().zip(slots.iter()).enumerate() {
        let last = index + 1 == rows.len();
        draw_row(slot, series, row, y_range, config, style, last)?;
    }
    Ok(())
}

/// Margins and label areas of one row
#[derive(Clone, Copy)]
struct RowStyle {
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
    y_labels: usize,
}

impl RowStyle {
    fn new(config: &PlotConfig, strips: bool) -> Self {
        match (config.show_labels, strips) {
            (false, false) => Self { margin: 15, x_label_area: 0, y_label_area: 0, y_labels: 0 },
            (false, true) => Self { margin: 4, x_label_area: 0, y_label_area: 0, y_labels: 0 },
            (true, false) => Self { margin: 15, x_label_area: 45, y_label_area: 60, y_labels: 10 },
            (true, true) => Self { margin: 4, x_label_area: 25, y_label_area: 60, y_labels: 3 },
        }
    }
}

fn draw_row<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &SampleSeries,
    row: &Range<usize>,
    y_range: (f64, f64),
    config: &PlotConfig,
    style: RowStyle,
    last_row: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let layout = PaperLayout::new(row_x_range(row), y_range, config);
    let (x_lo, x_hi) = layout.x_range;
    let (y_lo, y_hi) = layout.y_range;

    let mut chart = ChartBuilder::on(area)
        .margin(style.margin)
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(render_error)?;

    // ── 1. Paper grid: minor first so major lines stay on top ───────────────
    let vertical = layout.vertical_lines();
    let horizontal = layout.horizontal_lines();

    for weight in [GridWeight::Minor, GridWeight::Major] {
        let stroke = grid_style(config, weight);

        chart
            .draw_series(
                select(&vertical, weight)
                    .map(|x| PathElement::new(vec![(x, y_lo), (x, y_hi)], stroke)),
            )
            .map_err(render_error)?;

        chart
            .draw_series(
                select(&horizontal, weight)
                    .map(|y| PathElement::new(vec![(x_lo, y), (x_hi, y)], stroke)),
            )
            .map_err(render_error)?;
    }

    // ── 2. Waveform ─────────────────────────────────────────────────────────
    chart
        .draw_series(LineSeries::new(
            row_points(series, row, config.lead_in_samples, y_range),
            ShapeStyle::from(&config.trace_color).stroke_width(config.trace_width),
        ))
        .map_err(render_error)?;

    // ── 3. Axes and labels ──────────────────────────────────────────────────
    if config.show_labels {
        let x_format = |x: &f64| format!("{:.0}", x);
        let y_format = |y: &f64| format!("{:.1}", y);

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .y_desc(&config.ylabel)
            .y_labels(style.y_labels)
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .label_style(("sans-serif", 14).into_font())
            .axis_desc_style(("sans-serif", 16).into_font());
        if last_row {
            mesh.x_desc(&config.xlabel);
        }

        if let Err(err) = mesh.draw() {
            log::warn!("ECG chart axis labels skipped: {err}");
        }
    }

    Ok(())
}

/// Samples falling in `row`, placed after the lead-in and clamped to the band
fn row_points<'a>(
    series: &'a SampleSeries,
    row: &Range<usize>,
    lead_in: usize,
    (low, high): (f64, f64),
) -> impl Iterator<Item = (f64, f64)> + 'a {
    let start = row.start.saturating_sub(lead_in).min(series.len());
    let end = row.end.saturating_sub(lead_in).min(series.len());

    series.values()[start..end]
        .iter()
        .enumerate()
        .map(move |(offset, &value)| {
            let position = (start + offset).saturating_add(lead_in);
            (position as f64, value.clamp(low, high))
        })
}

// =================================================================================================
// Helpers
// =================================================================================================

/// Pixel size of the whole canvas, after validating the configuration
fn canvas_size(series: &SampleSeries, config: &PlotConfig) -> Result<(u32, u32)> {
    config.validate()?;
    if config.width == 0 || config.height == 0 {
        return Err(EcgGraphError::Render(format!(
            "chart size must be non-zero, got {}x{}",
            config.width, config.height
        )));
    }

    let pages = StripPlan::new(series.len(), config).page_count();
    let height = u32::try_from(pages)
        .ok()
        .and_then(|pages| config.height.checked_mul(pages))
        .filter(|&height| u64::from(config.width) * u64::from(height) <= MAX_CANVAS_PIXELS)
        .ok_or_else(|| {
            EcgGraphError::Render(format!(
                "{pages} page(s) of {}x{} exceed the canvas limit",
                config.width, config.height
            ))
        })?;

    Ok((config.width, height))
}

fn titled_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
) -> DrawingArea<DB, Shift> {
    match root.titled(title, ("sans-serif", 28).into_font()) {
        Ok(area) => area,
        Err(err) => {
            log::warn!("ECG chart title skipped: {err}");
            root.clone()
        }
    }
}

fn grid_style(config: &PlotConfig, weight: GridWeight) -> ShapeStyle {
    match weight {
        GridWeight::Minor => ShapeStyle::from(&config.minor_grid_color)
            .stroke_width(config.minor_grid_width),
        GridWeight::Major => ShapeStyle::from(&config.major_grid_color)
            .stroke_width(config.major_grid_width),
    }
}

fn select(lines: &[GridLine], weight: GridWeight) -> impl Iterator<Item = f64> + '_ {
    lines
        .iter()
        .filter(move |line| line.weight == weight)
        .map(|line| line.value)
}

fn render_error<E: std::error::Error>(err: E) -> EcgGraphError {
    EcgGraphError::Render(err.to_string())
}

// =================================================================================================
// Tests
// =================================================================================================
