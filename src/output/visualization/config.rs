//! Plot configuration for ECG charts
//!
//! [`PlotConfig`] gathers everything that affects how a chart looks: pixel
//! size, labels, colours, and the ECG paper geometry. The defaults reproduce
//! standard clinical paper: 25 mm/s and 10 mm/mV, so one 1 mm minor cell is
//! 0.04 s by 0.1 mV and every fifth line is a heavier major line.
//!
//! By default the whole record is one continuous trace. Setting
//! [`strip_secs`](PlotConfig::strip_secs) cuts it into rhythm strips stacked
//! [`strips_per_page`](PlotConfig::strips_per_page) to a page.

use plotters::prelude::*;

use crate::error::{EcgGraphError, Result};

/// Pink minor gridline colour of standard ECG paper
pub const ECG_MINOR_GRID: RGBColor = RGBColor(250, 205, 205);

/// Red major gridline colour of standard ECG paper
pub const ECG_MAJOR_GRID: RGBColor = RGBColor(232, 120, 120);

/// Largest magnitude an axis limit may take; keeps every span finite
pub const AMPLITUDE_LIMIT: f64 = f64::MAX / 4.0;

/// Most strip rows drawn on one page
pub const MAX_STRIPS_PER_PAGE: usize = 64;

/// Configuration for customizing ECG charts
///
/// # Example
///
/// ```rust
/// use ecg_graph::output::visualization::{AmplitudeRange, PlotConfig};
///
/// let config = PlotConfig::default()
///     .title("Lead II")
///     .size(1200, 400)
///     .record_frequency(500.0)
///     .amplitude_range(AmplitudeRange::Fixed { min: -2.5, max: 2.5 });
///
/// assert_eq!(config.title, "Lead II");
/// assert_eq!(config.scale_label(), "25mm/s, 10mm/mV");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1600)
    pub width: u32,

    /// Image height in pixels (default: 600); the height of one page in strip mode
    pub height: u32,

    /// Chart title (default: "ECG")
    pub title: String,

    /// X-axis description (default: "Sample")
    pub xlabel: String,

    /// Y-axis description (default: "Amplitude (mV)")
    pub ylabel: String,

    /// Paper colour (default: WHITE)
    pub background: RGBColor,

    /// Waveform colour (default: BLACK)
    pub trace_color: RGBColor,

    /// Waveform thickness in pixels (default: 2)
    pub trace_width: u32,

    pub minor_grid_color: RGBColor,
    pub major_grid_color: RGBColor,
    pub minor_grid_width: u32,
    pub major_grid_width: u32,

    /// Sampling frequency of the record in Hz (default: 250)
    ///
    /// Converts the paper's time grid into sample-index units.
    pub record_frequency: f64,

    /// Seconds per minor cell (default: 0.04, i.e. 25 mm/s)
    pub minor_grid_secs: f64,

    /// Millivolts per minor cell (default: 0.1, i.e. 10 mm/mV)
    pub minor_grid_mv: f64,

    /// Minor cells per major cell (default: 5)
    pub major_every: usize,

    /// Vertical axis range (default: auto-fit with a 10% margin)
    pub amplitude_range: AmplitudeRange,

    /// Seconds of record per strip; `None` draws one continuous chart (default)
    pub strip_secs: Option<f64>,

    /// Strips stacked on one page in strip mode (default: 4)
    pub strips_per_page: usize,

    /// Blank samples before the first trace sample (default: 0)
    pub lead_in_samples: usize,

    /// Draw title, axis descriptions and tick labels (default: true)
    pub show_labels: bool,

    /// JPEG encoder quality, 1-100 (default: 90)
    pub jpeg_quality: u8,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            title: "ECG".to_string(),
            xlabel: "Sample".to_string(),
            ylabel: "Amplitude (mV)".to_string(),
            background: WHITE,
            trace_color: BLACK,
            trace_width: 2,
            minor_grid_color: ECG_MINOR_GRID,
            major_grid_color: ECG_MAJOR_GRID,
            minor_grid_width: 1,
            major_grid_width: 2,
            record_frequency: 250.0,
            minor_grid_secs: 0.04,
            minor_grid_mv: 0.1,
            major_every: 5,
            amplitude_range: AmplitudeRange::default(),
            strip_secs: None,
            strips_per_page: 4,
            lead_in_samples: 0,
            show_labels: true,
            jpeg_quality: 90,
        }
    }
}

/// Vertical range of the chart
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AmplitudeRange {
    /// Fit the data's min/max, padded by `margin` times the span on each side
    Auto { margin: f64 },

    /// Fixed limits regardless of the data
    Fixed { min: f64, max: f64 },
}

impl Default for AmplitudeRange {
    fn default() -> Self {
        AmplitudeRange::Auto { margin: 0.1 }
    }
}

impl AmplitudeRange {
    /// Resolve to a non-degenerate `(low, high)` for data spanning `min..=max`
    ///
    /// A flat signal is padded by 10% of its magnitude, or 0.5 if that is
    /// smaller, so a single sample still gets a visible band. Both limits
    /// stay within `±AMPLITUDE_LIMIT`, so `high - low` is always finite.
    pub fn resolve(&self, min: f64, max: f64) -> (f64, f64) {
        let range = match *self {
            AmplitudeRange::Fixed { min: lo, max: hi } if hi > lo => (lo, hi),
            AmplitudeRange::Fixed { min: lo, max: hi } => widen_flat(lo.min(hi)),
            AmplitudeRange::Auto { margin } => {
                let span = max - min;
                if span <= f64::EPSILON * max.abs().max(1.0) {
                    widen_flat(min / 2.0 + max / 2.0)
                } else {
                    let pad = span * margin.max(0.0);
                    (min - pad, max + pad)
                }
            }
        };
        limit_range(range)
    }
}

fn widen_flat(center: f64) -> (f64, f64) {
    let pad = (center.abs() * 0.1).max(0.5);
    (center - pad, center + pad)
}

fn limit_range((lo, hi): (f64, f64)) -> (f64, f64) {
    let lo = if lo.is_nan() { -AMPLITUDE_LIMIT } else { lo.clamp(-AMPLITUDE_LIMIT, AMPLITUDE_LIMIT) };
    let hi = if hi.is_nan() { AMPLITUDE_LIMIT } else { hi.clamp(-AMPLITUDE_LIMIT, AMPLITUDE_LIMIT) };

    if hi > lo {
        (lo, hi)
    } else if hi > 0.0 {
        (AMPLITUDE_LIMIT / 2.0, AMPLITUDE_LIMIT)
    } else {
        (-AMPLITUDE_LIMIT, -AMPLITUDE_LIMIT / 2.0)
    }
}

impl PlotConfig {
    /// Clinical rhythm strip layout: 8 s strips, 4 per page, a 125-sample
    /// lead-in and a fixed ±2.5 mV band
    pub fn rhythm_strip() -> Self {
        Self {
            strip_secs: Some(8.0),
            strips_per_page: 4,
            lead_in_samples: 125,
            amplitude_range: AmplitudeRange::Fixed { min: -2.5, max: 2.5 },
            ..Self::default()
        }
    }

    /// Builder pattern: set the chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder pattern: set image size in pixels
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder pattern: set the record sampling frequency (Hz)
    pub fn record_frequency(mut self, hz: f64) -> Self {
        self.record_frequency = hz;
        self
    }

    /// Builder pattern: set the vertical range
    pub fn amplitude_range(mut self, range: AmplitudeRange) -> Self {
        self.amplitude_range = range;
        self
    }

    /// Builder pattern: set the waveform colour
    pub fn trace_color(mut self, color: RGBColor) -> Self {
        self.trace_color = color;
        self
    }

    /// Builder pattern: cut the record into strips of `secs` seconds
    pub fn strips(mut self, secs: f64, per_page: usize) -> Self {
        self.strip_secs = Some(secs);
        self.strips_per_page = per_page;
        self
    }

    /// Builder pattern: leave `samples` empty positions before the trace
    pub fn lead_in(mut self, samples: usize) -> Self {
        self.lead_in_samples = samples;
        self
    }

    /// Builder pattern: toggle the text layer
    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Minor cell width in samples at the configured frequency
    pub fn minor_grid_samples(&self) -> f64 {
        self.minor_grid_secs * self.record_frequency
    }

    /// Samples per strip, at least 2; `None` in continuous mode
    pub fn strip_samples(&self) -> Option<usize> {
        self.strip_secs
            .map(|secs| ((secs * self.record_frequency).round() as usize).max(2))
    }

    /// Paper speed and gain, e.g. `"25mm/s, 10mm/mV"`
    pub fn scale_label(&self) -> String {
        format!(
            "{:.0}mm/s, {:.0}mm/mV",
            1.0 / self.minor_grid_secs,
            1.0 / self.minor_grid_mv
        )
    }

    /// Check the numeric settings the time and amplitude scales depend on
    ///
    /// # Errors
    ///
    /// [`EcgGraphError::InvalidSetting`] naming the first setting that is
    /// zero, negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("record_frequency", self.record_frequency),
            ("minor_grid_secs", self.minor_grid_secs),
            ("minor_grid_mv", self.minor_grid_mv),
            ("strip_secs", self.strip_secs.unwrap_or(1.0)),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EcgGraphError::InvalidSetting { name, value });
            }
        }

        if self.strips_per_page == 0 || self.strips_per_page > MAX_STRIPS_PER_PAGE {
            return Err(EcgGraphError::InvalidSetting {
                name: "strips_per_page",
                value: self.strips_per_page as f64,
            });
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
