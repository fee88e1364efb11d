//! ECG paper grid layout
//!
//! Computes where the minor and major gridlines fall on each axis, and how
//! a record is cut into rows. The time axis is measured in samples, so a
//! 0.04 s minor cell at 250 Hz is 10 samples wide; the amplitude axis is
//! measured in mV.
//!
//! Steps are rescaled by powers of ten when the data span is far from paper
//! scale (e.g. raw ADC counts, or five samples): more than
//! [`MAX_MINOR_LINES`] lines coarsens the step, fewer than
//! [`MIN_MAJOR_CELLS`] major cells refines it. The minor:major ratio is
//! never changed.

use std::ops::Range;

use super::config::PlotConfig;

/// Upper bound on minor gridlines per axis
pub const MAX_MINOR_LINES: f64 = 500.0;

/// Lower bound on major cells spanned per axis
pub const MIN_MAJOR_CELLS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridWeight {
    Minor,
    Major,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub value: f64,
    pub weight: GridWeight,
}

/// Gridline spacing along one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGrid {
    pub minor_step: f64,
    pub major_every: usize,
}

impl AxisGrid {
    /// Fit `base_step` to a data span
    ///
    /// The decade shift is computed in log space, so any finite span is
    /// brought within [`MAX_MINOR_LINES`] in one step.
    pub fn fit(span: f64, base_step: f64, major_every: usize) -> Self {
        let major_every = major_every.max(1);
        let usable = base_step > 0.0 && base_step.is_finite() && span > 0.0 && span.is_finite();
        if !usable {
            return Self { minor_step: base_step, major_every };
        }

        let per_major = (major_every as f64).log10();
        let lines_log = span.log10() - base_step.log10();

        let shift = if lines_log > MAX_MINOR_LINES.log10() {
            (lines_log - MAX_MINOR_LINES.log10()).ceil()
        } else if lines_log - per_major < MIN_MAJOR_CELLS.log10() {
            (lines_log - per_major - MIN_MAJOR_CELLS.log10()).floor()
        } else {
            0.0
        };

        let mut step = if shift == 0.0 {
            base_step
        } else {
            10f64.powf(base_step.log10() + shift)
        };

        // log10 rounding can land one decade short
        if span / step > MAX_MINOR_LINES {
            step *= 10.0;
        }
        if !(step > 0.0 && step.is_finite()) {
            step = base_step;
        }

        Self { minor_step: step, major_every }
    }

    pub fn major_step(&self) -> f64 {
        self.minor_step * self.major_every as f64
    }

    /// Gridlines within `low..=high`, in ascending order
    ///
    /// Lines sit on integer multiples of the minor step, so the grid is
    /// anchored at zero rather than at the range edge. A step too fine for
    /// the range yields no lines rather than more than `MAX_MINOR_LINES + 1`.
    pub fn lines(&self, low: f64, high: f64) -> Vec<GridLine> {
        let valid = self.minor_step > 0.0
            && self.minor_step.is_finite()
            && low.is_finite()
            && high.is_finite()
            && high >= low;
        if !valid {
            return Vec::new();
        }

        let tolerance = 1e-9;
        let first = (low / self.minor_step - tolerance).ceil();
        let last = (high / self.minor_step + tolerance).floor();

        if !(last - first < MAX_MINOR_LINES + 1.0) {
            log::warn!(
                "gridline step {} too fine for {}..{}, grid skipped",
                self.minor_step,
                low,
                high
            );
            return Vec::new();
        }

        let every = self.major_every as i64;
        (first as i64..=last as i64)
            .map(|k| GridLine {
                value: k as f64 * self.minor_step,
                weight: if k.rem_euclid(every) == 0 {
                    GridWeight::Major
                } else {
                    GridWeight::Minor
                },
            })
            .collect()
    }
}

/// Resolved chart ranges and gridlines for both axes of one row
#[derive(Clone, Debug, PartialEq)]
pub struct PaperLayout {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_grid: AxisGrid,
    pub y_grid: AxisGrid,
}

impl PaperLayout {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), config: &PlotConfig) -> Self {
        let x_grid = AxisGrid::fit(
            x_range.1 - x_range.0,
            config.minor_grid_samples(),
            config.major_every,
        );
        let y_grid = AxisGrid::fit(y_range.1 - y_range.0, config.minor_grid_mv, config.major_every);

        Self { x_range, y_range, x_grid, y_grid }
    }

    pub fn vertical_lines(&self) -> Vec<GridLine> {
        self.x_grid.lines(self.x_range.0, self.x_range.1)
    }

    pub fn horizontal_lines(&self) -> Vec<GridLine> {
        self.y_grid.lines(self.y_range.0, self.y_range.1)
    }
}

// =================================================================================================
// Strip plan
// =================================================================================================

/// How a record is cut into rows and rows into pages
///
/// Positions count paper samples: the lead-in first, then the record. In
/// continuous mode there is one row on one page. In strip mode every row is
/// exactly one strip wide, so all rows share a time scale, and the last page
/// is padded with empty rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripPlan {
    positions: usize,
    strip_width: Option<usize>,
    rows_per_page: usize,
}

impl StripPlan {
    pub fn new(sample_count: usize, config: &PlotConfig) -> Self {
        let strip_width = config.strip_samples();
        Self {
            positions: config.lead_in_samples.saturating_add(sample_count),
            strip_width,
            rows_per_page: if strip_width.is_some() { config.strips_per_page.max(1) } else { 1 },
        }
    }

    /// Rows holding part of the record, lead-in included
    pub fn strip_count(&self) -> usize {
        match self.strip_width {
            Some(width) => self.positions.div_ceil(width).max(1),
            None => 1,
        }
    }

    /// `true` when the record is cut into strips
    pub fn is_strips(&self) -> bool {
        self.strip_width.is_some()
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn page_count(&self) -> usize {
        self.strip_count().div_ceil(self.rows_per_page)
    }

    /// Positions covered by row `index`
    pub fn row(&self, index: usize) -> Range<usize> {
        match self.strip_width {
            Some(width) => {
                let start = index.saturating_mul(width);
                start..start.saturating_add(width)
            }
            None => 0..self.positions,
        }
    }

    /// Every row slot of `page`, padding included
    pub fn page_rows(&self, page: usize) -> impl Iterator<Item = Range<usize>> + '_ {
        let first = page.saturating_mul(self.rows_per_page);
        (first..first.saturating_add(self.rows_per_page)).map(move |index| self.row(index))
    }
}

/// `start..end-1` as chart coordinates, at least one unit wide
pub fn row_x_range(row: &Range<usize>) -> (f64, f64) {
    let start = row.start as f64;
    let last = row.end.saturating_sub(1) as f64;
    (start, last.max(start + 1.0))
}
