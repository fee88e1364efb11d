//! Validated ECG sample series
//!
//! A [`SampleSeries`] is the only thing the renderer ever sees: it is
//! guaranteed non-empty and every amplitude is finite, so the chart code
//! never has to re-check for NaN or an empty range.

use crate::error::{EcgGraphError, Result};

/// Ordered, non-empty sequence of finite amplitudes (mV), index-addressed
///
/// # Example
///
/// ```rust
/// use ecg_graph::signal::SampleSeries;
///
/// let series = SampleSeries::new(vec![0.1, 0.5, -0.2, 0.8, 0.0]).unwrap();
/// assert_eq!(series.len(), 5);
/// assert_eq!(series.amplitude_range(), (-0.2, 0.8));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl SampleSeries {
    /// Validate caller-provided amplitudes
    ///
    /// # Errors
    ///
    /// - [`EcgGraphError::EmptyInput`] if `values` is empty
    /// - [`EcgGraphError::NonFiniteSample`] for the first NaN or infinite value
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(EcgGraphError::EmptyInput);
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(EcgGraphError::NonFiniteSample { index, value });
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        Ok(Self { values, min, max })
    }

    /// Number of samples (always at least 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(min, max)` amplitude
    pub fn amplitude_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Recording length in seconds at `record_frequency` Hz
    pub fn duration_secs(&self, record_frequency: f64) -> f64 {
        self.values.len() as f64 / record_frequency
    }

    /// `(sample index, amplitude)` pairs, ready for a line series
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (i as f64, v))
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl TryFrom<Vec<f64>> for SampleSeries {
    type Error = EcgGraphError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}
