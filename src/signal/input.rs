//! Caller input before normalization

use std::path::{Path, PathBuf};

use super::series::SampleSeries;
use crate::error::Result;

/// ECG data as handed to [`generate_ecg_graph`](crate::generate_ecg_graph)
///
/// Either literal samples or the path of a sample file. Strings always
/// convert to [`EcgData::File`].
///
/// ```rust
/// use ecg_graph::signal::EcgData;
///
/// let literal: EcgData = vec![0.1, 0.2].into();
/// let from_file: EcgData = "record.txt".into();
/// assert!(matches!(literal, EcgData::Samples(_)));
/// assert!(matches!(from_file, EcgData::File(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum EcgData {
    Samples(Vec<f64>),
    File(PathBuf),
}

impl EcgData {
    /// Validate literal samples or read and parse the file
    pub fn into_series(self) -> Result<SampleSeries> {
        match self {
            EcgData::Samples(values) => SampleSeries::new(values),
            EcgData::File(path) => SampleSeries::from_file(path),
        }
    }
}

impl From<Vec<f64>> for EcgData {
    fn from(values: Vec<f64>) -> Self {
        EcgData::Samples(values)
    }
}

impl From<&[f64]> for EcgData {
    fn from(values: &[f64]) -> Self {
        EcgData::Samples(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for EcgData {
    fn from(values: [f64; N]) -> Self {
        EcgData::Samples(values.to_vec())
    }
}

impl From<SampleSeries> for EcgData {
    fn from(series: SampleSeries) -> Self {
        EcgData::Samples(series.into_values())
    }
}

impl From<PathBuf> for EcgData {
    fn from(path: PathBuf) -> Self {
        EcgData::File(path)
    }
}

impl From<&Path> for EcgData {
    fn from(path: &Path) -> Self {
        EcgData::File(path.to_path_buf())
    }
}

impl From<&str> for EcgData {
    fn from(path: &str) -> Self {
        EcgData::File(PathBuf::from(path))
    }
}

impl From<String> for EcgData {
    fn from(path: String) -> Self {
        EcgData::File(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EcgGraphError;

    #[test]
    fn test_slice_and_array_become_samples() {
        let from_slice: EcgData = (&[1.0, 2.0][..]).into();
        let from_array: EcgData = [1.0, 2.0].into();
        assert_eq!(from_slice, from_array);
    }

    #[test]
    fn test_samples_into_series() {
        let series = EcgData::from(vec![0.1, 0.2]).into_series().unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let err = EcgData::from(Vec::<f64>::new()).into_series().unwrap_err();
        assert!(matches!(err, EcgGraphError::EmptyInput));
    }

    #[test]
    fn test_missing_path_is_input_not_found() {
        let err = EcgData::from("/definitely/not/here.txt").into_series().unwrap_err();
        assert!(matches!(err, EcgGraphError::InputNotFound { .. }));
    }
}
