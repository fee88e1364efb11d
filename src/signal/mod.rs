//! ECG signal input
//!
//! This module turns whatever the caller hands over (a list of numbers or a
//! path to a sample file) into a [`SampleSeries`]: a non-empty sequence of
//! finite amplitudes indexed by sample number.
//!
//! # Organization
//!
//! - **series**: the validated [`SampleSeries`] type
//! - **loader**: text and file parsing ([`SampleSeries::parse`], [`SampleSeries::from_file`])
//! - **input**: the [`EcgData`] enum accepted by the public entry points
//!
//! # Example
//!
//! ```rust
//! use ecg_graph::signal::{EcgData, SampleSeries};
//!
//! let series = EcgData::from(vec![0.0, 0.4, 1.2, -0.3]).into_series().unwrap();
//! assert_eq!(series.len(), 4);
//!
//! let parsed = SampleSeries::parse("0.0\n0.4\n1.2\n-0.3\n").unwrap();
//! assert_eq!(parsed, series);
//! ```

pub mod input;
pub mod loader;
pub mod series;

pub use input::EcgData;
pub use series::SampleSeries;
