//! ecg-graph: ECG waveform charts as PNG, JPEG or PDF
//!
//! Turns a list of ECG amplitude samples (or a file of them) into a single
//! chart file drawn over ECG paper: pink 1 mm minor cells, red 5 mm major
//! cells, at the clinical 25 mm/s and 10 mm/mV scale.
//!
//! # Architecture
//!
//! The crate is a three-stage pipeline:
//!
//! 1. **Signal**: caller input is validated into a [`SampleSeries`]
//!    - literal samples or a sample file ([`EcgData`])
//!    - non-empty, finite values only
//!
//! 2. **Chart rendering**: the series is drawn with `plotters`
//!    - onto an RGB buffer for raster formats
//!    - onto an SVG string for the PDF page
//!
//! 3. **Export**: one file is placed in the output directory
//!    - PNG/JPEG are encoded in-process
//!    - PDF goes through an external HTML-to-PDF [`Converter`]
//!
//! # Quick Start
//!
//! ```rust
//! use ecg_graph::generate_ecg_graph;
//!
//! # fn main() -> Result<(), ecg_graph::EcgGraphError> {
//! let dir = tempfile::tempdir().unwrap();
//! let samples = vec![0.1, 0.5, -0.2, 0.8, 0.0];
//!
//! let path = generate_ecg_graph(samples, dir.path(), "png", "t1")?;
//!
//! assert!(path.ends_with("t1.png"));
//! # Ok(())
//! # }
//! ```
//!
//! For more control (chart size, title, metadata, overwriting, converter
//! timeout) build a [`RenderConfig`] and call [`render_ecg_graph`].
//!
//! # Modules
//!
//! - [`signal`]: Sample series and input parsing
//! - [`output`]: Chart rendering and file export
//! - [`generate`]: Entry points and per-call configuration
//! - [`error`]: Error types
//!
//! # Logging
//!
//! Diagnostics go through the `log` facade. The crate never installs a
//! logger; wire one up in the application to see them.

pub mod error;
pub mod generate;
pub mod output;
pub mod signal;

pub use error::{ConversionError, EcgGraphError, Result};
pub use generate::{
    generate_ecg_graph, render_ecg_graph, render_ecg_graph_with, GraphReport, RenderConfig,
    DEFAULT_EXPORT_FORMAT, DEFAULT_OUTPUT_FILE_NAME,
};
pub use output::export::{CommandConverter, Converter, ExportFormat};
pub use signal::{EcgData, SampleSeries};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use ecg_graph::prelude::*;
    //! ```
    pub use crate::error::{ConversionError, EcgGraphError};
    pub use crate::generate::{
        generate_ecg_graph, render_ecg_graph, render_ecg_graph_with, GraphReport, RenderConfig,
    };
    pub use crate::output::export::{CommandConverter, Converter, ExportFormat};
    pub use crate::output::visualization::{AmplitudeRange, PlotConfig};
    pub use crate::signal::{EcgData, SampleSeries};
}
