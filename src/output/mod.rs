//! Output module for ECG charts
//!
//! This module turns a validated sample series into a file:
//! - **Visualization**: ECG paper charts drawn with plotters
//! - **Export**: PNG/JPEG encoding and PDF conversion
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Chart drawing
//! │   ├── config.rs
//! │   ├── grid.rs
//! │   └── ecg.rs
//! └── export/             ← File output
//!     ├── mod.rs          ← ExportFormat, Exporter, OutputTarget
//!     ├── raster.rs
//!     ├── page.rs
//!     ├── pdf.rs
//!     └── converter.rs
//! ```
//!
//! Visualization knows nothing about files; export knows nothing about
//! drawing beyond calling `render_rgb` or `render_svg_pages`.

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    draw_ecg, render_rgb, render_svg, render_svg_pages, AmplitudeRange, PlotConfig,
};

pub use export::{
    CommandConverter, Converter, ExportFormat, Exporter, OutputTarget, PdfExporter, RasterExporter,
};
