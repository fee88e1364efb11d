//! Visualization module for ECG waveforms
//!
//! This module draws ECG charts using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Plot configuration (`PlotConfig`, `AmplitudeRange`)
//! - **grid**: ECG paper layout (gridline positions, strip and page plan)
//! - **ecg**: Chart drawing on any plotters backend (`draw_ecg`, `render_rgb`, `render_svg`, `render_svg_pages`)
//!
//! # Quick Start
//!
//! ```rust
//! use ecg_graph::output::visualization::{render_svg, PlotConfig};
//! use ecg_graph::signal::SampleSeries;
//!
//! let series = SampleSeries::new(vec![0.1, 0.5, -0.2, 0.8, 0.0]).unwrap();
//! let config = PlotConfig::default().title("Lead II").size(800, 300).show_labels(false);
//! let svg = render_svg(&series, &config).unwrap();
//! assert!(svg.contains("<svg"));
//! ```
//!
//! # Which Entry Point
//!
//! | Use Case | Function |
//! |----------|----------|
//! | PNG/JPEG export | `render_rgb` |
//! | Whole chart as one SVG | `render_svg` |
//! | PDF pages (one SVG each) | `render_svg_pages` |
//! | Custom plotters backend | `draw_ecg` |

pub mod config;
pub mod ecg;
pub mod grid;

pub use config::{AmplitudeRange, PlotConfig, AMPLITUDE_LIMIT, MAX_STRIPS_PER_PAGE};

pub use ecg::{draw_ecg, render_rgb, render_svg, render_svg_pages, MAX_CANVAS_PIXELS};

pub use grid::{row_x_range, AxisGrid, GridLine, GridWeight, PaperLayout, StripPlan};
