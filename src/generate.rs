//! Export dispatch: from caller input to one file on disk
//!
//! ```text
//! export_to ──► ExportFormat ─┐
//! ecg_data  ──► SampleSeries ─┼─► OutputTarget ─► Exporter ─► {dir}/{name}.{ext}
//! output_dir, file name ──────┘        │
//!                                      └─ png/jpg: RasterExporter
//!                                         pdf:     PdfExporter + Converter
//! ```
//!
//! Every stage fails fast. Nothing is written until the input, the format
//! and the output location have all been validated.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::output::export::converter::DEFAULT_TIMEOUT;
use crate::output::export::{
    CommandConverter, Converter, ExportFormat, Exporter, OutputTarget, PdfExporter, PdfPage,
    RasterExporter,
};
use crate::output::visualization::PlotConfig;
use crate::signal::{EcgData, SampleSeries};

/// Format used when the caller does not choose one
pub const DEFAULT_EXPORT_FORMAT: &str = "pdf";

/// Base name used when the caller does not choose one
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "graph";

// =================================================================================================
// Configuration
// =================================================================================================

/// Settings for one render call
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Existing, writable directory receiving the artifact
    pub output_dir: PathBuf,

    /// Default: PDF
    pub export_to: ExportFormat,

    /// Base name without extension
    pub output_file_name: String,

    /// Replace an existing target instead of failing with `OutputCollision`
    pub overwrite: bool,

    pub plot: PlotConfig,

    /// Extra label/value rows appended to the display information
    pub metadata: Vec<(String, String)>,

    /// Upper bound on the default converter's run time
    pub converter_timeout: Duration,
}

impl RenderConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            export_to: ExportFormat::default(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            overwrite: false,
            plot: PlotConfig::default(),
            metadata: Vec::new(),
            converter_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder pattern: set the output format
    pub fn export_to(mut self, format: ExportFormat) -> Self {
        self.export_to = format;
        self
    }

    /// Builder pattern: set the base name of the output file
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Builder pattern: allow replacing an existing file
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builder pattern: set the chart configuration
    pub fn plot(mut self, plot: PlotConfig) -> Self {
        self.plot = plot;
        self
    }

    /// Builder pattern: set the chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.plot.title = title.into();
        self
    }

    /// Builder pattern: append one display information row
    pub fn add_metadata(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((label.into(), value.into()));
        self
    }

    /// Builder pattern: bound the converter run time
    pub fn converter_timeout(mut self, timeout: Duration) -> Self {
        self.converter_timeout = timeout;
        self
    }
}

// =================================================================================================
// Report
// =================================================================================================

/// What was produced, and the recording facts shown alongside it
#[derive(Clone, Debug, PartialEq)]
pub struct GraphReport {
    /// Absolute path of the written file
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Hz
    pub record_frequency: f64,
    /// Paper speed and gain, e.g. `"25mm/s, 10mm/mV"`
    pub scale: String,
    pub signals_num: usize,
    /// Seconds
    pub record_time: f64,
    pub display_information: Vec<(String, String)>,
}

impl GraphReport {
    fn new(path: PathBuf, series: &SampleSeries, config: &RenderConfig) -> Self {
        let record_frequency = config.plot.record_frequency;
        let record_time = series.duration_secs(record_frequency);
        let display_information =
            display_information(series, &config.plot, &config.metadata);

        Self {
            path,
            format: config.export_to,
            record_frequency,
            scale: config.plot.scale_label(),
            signals_num: series.len(),
            record_time,
            display_information,
        }
    }
}

/// Record frequency, scale, sample count and duration, then caller metadata
pub fn display_information(
    series: &SampleSeries,
    plot: &PlotConfig,
    metadata: &[(String, String)],
) -> Vec<(String, String)> {
    let duration = series.duration_secs(plot.record_frequency).ceil();

    let mut info = vec![
        ("Record frequency".to_string(), format!("{} Hz", plot.record_frequency)),
        ("Scale".to_string(), plot.scale_label()),
        ("No. of signals".to_string(), series.len().to_string()),
        ("Duration".to_string(), format!("{duration} seconds")),
    ];
    info.extend(metadata.iter().cloned());
    info
}

// =================================================================================================
// Entry points
// =================================================================================================

/// Render `ecg_data` to `{output_dir}/{output_file_name}.{export_to}`
///
/// `export_to` is `"pdf"`, `"jpg"` (or `"jpeg"`) or `"png"`, case-insensitive.
/// PDF output runs `wkhtmltopdf`; use [`render_ecg_graph_with`] to supply
/// another converter.
///
/// ```rust,no_run
/// use ecg_graph::{generate_ecg_graph, DEFAULT_OUTPUT_FILE_NAME};
///
/// let path = generate_ecg_graph(vec![0.1, 0.5, -0.2, 0.8, 0.0], "/tmp", "png", DEFAULT_OUTPUT_FILE_NAME)?;
/// assert!(path.ends_with("graph.png"));
/// # Ok::<(), ecg_graph::EcgGraphError>(())
/// ```
///
/// # Errors
///
/// See [`EcgGraphError`](crate::EcgGraphError); no file is left behind on error.
pub fn generate_ecg_graph(
    ecg_data: impl Into<EcgData>,
    output_dir: impl AsRef<Path>,
    export_to: &str,
    output_file_name: &str,
) -> Result<PathBuf> {
    let format: ExportFormat = export_to.parse()?;
    let config = RenderConfig::new(output_dir.as_ref())
        .export_to(format)
        .output_file_name(output_file_name);

    render_ecg_graph(ecg_data, &config).map(|report| report.path)
}

/// Render with full configuration, converting PDFs with `wkhtmltopdf`
pub fn render_ecg_graph(ecg_data: impl Into<EcgData>, config: &RenderConfig) -> Result<GraphReport> {
    let converter = CommandConverter::default().timeout(config.converter_timeout);
    render_ecg_graph_with(ecg_data, config, &converter)
}

/// Render with full configuration and a caller-provided PDF converter
///
/// The converter is only used when `config.export_to` is PDF.
pub fn render_ecg_graph_with(
    ecg_data: impl Into<EcgData>,
    config: &RenderConfig,
    converter: &dyn Converter,
) -> Result<GraphReport> {
    let ecg_data: EcgData = ecg_data.into();
    let series = ecg_data.into_series()?;
    log::debug!("ECG signals count = {}", series.len());
    config.plot.validate()?;

    let target = OutputTarget::resolve(
        &config.output_dir,
        &config.output_file_name,
        config.export_to,
        config.overwrite,
    )?;
    log::debug!("exporting {} to {}", config.export_to, target.path().display());

    match config.export_to {
        ExportFormat::Png | ExportFormat::Jpg => {
            RasterExporter::new(config.export_to, &config.plot)?.export(&series, &target)?;
        }
        ExportFormat::Pdf => {
            let info = display_information(&series, &config.plot, &config.metadata);
            let page = PdfPage::new(config.plot.title.clone(), info);
            PdfExporter::new(&config.plot, page, converter).export(&series, &target)?;
        }
    }

    log::info!("ECG graph written to {}", target.path().display());
    Ok(GraphReport::new(target.path().to_path_buf(), &series, config))
}

// =================================================================================================
// Tests
// =================================================================================================
