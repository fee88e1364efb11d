//! PDF export through an external converter
//!
//! The chart is drawn as one SVG per page, wrapped in a [`PdfPage`] and written to a
//! temp HTML file in the system temp directory. A hidden `.pdf` temp path is
//! reserved in the output directory, the [`Converter`] renders the page onto
//! it, and the result is persisted to the target only if it is non-empty.
//! Both temp files are removed on every path.

use std::fs;
use std::io::Write;

use super::converter::Converter;
use super::page::PdfPage;
use super::{ExportFormat, Exporter, OutputTarget, TEMP_PREFIX};
use crate::error::{ConversionError, EcgGraphError, Result};
use crate::output::visualization::{render_svg_pages, PlotConfig};
use crate::signal::SampleSeries;

/// Writes PDF charts, one sheet per chart page
pub struct PdfExporter<'a> {
    plot: &'a PlotConfig,
    page: PdfPage,
    converter: &'a dyn Converter,
}

impl<'a> PdfExporter<'a> {
    pub fn new(plot: &'a PlotConfig, page: PdfPage, converter: &'a dyn Converter) -> Self {
        Self { plot, page, converter }
    }

    pub fn page(&self) -> &PdfPage {
        &self.page
    }
}

impl Exporter for PdfExporter<'_> {
    type Error = EcgGraphError;

    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(&self, series: &SampleSeries, target: &OutputTarget) -> Result<()> {
        let charts = render_svg_pages(series, self.plot)?;
        log::debug!("PDF document holds {} chart page(s)", charts.len());
        let html = self.page.to_html(&charts);

        let mut page_file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".html")
            .tempfile()
            .map_err(ConversionError::from)?;
        page_file.write_all(html.as_bytes()).map_err(ConversionError::from)?;
        page_file.flush().map_err(ConversionError::from)?;

        let reserved = target.reserve(".pdf")?.into_temp_path();
        log::debug!(
            "converting {} to {}",
            page_file.path().display(),
            reserved.display()
        );

        self.converter.convert(page_file.path(), &reserved)?;

        let produced = fs::metadata(&reserved).map(|m| m.is_file() && m.len() > 0).unwrap_or(false);
        if !produced {
            return Err(ConversionError::MissingOutput { path: target.path().to_path_buf() }.into());
        }

        target.persist(reserved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Records the page it was given and writes fake PDF bytes
    #[derive(Default)]
    struct RecordingConverter {
        html: RefCell<String>,
        input: RefCell<Option<PathBuf>>,
    }

    impl Converter for RecordingConverter {
        fn convert(&self, input: &Path, output: &Path) -> std::result::Result<(), ConversionError> {
            *self.html.borrow_mut() = fs::read_to_string(input)?;
            *self.input.borrow_mut() = Some(input.to_path_buf());
            fs::write(output, b"%PDF-1.4\n%%EOF\n")?;
            Ok(())
        }
    }

    struct NoOutputConverter;

    impl Converter for NoOutputConverter {
        fn convert(&self, _input: &Path, _output: &Path) -> std::result::Result<(), ConversionError> {
            Ok(())
        }
    }

    struct ExitingConverter;

    impl Converter for ExitingConverter {
        fn convert(&self, _input: &Path, output: &Path) -> std::result::Result<(), ConversionError> {
            fs::write(output, b"partial")?;
            Err(ConversionError::Failed { code: Some(1), stderr: "bad page".to_string() })
        }
    }

    fn series() -> SampleSeries {
        SampleSeries::new(vec![0.1, 0.5, -0.2, 0.8, 0.0]).unwrap()
    }

    fn page() -> PdfPage {
        PdfPage::new("ECG", vec![("Scale".to_string(), "25mm/s, 10mm/mV".to_string())])
    }

    #[test]
    fn test_export_persists_converter_output() {
        let dir = tempfile::tempdir().unwrap();
        let plot = PlotConfig::default().size(400, 150);
        let converter = RecordingConverter::default();
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Pdf, false).unwrap();

        PdfExporter::new(&plot, page(), &converter).export(&series(), &target).unwrap();

        assert!(fs::read(target.path()).unwrap().starts_with(b"%PDF"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        let html = converter.html.borrow();
        assert!(html.contains("<svg"));
        assert!(html.contains("25mm/s, 10mm/mV"));

        let input = converter.input.borrow().clone().unwrap();
        assert!(!input.starts_with(dir.path()));
        assert!(!input.exists(), "temp page must be removed");
    }

    #[test]
    fn test_export_strip_layout_writes_one_figure_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let plot = PlotConfig::rhythm_strip().size(400, 320);
        let converter = RecordingConverter::default();
        let target = OutputTarget::resolve(dir.path(), "strips", ExportFormat::Pdf, false).unwrap();
        let samples = SampleSeries::new((0..10_000).map(|i| (i as f64 * 0.02).sin()).collect()).unwrap();

        PdfExporter::new(&plot, page(), &converter).export(&samples, &target).unwrap();

        let html = converter.html.borrow();
        assert_eq!(html.matches("<figure").count(), 2);
        assert_eq!(html.matches("<svg").count(), 2);
    }

    #[test]
    fn test_export_without_output_is_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let plot = PlotConfig::default().size(400, 150);
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Pdf, false).unwrap();

        let err = PdfExporter::new(&plot, page(), &NoOutputConverter)
            .export(&series(), &target)
            .unwrap_err();

        assert!(matches!(err, EcgGraphError::PdfConversion(ConversionError::MissingOutput { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_failure_removes_partial_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let plot = PlotConfig::default().size(400, 150);
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Pdf, false).unwrap();

        let err = PdfExporter::new(&plot, page(), &ExitingConverter)
            .export(&series(), &target)
            .unwrap_err();

        assert!(matches!(err, EcgGraphError::PdfConversion(ConversionError::Failed { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
