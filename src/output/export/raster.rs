//! PNG and JPEG export
//!
//! The chart is drawn into an in-memory RGB buffer, encoded with the `image`
//! crate and written to a temp file in the output directory before being
//! moved onto the target path.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use super::{ExportFormat, Exporter, OutputTarget};
use crate::error::{EcgGraphError, Result};
use crate::output::visualization::{render_rgb, PlotConfig};
use crate::signal::SampleSeries;

/// Raster encoding with its settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterEncoding {
    Png,
    Jpeg { quality: u8 },
}

/// Writes PNG or JPEG charts
pub struct RasterExporter<'a> {
    encoding: RasterEncoding,
    plot: &'a PlotConfig,
}

impl<'a> RasterExporter<'a> {
    /// # Errors
    ///
    /// [`EcgGraphError::UnsupportedFormat`] when `format` is not a raster format.
    pub fn new(format: ExportFormat, plot: &'a PlotConfig) -> Result<Self> {
        let encoding = match format {
            ExportFormat::Png => RasterEncoding::Png,
            ExportFormat::Jpg => RasterEncoding::Jpeg { quality: plot.jpeg_quality.clamp(1, 100) },
            ExportFormat::Pdf => {
                return Err(EcgGraphError::UnsupportedFormat { format: format.to_string() })
            }
        };
        Ok(Self { encoding, plot })
    }

    pub fn encoding(&self) -> RasterEncoding {
        self.encoding
    }
}

impl Exporter for RasterExporter<'_> {
    type Error = EcgGraphError;

    fn format(&self) -> ExportFormat {
        match self.encoding {
            RasterEncoding::Png => ExportFormat::Png,
            RasterEncoding::Jpeg { .. } => ExportFormat::Jpg,
        }
    }

    fn export(&self, series: &SampleSeries, target: &OutputTarget) -> Result<()> {
        let image = render_rgb(series, self.plot)?;
        let bytes = encode(&image, self.encoding)?;

        let suffix = format!(".{}.part", self.format().extension());
        let mut file = target.reserve(&suffix)?;
        file.write_all(&bytes).map_err(|source| target.write_error(source))?;
        file.as_file().sync_all().map_err(|source| target.write_error(source))?;

        target.persist(file.into_temp_path())?;
        log::debug!("{} bytes of {} written to {}", bytes.len(), self.format(), target.path().display());
        Ok(())
    }
}

/// Encode an RGB image into PNG or JPEG bytes
pub fn encode(image: &RgbImage, encoding: RasterEncoding) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();

    let encoded = match encoding {
        RasterEncoding::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        RasterEncoding::Jpeg { quality } => JpegEncoder::new_with_quality(&mut bytes, quality)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8),
    };

    encoded.map_err(|err| EcgGraphError::Render(format!("image encoding failed: {err}")))?;
    Ok(bytes)
}
