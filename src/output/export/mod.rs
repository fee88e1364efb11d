//! Export module for ECG charts.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the output format.
//! Each format is an independent implementation in its own sub-module, and
//! [`ExportFormat`] is the closed set of formats the dispatcher accepts.
//!
//! # Available formats
//!
//! | Format | Exporter           | Path                                         |
//! |--------|--------------------|----------------------------------------------|
//! | PNG    | [`RasterExporter`] | RGB buffer → PNG encoder → output dir        |
//! | JPEG   | [`RasterExporter`] | RGB buffer → JPEG encoder → output dir       |
//! | PDF    | [`PdfExporter`]    | SVG → HTML page → [`Converter`] → output dir |
//!
//! # Atomic output
//!
//! Exporters never write the final path directly. The artifact is written to
//! a hidden temp file inside the output directory and then moved into place
//! by [`OutputTarget::persist`], so a failed call leaves no partial file and
//! an existing file is never clobbered unless overwriting was requested.
//!
//! # Usage example
//!
//! ```rust,ignore
//! use ecg_graph::output::export::{Exporter, ExportFormat, OutputTarget, RasterExporter};
//!
//! let target = OutputTarget::resolve("/tmp", "strip", ExportFormat::Png, false)?;
//! RasterExporter::new(ExportFormat::Png, &plot_config)?.export(&series, &target)?;
//! ```

pub mod converter;
pub mod page;
pub mod pdf;
pub mod raster;

pub use converter::{CommandConverter, Converter};
pub use page::PdfPage;
pub use pdf::PdfExporter;
pub use raster::RasterExporter;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::TempPath;

use crate::error::{EcgGraphError, Result};
use crate::signal::SampleSeries;

/// Prefix of every temp file this crate creates inside an output directory
pub(crate) const TEMP_PREFIX: &str = ".ecg-graph-";

/// Unix mode of a written chart file
pub const ARTIFACT_MODE: u32 = 0o644;

// =================================================================================================
// Export format
// =================================================================================================

/// Supported output formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Jpg,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Jpg, ExportFormat::Png];

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EcgGraphError;

    /// Case-insensitive; `jpeg` is accepted for `jpg`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(EcgGraphError::UnsupportedFormat { format: s.to_string() }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.extension())
    }
}

// =================================================================================================
// Exporter trait
// =================================================================================================

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type. The
/// built-in exporters use [`EcgGraphError`] so the dispatcher can forward
/// them unchanged.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Format written by this exporter
    fn format(&self) -> ExportFormat;

    /// Render `series` and place the artifact at `target.path()`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, writing or moving the file into
    /// place fails. No file is left at the target on error.
    fn export(&self, series: &SampleSeries, target: &OutputTarget) -> std::result::Result<(), Self::Error>;
}

// =================================================================================================
// Output target
// =================================================================================================

/// Validated destination of one export
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTarget {
    dir: PathBuf,
    path: PathBuf,
    overwrite: bool,
}

impl OutputTarget {
    /// Check the output location and build `{dir}/{file_name}.{ext}`
    ///
    /// The directory is canonicalized, so the resulting path is absolute.
    ///
    /// # Errors
    ///
    /// - [`EcgGraphError::InvalidFileName`] for an empty name or one containing a path separator
    /// - [`EcgGraphError::OutputDir`] if `dir` is missing, not a directory, or not writable
    /// - [`EcgGraphError::OutputCollision`] if the target exists and `overwrite` is false
    pub fn resolve(
        dir: impl AsRef<Path>,
        file_name: &str,
        format: ExportFormat,
        overwrite: bool,
    ) -> Result<Self> {
        validate_file_name(file_name)?;
        let dir = validate_output_dir(dir.as_ref())?;
        let path = dir.join(format!("{}.{}", file_name, format.extension()));

        if !overwrite && path.exists() {
            return Err(EcgGraphError::OutputCollision { path });
        }

        Ok(Self { dir, path, overwrite })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Reserve a hidden temp file next to the target
    pub(crate) fn reserve(&self, suffix: &str) -> Result<tempfile::NamedTempFile> {
        tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(suffix)
            .tempfile_in(&self.dir)
            .map_err(|source| self.write_error(source))
    }

    /// Move a finished temp file onto the target path
    ///
    /// Without `overwrite` the move refuses to replace a file created since
    /// [`resolve`](Self::resolve) ran. On Unix the artifact is made readable
    /// by everyone ([`ARTIFACT_MODE`]) first.
    pub(crate) fn persist(&self, temp: TempPath) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp, fs::Permissions::from_mode(ARTIFACT_MODE))
                .map_err(|source| self.write_error(source))?;
        }

        let persisted = if self.overwrite {
            temp.persist(&self.path)
        } else {
            temp.persist_noclobber(&self.path)
        };

        persisted.map_err(|err| {
            if err.error.kind() == io::ErrorKind::AlreadyExists {
                EcgGraphError::OutputCollision { path: self.path.clone() }
            } else {
                self.write_error(err.error)
            }
        })
    }

    pub(crate) fn write_error(&self, source: io::Error) -> EcgGraphError {
        EcgGraphError::OutputWrite { path: self.path.clone(), source }
    }
}

fn validate_file_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(EcgGraphError::InvalidFileName { name: name.to_string() });
    }
    Ok(())
}

fn validate_output_dir(dir: &Path) -> Result<PathBuf> {
    let unusable = |reason: String| EcgGraphError::OutputDir { path: dir.to_path_buf(), reason };

    let metadata = fs::metadata(dir).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => unusable("does not exist".to_string()),
        _ => unusable(err.to_string()),
    })?;

    if !metadata.is_dir() {
        return Err(unusable("not a directory".to_string()));
    }

    // Scratch file is removed when dropped
    tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".check")
        .tempfile_in(dir)
        .map_err(|err| unusable(format!("not writable: {err}")))?;

    dir.canonicalize().map_err(|err| unusable(err.to_string()))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_str() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpg);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpg);
        assert_eq!(" png ".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
    }

    #[test]
    fn test_format_rejects_svg() {
        let err = "svg".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, EcgGraphError::UnsupportedFormat { format } if format == "svg"));
    }

    #[test]
    fn test_format_default_and_display() {
        assert_eq!(ExportFormat::default(), ExportFormat::Pdf);
        let names: Vec<String> = ExportFormat::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["pdf", "jpg", "png"]);
    }

    #[test]
    fn test_resolve_builds_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path(), "t1", ExportFormat::Png, false).unwrap();
        assert!(target.path().is_absolute());
        assert_eq!(target.path().file_name().unwrap(), "t1.png");
    }

    #[test]
    fn test_resolve_leaves_no_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        OutputTarget::resolve(dir.path(), "graph", ExportFormat::Pdf, false).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_rejects_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = OutputTarget::resolve(&missing, "graph", ExportFormat::Png, false).unwrap_err();
        assert!(matches!(err, EcgGraphError::OutputDir { .. }));
    }

    #[test]
    fn test_resolve_rejects_file_as_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = OutputTarget::resolve(file.path(), "graph", ExportFormat::Png, false).unwrap_err();
        assert!(matches!(err, EcgGraphError::OutputDir { reason, .. } if reason == "not a directory"));
    }

    #[test]
    fn test_resolve_rejects_bad_file_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["", "  ", ".", "..", "a/b", "a\\b"] {
            let err = OutputTarget::resolve(dir.path(), name, ExportFormat::Png, false).unwrap_err();
            assert!(matches!(err, EcgGraphError::InvalidFileName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_resolve_detects_collision() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("graph.png"), b"existing").unwrap();

        let err = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Png, false).unwrap_err();
        assert!(matches!(err, EcgGraphError::OutputCollision { .. }));
        assert!(OutputTarget::resolve(dir.path(), "graph", ExportFormat::Png, true).is_ok());
    }

    #[test]
    fn test_persist_noclobber_reports_collision() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Png, false).unwrap();

        // Another writer wins the race after resolve()
        fs::write(target.path(), b"first").unwrap();

        let mut temp = target.reserve(".part").unwrap();
        temp.write_all(b"second").unwrap();
        let err = target.persist(temp.into_temp_path()).unwrap_err();

        assert!(matches!(err, EcgGraphError::OutputCollision { .. }));
        assert_eq!(fs::read(target.path()).unwrap(), b"first");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_persist_overwrite_replaces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("graph.png"), b"old").unwrap();
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Png, true).unwrap();

        let mut temp = target.reserve(".part").unwrap();
        temp.write_all(b"new").unwrap();
        target.persist(temp.into_temp_path()).unwrap();

        assert_eq!(fs::read(target.path()).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_persist_makes_artifact_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::resolve(dir.path(), "graph", ExportFormat::Png, false).unwrap();

        let mut temp = target.reserve(".part").unwrap();
        temp.write_all(b"chart").unwrap();
        target.persist(temp.into_temp_path()).unwrap();

        let mode = fs::metadata(target.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, ARTIFACT_MODE);
    }
}
