//! Error types
//!
//! Every public entry point returns [`Result<T>`], whose error side is
//! [`EcgGraphError`]. Each variant maps to exactly one failure stage of the
//! pipeline (input, output location, rendering, conversion), so callers can
//! match on the kind without parsing messages.
//!
//! Converter failures keep their own type, [`ConversionError`], so that a
//! [`Converter`](crate::output::export::Converter) implementation outside
//! this crate does not need to know about the rest of the taxonomy.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, EcgGraphError>;

/// Failure of a single `generate_ecg_graph` call
#[derive(Debug, Error)]
pub enum EcgGraphError {
    /// The sample list (or sample file) contains no values
    #[error("ECG data is empty: at least one sample is required")]
    EmptyInput,

    /// A token in a sample file is not a finite number
    #[error("invalid sample {token:?} on line {line}")]
    InvalidSample { line: usize, token: String },

    /// A caller-provided sample is NaN or infinite
    #[error("sample at index {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },

    /// The sample file does not exist
    #[error("ECG data file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// The sample file exists but could not be read
    #[error("failed to read ECG data file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory is missing, not a directory, or not writable
    #[error("output directory {} is unusable: {reason}", .path.display())]
    OutputDir { path: PathBuf, reason: String },

    /// The output base name is empty or would escape the output directory
    #[error("invalid output file name {name:?}")]
    InvalidFileName { name: String },

    /// The target file already exists and overwriting was not requested
    #[error("output file already exists: {}", .path.display())]
    OutputCollision { path: PathBuf },

    /// `export_to` is not one of `pdf`, `jpg`, `png`
    #[error("exporting to {format:?} is not supported, expected one of: pdf, jpg, png")]
    UnsupportedFormat { format: String },

    /// A numeric plot setting is zero, negative or not finite
    #[error("invalid plot setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    /// The drawing backend failed while rendering the chart
    #[error("failed to render ECG chart: {0}")]
    Render(String),

    /// The artifact could not be written into the output directory
    #[error("failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external PDF converter failed or produced nothing
    #[error("PDF conversion failed: {0}")]
    PdfConversion(#[from] ConversionError),
}

/// Failure reported by a [`Converter`](crate::output::export::Converter)
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The converter process could not be started
    #[error("could not start converter {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The converter process ran but exited unsuccessfully
    #[error("converter exited with {}{}", exit_label(*.code), stderr_suffix(.stderr))]
    Failed { code: Option<i32>, stderr: String },

    /// The converter did not finish within the configured timeout
    #[error("converter did not finish within {timeout:?}")]
    Timeout { timeout: Duration },

    /// The converter reported success but the output file is missing or empty
    #[error("converter produced no output at {}", .path.display())]
    MissingOutput { path: PathBuf },

    /// Waiting on the converter or inspecting its output failed
    #[error("I/O error while running converter: {0}")]
    Io(#[from] io::Error),
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
