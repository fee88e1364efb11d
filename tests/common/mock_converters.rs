//! Stand-in PDF converters
//!
//! None of these spawn a process, so PDF tests run without a converter
//! installed on the machine.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use ecg_graph::{ConversionError, Converter};

/// Minimal bytes every PDF starts and ends with
pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n%%EOF\n";

/// Writes [`FAKE_PDF`] and counts its calls
#[derive(Default)]
pub struct FakePdfConverter {
    calls: Cell<usize>,
}

impl FakePdfConverter {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Converter for FakePdfConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        self.calls.set(self.calls.get() + 1);
        assert!(input.exists(), "page must exist while converting");
        fs::write(output, FAKE_PDF)?;
        Ok(())
    }
}

/// Leaves a partial file behind, then reports a non-zero exit
pub struct FailingConverter {
    pub code: i32,
}

impl Converter for FailingConverter {
    fn convert(&self, _input: &Path, output: &Path) -> Result<(), ConversionError> {
        fs::write(output, b"%PDF-1.4\n")?;
        Err(ConversionError::Failed { code: Some(self.code), stderr: "page load failed".to_string() })
    }
}

/// Reports success without writing anything
pub struct SilentConverter;

impl Converter for SilentConverter {
    fn convert(&self, _input: &Path, _output: &Path) -> Result<(), ConversionError> {
        Ok(())
    }
}
