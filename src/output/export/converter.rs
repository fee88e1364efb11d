//! External HTML-to-PDF conversion
//!
//! The PDF path treats the converter as a black box: an input document
//! path goes in, a PDF file must exist at the output path when it returns.
//! [`CommandConverter`] runs any command line that follows this contract,
//! substituting `{input}` and `{output}` in its arguments:
//!
//! ```text
//! wkhtmltopdf --quiet --page-size A4 --orientation Portrait {input} {output}
//! chromium --headless --no-pdf-header-footer --print-to-pdf={output} {input}
//! ```
//!
//! The wait is bounded: a converter still running after the timeout is
//! killed and reported as [`ConversionError::Timeout`].

use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ConversionError;

/// Placeholder replaced by the input document path
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the output PDF path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Default bound on a single conversion
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Bytes of converter stderr kept for error reports
const STDERR_TAIL: usize = 2048;

/// Converts an intermediate document into a PDF file
pub trait Converter {
    /// Render `input` to a PDF at `output`, blocking until done
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        (**self).convert(input, output)
    }
}

/// Converter backed by an external program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::wkhtmltopdf()
    }
}

impl CommandConverter {
    /// Arbitrary program; `args` may contain `{input}` and `{output}`
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// `wkhtmltopdf`, A4 portrait
    pub fn wkhtmltopdf() -> Self {
        Self::new(
            "wkhtmltopdf",
            [
                "--quiet",
                "--page-size",
                "A4",
                "--orientation",
                "Portrait",
                INPUT_PLACEHOLDER,
                OUTPUT_PLACEHOLDER,
            ],
        )
    }

    /// Headless Chromium (or Chrome) at `program`; page size comes from the page's `@page` rule
    pub fn chromium(program: impl Into<String>) -> Self {
        Self::new(
            program,
            [
                "--headless",
                "--disable-gpu",
                "--no-pdf-header-footer",
                "--print-to-pdf={output}",
                INPUT_PLACEHOLDER,
            ],
        )
    }

    /// Builder pattern: set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Arguments with both placeholders substituted
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();

        self.args
            .iter()
            .map(|arg| {
                OsString::from(
                    arg.replace(INPUT_PLACEHOLDER, &input)
                        .replace(OUTPUT_PLACEHOLDER, &output),
                )
            })
            .collect()
    }
}

impl Converter for CommandConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        let args = self.arguments(input, output);
        log::debug!("running PDF converter: {} {:?}", self.program, args);

        // stderr goes to an unnamed temp file so a chatty converter can never
        // block on a full pipe while we poll
        let mut stderr_log = tempfile::tempfile()?;

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_log.try_clone()?))
            .spawn()
            .map_err(|source| ConversionError::Spawn { program: self.program.clone(), source })?;

        let status = match wait_with_timeout(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                if let Err(err) = child.kill() {
                    log::debug!("killing converter failed: {err}");
                }
                child.wait()?;
                log::warn!("PDF converter {} timed out after {:?}", self.program, self.timeout);
                return Err(ConversionError::Timeout { timeout: self.timeout });
            }
        };

        if status.success() {
            return Ok(());
        }

        let stderr = read_tail(&mut stderr_log)?;
        log::warn!("PDF converter {} failed with {status}", self.program);
        Err(ConversionError::Failed { code: status.code(), stderr })
    }
}

/// Poll until the child exits or `timeout` elapses; `None` means still running
/// Wait for `child`, giving up after `timeout`
///
/// A timeout too large to express as a deadline waits without bound.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let Some(deadline) = Instant::now().checked_add(timeout) else {
        return child.wait().map(Some);
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

fn read_tail(file: &mut File) -> std::io::Result<String> {
    let len = file.seek(SeekFrom::End(0))?;
    let start = len.saturating_sub(STDERR_TAIL as u64);
    file.seek(SeekFrom::Start(start))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_arguments_substitute_placeholders() {
        let converter = CommandConverter::chromium("chromium");
        let args = converter.arguments(Path::new("/tmp/page.html"), Path::new("/out/graph.pdf"));
        assert!(args.contains(&OsString::from("--print-to-pdf=/out/graph.pdf")));
        assert_eq!(args.last().unwrap(), &OsString::from("/tmp/page.html"));
    }

    #[test]
    fn test_default_is_wkhtmltopdf_a4_portrait() {
        let converter = CommandConverter::default();
        assert_eq!(converter.program(), "wkhtmltopdf");
        assert_eq!(converter.timeout_duration(), DEFAULT_TIMEOUT);
        let args = converter.arguments(Path::new("in.html"), Path::new("out.pdf"));
        assert!(args.contains(&OsString::from("A4")));
        assert!(args.contains(&OsString::from("Portrait")));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let converter = CommandConverter::new("ecg-graph-no-such-converter", [INPUT_PLACEHOLDER]);
        let err = converter
            .convert(Path::new("in.html"), Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_reports_code_and_stderr() {
        let converter = CommandConverter::new("sh", ["-c", "echo broken page >&2; exit 3"]);
        let err = converter
            .convert(Path::new("in.html"), Path::new("out.pdf"))
            .unwrap_err();
        match err {
            ConversionError::Failed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken page");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_command_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let input: PathBuf = dir.path().join("page.html");
        let output: PathBuf = dir.path().join("page.pdf");
        std::fs::write(&input, "<html></html>").unwrap();

        CommandConverter::new("cp", [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER])
            .convert(&input, &output)
            .unwrap();

        assert!(output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unbounded_timeout_waits_for_exit() {
        let dir = tempfile::tempdir().unwrap();
        let input: PathBuf = dir.path().join("page.html");
        let output: PathBuf = dir.path().join("page.pdf");
        std::fs::write(&input, "<html></html>").unwrap();

        CommandConverter::new("cp", [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER])
            .timeout(Duration::MAX)
            .convert(&input, &output)
            .unwrap();

        assert!(output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_hanging_converter_times_out() {
        let converter = CommandConverter::new("sleep", ["5"]).timeout(Duration::from_millis(100));
        let started = Instant::now();
        let err = converter
            .convert(Path::new("in.html"), Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
