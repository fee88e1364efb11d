//! Example: a 10-second rhythm strip in every format
//!
//! Renders a synthetic recording to PNG and JPEG, then tries PDF through
//! `wkhtmltopdf`. The PDF step is reported and skipped when the converter is
//! not installed. A 40-second recording is then cut into 8-second strips,
//! four per page.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example render_strip -- /tmp/ecg
//! ```
//!
//! The output directory defaults to the system temp directory.

use std::env;
use std::path::PathBuf;

use ecg_graph::prelude::*;

/// Crude sinus rhythm at 250 Hz, 75 bpm
fn synthetic_strip(seconds: f64) -> Vec<f64> {
    let samples = (seconds * 250.0) as usize;
    (0..samples)
        .map(|i| {
            let t = i as f64 / 250.0;
            let beat = t % 0.8;
            let p = 0.15 * (-((beat - 0.10) / 0.025).powi(2)).exp();
            let q = -0.10 * (-((beat - 0.19) / 0.008).powi(2)).exp();
            let r = 1.20 * (-((beat - 0.21) / 0.010).powi(2)).exp();
            let s = -0.25 * (-((beat - 0.23) / 0.010).powi(2)).exp();
            let t_wave = 0.30 * (-((beat - 0.45) / 0.050).powi(2)).exp();
            p + q + r + s + t_wave
        })
        .collect()
}

fn main() {
    env_logger::init();

    let output_dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir);

    let samples = synthetic_strip(10.0);
    println!("Rendering {} samples into {}", samples.len(), output_dir.display());

    for format in [ExportFormat::Png, ExportFormat::Jpg, ExportFormat::Pdf] {
        let config = RenderConfig::new(&output_dir)
            .export_to(format)
            .output_file_name("rhythm_strip")
            .overwrite(true)
            .title("Lead II rhythm strip")
            .add_metadata("Source", "synthetic");

        match render_ecg_graph(samples.clone(), &config) {
            Ok(report) => {
                println!("  {:<4} → {}", format, report.path.display());
                for (label, value) in &report.display_information {
                    println!("         {label}: {value}");
                }
            }
            Err(EcgGraphError::PdfConversion(err)) => {
                println!("  {:<4} skipped: {err}", format);
            }
            Err(err) => {
                eprintln!("  {:<4} failed: {err}", format);
                std::process::exit(1);
            }
        }
    }

    let config = RenderConfig::new(&output_dir)
        .export_to(ExportFormat::Png)
        .output_file_name("rhythm_strip_pages")
        .overwrite(true)
        .plot(PlotConfig::rhythm_strip().size(1600, 1200))
        .title("Lead II, 8 s strips");

    match render_ecg_graph(synthetic_strip(40.0), &config) {
        Ok(report) => println!("  strips → {}", report.path.display()),
        Err(err) => {
            eprintln!("  strips failed: {err}");
            std::process::exit(1);
        }
    }
}
