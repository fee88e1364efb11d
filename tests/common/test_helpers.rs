//! Helper functions for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use ecg_graph::output::visualization::PlotConfig;
use ecg_graph::RenderConfig;

/// Sorted names of every entry in `dir`, hidden files included
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("readable test directory")
        .map(|entry| entry.expect("directory entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Write `contents` to `{dir}/{name}` and return its path
pub fn sample_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("writable test directory");
    path
}

/// `n` samples of a 1 Hz, 1 mV sine recorded at 250 Hz
pub fn sine_samples(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 250.0).sin())
        .collect()
}

/// Render configuration with a small chart so tests stay fast
pub fn small_config(dir: &Path) -> RenderConfig {
    RenderConfig::new(dir).plot(PlotConfig::default().size(400, 160))
}
