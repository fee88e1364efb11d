//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_converters;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_converters::{FailingConverter, FakePdfConverter, SilentConverter};
pub use test_helpers::{file_names, sample_file, sine_samples, small_config};
