//! Error types for the benchmark pipeline.

use super::DriverError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a benchmark run.
///
/// There is no partial-failure tolerance: the first error raised by any
/// stage ends the run and is surfaced to the caller unchanged.
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Dataset file not found: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Failed to read dataset file '{path}': {source}")]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Truncated read from '{path}': expected {expected} bytes but got {actual}")]
    TruncatedRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset of {size} bytes exceeds the buffer capacity of {capacity} bytes")]
    DatasetExceedsCapacity { size: u64, capacity: usize },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Cannot classify an empty score vector")]
    EmptyScores,

    #[error("Image {index} has label {label} outside of the {classes} configured classes")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        classes: usize,
    },

    #[error("Timer was started while an interval is already open")]
    TimerAlreadyRunning,

    #[error("Timer was stopped without an open interval")]
    TimerNotRunning,

    #[error("Console output failed: {source}")]
    Console {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Configuration validation error for field '{field}': {message}")]
    ConfigValidation { field: String, message: String },
}
