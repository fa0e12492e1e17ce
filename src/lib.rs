//! End-to-end classification benchmark for tensor compute accelerators.
//!
//! This library decodes a CIFAR binary dataset, normalizes every image per
//! channel, streams it through an accelerator driver, classifies the output
//! scores and aggregates accuracy and throughput. An optional live reporter
//! renders progress and image previews to a terminal.

pub mod activation;
pub mod benchmarks;
pub mod classification;
pub mod console;
pub mod dataset;
pub mod driver;
pub mod errors;
pub mod inference;
pub mod live_reporter;
pub mod normalization;
pub mod timer;

pub use benchmarks::{BenchmarkConfig, BenchmarkRunner, RunStatistics};
pub use dataset::{CifarDataset, CifarRecord};
pub use driver::{AcceleratorDriver, HostDriver, ModelDescriptor};
pub use errors::{BenchmarkError, BenchmarkResult, DriverError, DriverResult};
pub use normalization::NormalizedImage;
pub use timer::{Stopwatch, Timer};
