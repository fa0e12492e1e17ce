//! Benchmark orchestration for classification workloads.
//!
//! Ties the dataset decoder, normalizer, inference orchestrator and
//! classifier together into a single sequential run, and carries the
//! configuration and statistics of that run.

pub mod benchmark_runner;
pub mod benchmark_types;
pub mod performance_metrics;

pub use benchmark_runner::{BenchmarkRunner, ConfigLoader};
pub use benchmark_types::BenchmarkConfig;
pub use performance_metrics::{RunStatistics, Summary};
