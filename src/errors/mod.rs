//! Error types for the benchmark harness.
//!
//! `BenchmarkError` covers the harness; `DriverError` covers the accelerator
//! driver and converts into `BenchmarkError` transparently.

mod benchmark_error;
mod driver_error;

pub use benchmark_error::BenchmarkError;
pub use driver_error::DriverError;

/// Result type alias for benchmark pipeline operations.
pub type BenchmarkResult<T> = std::result::Result<T, BenchmarkError>;

/// Result type alias for accelerator driver operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;
