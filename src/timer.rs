//! Wall-clock timing of device execution.

use crate::errors::{BenchmarkError, BenchmarkResult};
use std::time::{Duration, Instant};

/// A timer with at most one open interval at a time.
pub trait Timer {
    /// Opens an interval.
    fn start(&mut self) -> BenchmarkResult<()>;

    /// Closes the open interval.
    fn stop(&mut self) -> BenchmarkResult<()>;

    /// Length of the last closed interval in seconds.
    fn elapsed_seconds(&self) -> f64;
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn start(&mut self) -> BenchmarkResult<()> {
        (**self).start()
    }

    fn stop(&mut self) -> BenchmarkResult<()> {
        (**self).stop()
    }

    fn elapsed_seconds(&self) -> f64 {
        (**self).elapsed_seconds()
    }
}

/// Timer backed by the monotonic system clock.
#[derive(Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Timer for Stopwatch {
    fn start(&mut self) -> BenchmarkResult<()> {
        if self.started.is_some() {
            return Err(BenchmarkError::TimerAlreadyRunning);
        }
        self.started = Some(Instant::now());
        Ok(())
    }

    fn stop(&mut self) -> BenchmarkResult<()> {
        let started = self.started.take().ok_or(BenchmarkError::TimerNotRunning)?;
        self.elapsed = started.elapsed();
        Ok(())
    }

    fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
