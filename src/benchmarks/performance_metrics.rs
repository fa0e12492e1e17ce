//! Accuracy and throughput bookkeeping for a benchmark run.

use std::fmt;

/// Running statistics, updated once per classified image.
///
/// Accuracy and throughput are derived on demand from the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStatistics {
    total: usize,
    misclassified: usize,
    total_seconds: f64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one classified image.
    pub fn record(&mut self, predicted: usize, expected: usize, seconds: f64) {
        self.total += 1;
        if predicted != expected {
            self.misclassified += 1;
        }
        self.total_seconds += seconds;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn misclassified(&self) -> usize {
        self.misclassified
    }

    /// Cumulative time spent in device execution.
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Fraction of correctly classified images, 0 when nothing was processed.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        1.0 - self.misclassified as f64 / self.total as f64
    }

    /// Images per second of cumulative execution time, 0 when nothing was
    /// processed or no measurable time elapsed.
    ///
    /// This is total images over total time, not the mean of per-image rates.
    pub fn frames_per_second(&self) -> f64 {
        if self.total == 0 || self.total_seconds <= 0.0 {
            return 0.0;
        }
        self.total as f64 / self.total_seconds
    }

    /// Summary line naming the classifier.
    pub fn summary<'a>(&'a self, name: &'a str) -> Summary<'a> {
        Summary { name, stats: self }
    }
}

/// Display adapter for the one-line run summary.
pub struct Summary<'a> {
    name: &'a str,
    stats: &'a RunStatistics,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} images {:.2} accuracy at {:.2} fps",
            self.name,
            self.stats.total(),
            self.stats.accuracy(),
            self.stats.frames_per_second()
        )
    }
}
