//! Core benchmark execution logic.

use super::benchmark_types::BenchmarkConfig;
use super::performance_metrics::RunStatistics;
use crate::classification::argmax;
use crate::console::{Console, TerminalConsole};
use crate::dataset::{CifarDataset, CifarRecord};
use crate::driver::{AcceleratorDriver, ModelDescriptor, RunOptions};
use crate::errors::{BenchmarkError, BenchmarkResult};
use crate::inference::{TensorBinding, infer};
use crate::live_reporter::LiveReporter;
use crate::normalization::NormalizedImage;
use crate::timer::Timer;
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Configuration loader that handles JSON files with fallbacks
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file, falling back to defaults only when it does not exist
    pub fn load_config<T>(path: &Path, config_name: &str) -> BenchmarkResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| BenchmarkError::ConfigParse {
                    path: path.display().to_string(),
                    source: e,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Config file '{}' not found, using default configuration for {}",
                    path.display(),
                    config_name
                );
                Ok(T::default())
            }
            Err(e) => Err(BenchmarkError::ConfigRead {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Load and validate the benchmark configuration
    pub fn load_benchmark_config(path: &Path) -> BenchmarkResult<BenchmarkConfig> {
        let config: BenchmarkConfig = Self::load_config(path, "cifar_benchmark")?;
        config.validate()?;
        Ok(config)
    }
}

/// Drives every image of a dataset through normalization, inference and
/// classification, one image at a time.
///
/// The first failure aborts the run. Statistics only ever count images that
/// were fully classified, and remain readable after a failed run.
pub struct BenchmarkRunner<'a, D: AcceleratorDriver + ?Sized, T: Timer> {
    driver: &'a mut D,
    model: &'a ModelDescriptor,
    config: &'a BenchmarkConfig,
    timer: T,
    statistics: RunStatistics,
}

impl<'a, D: AcceleratorDriver + ?Sized, T: Timer> BenchmarkRunner<'a, D, T> {
    /// The driver must already have `model` loaded.
    pub fn new(
        driver: &'a mut D,
        model: &'a ModelDescriptor,
        config: &'a BenchmarkConfig,
        timer: T,
    ) -> Self {
        Self {
            driver,
            model,
            config,
            timer,
            statistics: RunStatistics::new(),
        }
    }

    /// Statistics of the current or last run.
    pub fn statistics(&self) -> RunStatistics {
        self.statistics
    }

    /// Runs the benchmark without live reporting.
    pub fn run(&mut self, dataset: &CifarDataset) -> BenchmarkResult<RunStatistics> {
        self.run_records::<TerminalConsole<io::Sink>>(dataset, None)
    }

    /// Runs the benchmark while rendering progress through `reporter`.
    ///
    /// The reporter's screen is restored whether the run succeeds or fails.
    pub fn run_with_reporter<C: Console>(
        &mut self,
        dataset: &CifarDataset,
        reporter: &mut LiveReporter<C>,
    ) -> BenchmarkResult<RunStatistics> {
        self.run_records(dataset, Some(reporter))
    }

    fn run_records<C: Console>(
        &mut self,
        dataset: &CifarDataset,
        reporter: Option<&mut LiveReporter<C>>,
    ) -> BenchmarkResult<RunStatistics> {
        self.statistics = RunStatistics::new();
        info!("Testing {} on {} images...", self.config.name, dataset.len());

        let mut session = reporter.map(LiveReporter::session).transpose()?;

        for (index, record) in dataset.records().enumerate() {
            self.process_image(index, &record, session.as_deref_mut())?;
        }

        drop(session);
        Ok(self.statistics)
    }

    fn process_image<C: Console>(
        &mut self,
        index: usize,
        record: &CifarRecord<'_>,
        reporter: Option<&mut LiveReporter<C>>,
    ) -> BenchmarkResult<()> {
        let config = self.config;
        let model = self.model;
        let classes = config.classes();

        let expected = record.label();
        if expected >= classes {
            return Err(BenchmarkError::LabelOutOfRange {
                index,
                label: expected,
                classes,
            });
        }

        let image = NormalizedImage::from_record(record);
        let binding = TensorBinding {
            input: &config.input_tensor,
            output: &config.output_tensor,
            classes,
        };
        let options = RunOptions {
            trace_execution: config.trace_execution,
        };

        let inference = infer(
            &mut *self.driver,
            model,
            binding,
            &image,
            &mut self.timer,
            Some(&options),
        )?;
        let predicted = argmax(&inference.scores)?;
        self.statistics.record(predicted, expected, inference.seconds);

        debug!(
            "Image {}: expected {}, predicted {}, {:.6} s",
            index, expected, predicted, inference.seconds
        );

        if let Some(reporter) = reporter {
            reporter.report_progress(index, inference.seconds)?;

            if reporter.is_preview_frame(index) {
                let driver = &mut *self.driver;
                reporter.render_preview(record, predicted, |out| {
                    driver
                        .print_output_vectors(model, &config.output_tensor, out)
                        .map_err(BenchmarkError::from)
                })?;
            }
        }

        Ok(())
    }
}
