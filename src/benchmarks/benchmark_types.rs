//! Benchmark configuration structures.

use crate::classification::CIFAR_CLASSES;
use crate::dataset::DEFAULT_DATASET_CAPACITY;
use crate::errors::{BenchmarkError, BenchmarkResult};
use crate::live_reporter::DEFAULT_PREVIEW_INTERVAL;
use serde::{Deserialize, Serialize};

/// Configuration of a classification benchmark run.
///
/// Every field is optional in the JSON file; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Classifier name printed in the summary line.
    pub name: String,
    pub model_path: String,
    pub dataset_path: String,
    /// Name of the model input the pixel vectors are staged into.
    pub input_tensor: String,
    /// Name of the model output holding the class scores.
    pub output_tensor: String,
    /// Class names indexed by label; their count is the number of scores read back.
    pub class_names: Vec<String>,
    /// Render the live reporter while running.
    pub print_images: bool,
    /// Images between two full previews.
    pub preview_interval: usize,
    /// Largest dataset file, in bytes, the buffer accepts.
    pub dataset_capacity: usize,
    /// Ask the driver to trace each execution.
    pub trace_execution: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            name: "ResNet20V2 on CIFAR".to_string(),
            model_path: "baseline/resnet20v2_cifar_onnx_zcu104.tmodel".to_string(),
            dataset_path: "test_batch.bin".to_string(),
            input_tensor: "x:0".to_string(),
            output_tensor: "Identity:0".to_string(),
            class_names: CIFAR_CLASSES.iter().map(|c| c.to_string()).collect(),
            print_images: true,
            preview_interval: DEFAULT_PREVIEW_INTERVAL,
            dataset_capacity: DEFAULT_DATASET_CAPACITY,
            trace_execution: false,
        }
    }
}

impl BenchmarkConfig {
    /// Number of classes, which is also the length of the score vector.
    pub fn classes(&self) -> usize {
        self.class_names.len()
    }

    /// Validates the configuration
    pub fn validate(&self) -> BenchmarkResult<()> {
        let non_empty = [
            ("input_tensor", &self.input_tensor),
            ("output_tensor", &self.output_tensor),
            ("model_path", &self.model_path),
            ("dataset_path", &self.dataset_path),
        ];
        for (field, value) in non_empty {
            if value.is_empty() {
                return Err(BenchmarkError::ConfigValidation {
                    field: field.to_string(),
                    message: "Must not be empty".to_string(),
                });
            }
        }

        if self.class_names.is_empty() {
            return Err(BenchmarkError::ConfigValidation {
                field: "class_names".to_string(),
                message: "At least one class is required".to_string(),
            });
        }

        if self.preview_interval == 0 {
            return Err(BenchmarkError::ConfigValidation {
                field: "preview_interval".to_string(),
                message: "Preview interval must be greater than 0".to_string(),
            });
        }

        if self.dataset_capacity == 0 {
            return Err(BenchmarkError::ConfigValidation {
                field: "dataset_capacity".to_string(),
                message: "Dataset capacity must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
