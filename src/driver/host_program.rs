//! Dense-layer programs executed by the host reference driver.

use crate::activation::Activation;
use crate::errors::{DriverError, DriverResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A fully connected layer: `output = activation(weights * input + bias)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// One row per output, one column per input.
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
}

impl DenseLayer {
    pub fn input_size(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn output_size(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f32], output: &mut Vec<f32>) {
        output.clear();
        for (weights_row, &bias_value) in self.weights.iter().zip(self.bias.iter()) {
            let mut sum = bias_value;
            for (&weight, &value) in weights_row.iter().zip(input.iter()) {
                sum += weight * value;
            }
            output.push(sum);
        }

        if let Some(activation) = self.activation {
            activation.apply(output);
        }
    }
}

/// Sequence of dense layers, stored as JSON next to the model manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostProgram {
    pub layers: Vec<DenseLayer>,
}

impl HostProgram {
    pub fn new(layers: Vec<DenseLayer>) -> DriverResult<Self> {
        let program = Self { layers };
        program.validate()?;
        Ok(program)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> DriverResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DriverError::ModelFileUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        let program: HostProgram =
            serde_json::from_str(&content).map_err(|e| DriverError::ModelFileInvalid {
                path: path.to_path_buf(),
                source: e,
            })?;
        program.validate()?;
        Ok(program)
    }

    /// Checks that every layer is rectangular, has a matching bias and
    /// consumes exactly what the previous layer produces.
    fn validate(&self) -> DriverResult<()> {
        if self.layers.is_empty() {
            return Err(DriverError::InvalidProgram {
                message: "at least one layer is required".to_string(),
            });
        }

        let mut previous_output: Option<usize> = None;
        for (index, layer) in self.layers.iter().enumerate() {
            let columns = layer.input_size();
            if layer.output_size() == 0 || columns == 0 {
                return Err(DriverError::InvalidProgram {
                    message: format!("layer {} has empty weights", index),
                });
            }
            if layer.weights.iter().any(|row| row.len() != columns) {
                return Err(DriverError::InvalidProgram {
                    message: format!("layer {} has rows of different lengths", index),
                });
            }
            if layer.bias.len() != layer.output_size() {
                return Err(DriverError::InvalidProgram {
                    message: format!(
                        "layer {} has {} bias values for {} outputs",
                        index,
                        layer.bias.len(),
                        layer.output_size()
                    ),
                });
            }
            if let Some(expected) = previous_output {
                if expected != columns {
                    return Err(DriverError::ProgramShapeMismatch {
                        layer: index,
                        expected: columns,
                        actual: expected,
                    });
                }
            }
            previous_output = Some(layer.output_size());
        }

        Ok(())
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    /// Runs every layer in sequence and returns the last layer's output.
    pub fn execute(&self, input: &[f32]) -> Vec<f32> {
        let mut current = input.to_vec();
        let mut next = Vec::new();
        for layer in &self.layers {
            layer.forward(&current, &mut next);
            std::mem::swap(&mut current, &mut next);
        }
        current
    }
}
