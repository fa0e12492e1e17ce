//! Host-side reference driver.
//!
//! Emulates the memory model of the accelerator: a flat vector memory where
//! each vector has `array_size` scalar lanes and every tensor occupies a range
//! of vectors. Running the model executes the dense-layer host program over
//! the first input tensor and writes one score per vector (lane 0) of the
//! first output tensor.

use super::host_program::HostProgram;
use super::model_descriptor::{ModelDescriptor, TensorDescriptor};
use super::{AcceleratorDriver, RunOptions};
use crate::errors::{DriverError, DriverResult};
use log::{debug, info};
use std::io::Write;
use std::time::Instant;

struct LoadedModel {
    program: HostProgram,
    input: TensorDescriptor,
    output: TensorDescriptor,
    array_size: usize,
}

/// Reference implementation of [`AcceleratorDriver`] running on the host CPU.
#[derive(Default)]
pub struct HostDriver {
    memory: Vec<f32>,
    loaded: Option<LoadedModel>,
}

impl HostDriver {
    /// Creates a driver with no model loaded.
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Loads a model whose program is already in memory.
    pub fn load_program(
        &mut self,
        model: &ModelDescriptor,
        program: HostProgram,
    ) -> DriverResult<()> {
        model.validate()?;
        let array_size = model.arch.array_size;

        let input = model
            .inputs
            .first()
            .cloned()
            .ok_or_else(|| DriverError::InvalidProgram {
                message: "the model declares no input tensor".to_string(),
            })?;
        let output = model
            .outputs
            .first()
            .cloned()
            .ok_or_else(|| DriverError::InvalidProgram {
                message: "the model declares no output tensor".to_string(),
            })?;

        let input_scalars = input.size * array_size;
        if program.input_size() != input_scalars {
            return Err(DriverError::ProgramShapeMismatch {
                layer: 0,
                expected: program.input_size(),
                actual: input_scalars,
            });
        }
        if program.output_size() != output.size {
            return Err(DriverError::ProgramShapeMismatch {
                layer: program.layers.len(),
                expected: output.size,
                actual: program.output_size(),
            });
        }

        let scalars = model.memory_depth() * array_size;
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(scalars)
            .map_err(|_| DriverError::InvalidArchitecture {
                message: format!("cannot allocate {} scalars of vector memory", scalars),
            })?;
        memory.resize(scalars, 0.0);

        info!(
            "Loaded {} model: input '{}' ({} vectors), output '{}' ({} vectors), {} lanes per vector",
            model.arch.data_type, input.name, input.size, output.name, output.size, array_size
        );
        if !model.consts.is_empty() {
            debug!(
                "{} constants regions mapped, memory depth {} vectors",
                model.consts.len(),
                model.memory_depth()
            );
        }

        self.memory = memory;
        self.loaded = Some(LoadedModel {
            program,
            input,
            output,
            array_size,
        });
        Ok(())
    }

    fn loaded(&self) -> DriverResult<&LoadedModel> {
        self.loaded.as_ref().ok_or(DriverError::ModelNotLoaded)
    }

    fn vector_range(array_size: usize, vector: usize) -> Option<std::ops::Range<usize>> {
        let start = vector.checked_mul(array_size)?;
        Some(start..start.checked_add(array_size)?)
    }
}

impl AcceleratorDriver for HostDriver {
    fn load_model(&mut self, model: &ModelDescriptor) -> DriverResult<()> {
        let program = HostProgram::from_file(model.resolve(&model.prog.file_name))?;
        self.load_program(model, program)
    }

    fn load_input_scalars(
        &mut self,
        model: &ModelDescriptor,
        input_name: &str,
        offset: usize,
        values: &[f32],
    ) -> DriverResult<()> {
        let array_size = self.loaded()?.array_size;
        let tensor = model.input(input_name)?;

        if offset >= tensor.size {
            return Err(DriverError::VectorOffsetOutOfBounds {
                name: tensor.name.clone(),
                offset,
                size: tensor.size,
            });
        }
        if values.len() > array_size {
            return Err(DriverError::TooManyScalars {
                count: values.len(),
                array_size,
            });
        }

        let vector = tensor
            .base
            .checked_add(offset)
            .and_then(|vector| Self::vector_range(array_size, vector))
            .and_then(|range| self.memory.get_mut(range))
            .ok_or_else(|| DriverError::VectorOffsetOutOfBounds {
                name: tensor.name.clone(),
                offset,
                size: tensor.size,
            })?;
        vector[..values.len()].copy_from_slice(values);
        Ok(())
    }

    fn run(&mut self, options: Option<&RunOptions>) -> DriverResult<()> {
        let loaded = self.loaded.as_ref().ok_or(DriverError::ModelNotLoaded)?;
        let started = Instant::now();

        let array_size = loaded.array_size;
        let input = self
            .memory
            .get(loaded.input.base * array_size..loaded.input.end() * array_size)
            .ok_or_else(|| DriverError::DeviceFault {
                message: format!("input tensor '{}' lies outside memory", loaded.input.name),
            })?;
        let scores = loaded.program.execute(input);

        for (i, score) in scores.into_iter().enumerate() {
            let lane = self
                .memory
                .get_mut((loaded.output.base + i) * array_size)
                .ok_or_else(|| DriverError::DeviceFault {
                    message: format!("output tensor '{}' lies outside memory", loaded.output.name),
                })?;
            *lane = score;
        }

        if options.is_some_and(|o| o.trace_execution) {
            debug!("Host program executed in {:?}", started.elapsed());
        }
        Ok(())
    }

    fn output_scalars(
        &mut self,
        model: &ModelDescriptor,
        output_name: &str,
        count: usize,
    ) -> DriverResult<Vec<f32>> {
        let array_size = self.loaded()?.array_size;
        let tensor = model.output(output_name)?;

        if count > tensor.size {
            return Err(DriverError::ScalarCountExceedsTensor {
                name: tensor.name.clone(),
                count,
                size: tensor.size,
            });
        }

        (0..count)
            .map(|offset| {
                tensor
                    .base
                    .checked_add(offset)
                    .and_then(|vector| vector.checked_mul(array_size))
                    .and_then(|lane| self.memory.get(lane))
                    .copied()
                    .ok_or_else(|| DriverError::VectorOffsetOutOfBounds {
                        name: tensor.name.clone(),
                        offset,
                        size: tensor.size,
                    })
            })
            .collect()
    }

    fn print_output_vectors(
        &mut self,
        model: &ModelDescriptor,
        output_name: &str,
        out: &mut dyn Write,
    ) -> DriverResult<()> {
        let array_size = self.loaded()?.array_size;
        let tensor = model.output(output_name)?;

        for i in 0..tensor.size {
            let lanes = tensor
                .base
                .checked_add(i)
                .and_then(|vector| Self::vector_range(array_size, vector))
                .and_then(|range| self.memory.get(range))
                .ok_or_else(|| DriverError::VectorOffsetOutOfBounds {
                    name: tensor.name.clone(),
                    offset: i,
                    size: tensor.size,
                })?;
            let formatted: Vec<String> = lanes.iter().map(|v| format!("{:9.4}", v)).collect();
            writeln!(out, "{:04}: {}", i, formatted.join(" "))
                .map_err(|e| DriverError::OutputWrite { source: e })?;
        }
        Ok(())
    }
}
