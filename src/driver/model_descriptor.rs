//! Model manifest describing program, constants and named tensors.

use crate::errors::{DriverError, DriverResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A file referenced by the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramFile {
    pub file_name: String,
    #[serde(default)]
    pub size: usize,
}

/// A constants file mapped at a vector base address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstsFile {
    pub file_name: String,
    pub base: usize,
    pub size: usize,
}

/// A named tensor occupying `size` vectors starting at `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorDescriptor {
    pub name: String,
    pub base: usize,
    pub size: usize,
}

impl TensorDescriptor {
    /// One past the last vector of the tensor.
    pub fn end(&self) -> usize {
        self.base.saturating_add(self.size)
    }
}

/// Checks that vectors `base..base + size` and all their lanes are addressable.
fn check_region(name: &str, base: usize, size: usize, array_size: usize) -> DriverResult<()> {
    base.checked_add(size)
        .and_then(|end| end.checked_mul(array_size))
        .map(|_| ())
        .ok_or_else(|| DriverError::TensorOutOfAddressSpace {
            name: name.to_string(),
            base,
            size,
        })
}

/// Accelerator architecture the model was compiled for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    #[serde(default = "default_data_type")]
    pub data_type: String,
    /// Number of scalar lanes per vector.
    pub array_size: usize,
}

fn default_data_type() -> String {
    "FP32".to_string()
}

/// Model manifest, normally stored as a `.tmodel` JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub prog: ProgramFile,
    #[serde(default)]
    pub consts: Vec<ConstsFile>,
    pub inputs: Vec<TensorDescriptor>,
    pub outputs: Vec<TensorDescriptor>,
    pub arch: Architecture,
    /// Directory the manifest was loaded from; referenced files resolve against it.
    #[serde(skip)]
    directory: PathBuf,
}

impl ModelDescriptor {
    /// Creates a manifest in memory. Referenced files resolve against the working directory.
    pub fn new(
        prog: ProgramFile,
        inputs: Vec<TensorDescriptor>,
        outputs: Vec<TensorDescriptor>,
        arch: Architecture,
    ) -> Self {
        Self {
            prog,
            consts: Vec::new(),
            inputs,
            outputs,
            arch,
            directory: PathBuf::new(),
        }
    }

    /// Reads and parses a manifest file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DriverResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DriverError::ModelFileUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut model: ModelDescriptor =
            serde_json::from_str(&content).map_err(|e| DriverError::ModelFileInvalid {
                path: path.to_path_buf(),
                source: e,
            })?;
        model.directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        model.validate()?;

        Ok(model)
    }

    /// Rejects a zero lane count and any region whose addresses overflow.
    pub fn validate(&self) -> DriverResult<()> {
        let array_size = self.arch.array_size;
        if array_size == 0 {
            return Err(DriverError::InvalidArchitecture {
                message: "array_size must be greater than 0".to_string(),
            });
        }

        for tensor in self.inputs.iter().chain(self.outputs.iter()) {
            check_region(&tensor.name, tensor.base, tensor.size, array_size)?;
        }
        for consts in &self.consts {
            check_region(&consts.file_name, consts.base, consts.size, array_size)?;
        }
        Ok(())
    }

    pub fn input(&self, name: &str) -> DriverResult<&TensorDescriptor> {
        self.inputs
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DriverError::UnknownTensor {
                kind: "input",
                name: name.to_string(),
            })
    }

    pub fn output(&self, name: &str) -> DriverResult<&TensorDescriptor> {
        self.outputs
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DriverError::UnknownTensor {
                kind: "output",
                name: name.to_string(),
            })
    }

    /// Path of a file referenced by the manifest.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    /// Number of vectors needed to hold every declared tensor and constants region.
    pub fn memory_depth(&self) -> usize {
        let tensors = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .map(TensorDescriptor::end);
        let consts = self
            .consts
            .iter()
            .map(|c| c.base.saturating_add(c.size));
        tensors.chain(consts).max().unwrap_or(0)
    }
}
