//! Error types for accelerator driver operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an accelerator driver or while reading a model manifest.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to read model file '{path}': {source}")]
    ModelFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse model file '{path}': {source}")]
    ModelFileInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No model is loaded on the driver")]
    ModelNotLoaded,

    #[error("The model has no {kind} tensor named '{name}'")]
    UnknownTensor { kind: &'static str, name: String },

    #[error("Vector offset {offset} is out of bounds for tensor '{name}' of {size} vectors")]
    VectorOffsetOutOfBounds {
        name: String,
        offset: usize,
        size: usize,
    },

    #[error("Tensor '{name}' at vector {base} with {size} vectors exceeds the addressable memory")]
    TensorOutOfAddressSpace {
        name: String,
        base: usize,
        size: usize,
    },

    #[error("Cannot stage {count} scalars into a vector of {array_size} lanes")]
    TooManyScalars { count: usize, array_size: usize },

    #[error("Requested {count} scalars from tensor '{name}' which only holds {size} vectors")]
    ScalarCountExceedsTensor {
        name: String,
        count: usize,
        size: usize,
    },

    #[error("Host program layer {layer} expects {expected} inputs but receives {actual}")]
    ProgramShapeMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid host program: {message}")]
    InvalidProgram { message: String },

    #[error("Invalid architecture: {message}")]
    InvalidArchitecture { message: String },

    #[error("Device fault: {message}")]
    DeviceFault { message: String },

    #[error("Failed to write output vectors: {source}")]
    OutputWrite { source: std::io::Error },
}
