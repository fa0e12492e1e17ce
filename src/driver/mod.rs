//! Accelerator driver capability surface.
//!
//! The benchmark only needs a handful of operations from a driver: load a
//! model, stage input scalars into a named tensor, run synchronously and read
//! a named output tensor back. Tensors are always addressed by the names the
//! model declares (for example `x:0` and `Identity:0`), never by position.
//!
//! # Usage
//!
//! ```ignore
//! use tcu_cifar_benchmark::driver::{AcceleratorDriver, HostDriver, ModelDescriptor};
//!
//! let model = ModelDescriptor::from_file("model.tmodel")?;
//! let mut driver = HostDriver::initialize();
//! driver.load_model(&model)?;
//! driver.load_input_scalars(&model, "x:0", 0, &[0.1, 0.2, 0.3])?;
//! driver.run(None)?;
//! let scores = driver.output_scalars(&model, "Identity:0", 10)?;
//! ```

pub mod host_driver;
pub mod host_program;
pub mod model_descriptor;

pub use host_driver::HostDriver;
pub use host_program::{DenseLayer, HostProgram};
pub use model_descriptor::{
    Architecture, ConstsFile, ModelDescriptor, ProgramFile, TensorDescriptor,
};

use crate::errors::DriverResult;
use std::io::Write;

/// Options for a single execution of the loaded model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log how long the device spent executing.
    pub trace_execution: bool,
}

/// Operations the benchmark needs from an accelerator driver.
pub trait AcceleratorDriver {
    /// Loads a model so that subsequent runs execute it.
    fn load_model(&mut self, model: &ModelDescriptor) -> DriverResult<()>;

    /// Writes `values` into vector `offset` of the named input tensor.
    fn load_input_scalars(
        &mut self,
        model: &ModelDescriptor,
        input_name: &str,
        offset: usize,
        values: &[f32],
    ) -> DriverResult<()>;

    /// Executes the loaded model on the staged inputs. Blocks until done.
    fn run(&mut self, options: Option<&RunOptions>) -> DriverResult<()>;

    /// Reads `count` scalars from the named output tensor.
    fn output_scalars(
        &mut self,
        model: &ModelDescriptor,
        output_name: &str,
        count: usize,
    ) -> DriverResult<Vec<f32>>;

    /// Writes the full vectors of the named output tensor for diagnostics.
    fn print_output_vectors(
        &mut self,
        model: &ModelDescriptor,
        output_name: &str,
        out: &mut dyn Write,
    ) -> DriverResult<()>;
}
