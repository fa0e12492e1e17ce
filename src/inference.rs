//! Feeding one normalized image through the accelerator.

use crate::driver::{AcceleratorDriver, ModelDescriptor, RunOptions};
use crate::errors::BenchmarkResult;
use crate::normalization::NormalizedImage;
use crate::timer::Timer;

/// Names of the tensors the benchmark reads and writes.
#[derive(Debug, Clone, Copy)]
pub struct TensorBinding<'a> {
    pub input: &'a str,
    pub output: &'a str,
    /// Number of output scores to read back.
    pub classes: usize,
}

/// Output of one inference.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub scores: Vec<f32>,
    /// Time spent inside the device execution call.
    pub seconds: f64,
}

/// Stages every pixel vector of `image` at its spatial offset of the input tensor.
pub fn stage_image<D: AcceleratorDriver + ?Sized>(
    driver: &mut D,
    model: &ModelDescriptor,
    input_name: &str,
    image: &NormalizedImage,
) -> BenchmarkResult<()> {
    for (offset, pixel) in image.pixels().iter().enumerate() {
        driver.load_input_scalars(model, input_name, offset, pixel)?;
    }
    Ok(())
}

/// Runs one image through the accelerator.
///
/// Only the execution call is timed; staging and read-back are excluded. Any
/// failure aborts immediately. The timer interval is closed before a failed
/// execution is reported so it never stays open.
pub fn infer<D, T>(
    driver: &mut D,
    model: &ModelDescriptor,
    binding: TensorBinding<'_>,
    image: &NormalizedImage,
    timer: &mut T,
    options: Option<&RunOptions>,
) -> BenchmarkResult<Inference>
where
    D: AcceleratorDriver + ?Sized,
    T: Timer + ?Sized,
{
    stage_image(driver, model, binding.input, image)?;

    timer.start()?;
    let executed = driver.run(options);
    timer.stop()?;
    executed?;
    let seconds = timer.elapsed_seconds();

    let scores = driver.output_scalars(model, binding.output, binding.classes)?;

    Ok(Inference { scores, seconds })
}
