//! Decoding accelerator output scores into class predictions.

use crate::errors::{BenchmarkError, BenchmarkResult};

/// The ten CIFAR-10 class names, indexed by label.
pub const CIFAR_CLASSES: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

/// Index of the largest score.
///
/// Scans left to right with a strict comparison so ties resolve to the lowest
/// index. An empty score vector has no answer and is rejected.
pub fn argmax(scores: &[f32]) -> BenchmarkResult<usize> {
    let (&first, rest) = scores.split_first().ok_or(BenchmarkError::EmptyScores)?;

    let mut max = first;
    let mut max_index = 0;
    for (i, &score) in rest.iter().enumerate() {
        if score > max {
            max = score;
            max_index = i + 1;
        }
    }

    Ok(max_index)
}

/// Human readable name of a class, falling back to its index.
pub fn class_name(class_names: &[String], class: usize) -> String {
    class_names
        .get(class)
        .cloned()
        .unwrap_or_else(|| format!("#{}", class))
}
