//! Tests for output decoding and run statistics.

use tcu_cifar_benchmark::benchmarks::RunStatistics;
use tcu_cifar_benchmark::classification::{CIFAR_CLASSES, argmax};
use tcu_cifar_benchmark::errors::BenchmarkError;

#[test]
fn test_argmax_picks_first_maximum() {
    assert_eq!(argmax(&[0.5, 0.9, 0.9, 0.1]).unwrap(), 1);
    assert_eq!(argmax(&[7.0, 7.0, 7.0]).unwrap(), 0);
    assert_eq!(argmax(&[-1.0, -0.5, -2.0]).unwrap(), 1);
    assert_eq!(
        argmax(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0]).unwrap(),
        7
    );
}

#[test]
fn test_argmax_rejects_empty_scores() {
    assert!(matches!(argmax(&[]), Err(BenchmarkError::EmptyScores)));
}

#[test]
fn test_cifar_class_table() {
    assert_eq!(CIFAR_CLASSES.len(), 10);
    assert_eq!(CIFAR_CLASSES[0], "airplane");
    assert_eq!(CIFAR_CLASSES[3], "cat");
    assert_eq!(CIFAR_CLASSES[7], "horse");
}

#[test]
fn test_throughput_is_total_over_cumulative_time() {
    let mut stats = RunStatistics::new();
    stats.record(0, 0, 0.1);
    stats.record(1, 1, 0.2);

    // 2 images over 0.3 s, not the mean of 10 fps and 5 fps.
    assert!((stats.frames_per_second() - 2.0 / 0.3).abs() < 1e-9);
    assert!((stats.frames_per_second() - 7.5).abs() > 0.5);
    assert_eq!(
        stats.summary("ResNet20V2 on CIFAR").to_string(),
        "ResNet20V2 on CIFAR: 2 images 1.00 accuracy at 6.67 fps"
    );
}

#[test]
fn test_accuracy_is_one_minus_error_rate() {
    let mut stats = RunStatistics::new();
    for i in 0..8 {
        let predicted = if i < 2 { (i + 1) % 10 } else { i };
        stats.record(predicted, i, 0.01);
    }

    assert_eq!(stats.total(), 8);
    assert_eq!(stats.misclassified(), 2);
    assert!((stats.accuracy() - 0.75).abs() < 1e-12);
    assert!((stats.total_seconds() - 0.08).abs() < 1e-12);
}
