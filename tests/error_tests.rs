//! Tests for error types and configuration loading failures.

use std::error::Error;
use std::fs;
use tcu_cifar_benchmark::benchmarks::{BenchmarkConfig, ConfigLoader};
use tcu_cifar_benchmark::errors::{BenchmarkError, DriverError};

#[cfg(test)]
mod config_loader_tests {
    use super::*;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_benchmark_config(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config.name, "ResNet20V2 on CIFAR");
        assert_eq!(config.preview_interval, 100);
        assert!(config.print_images);
    }

    #[test]
    fn test_config_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cifar.json");
        fs::write(
            &path,
            r#"{"name": "Linear on CIFAR", "dataset_path": "data/test_batch.bin", "print_images": false}"#,
        )
        .unwrap();

        let config = ConfigLoader::load_benchmark_config(&path).unwrap();
        assert_eq!(config.name, "Linear on CIFAR");
        assert_eq!(config.dataset_path, "data/test_batch.bin");
        assert!(!config.print_images);
        assert_eq!(config.classes(), 10);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cifar.json");
        fs::write(&path, "{ \"preview_interval\": \"often\" }").unwrap();

        let result = ConfigLoader::load_benchmark_config(&path);
        assert!(matches!(result, Err(BenchmarkError::ConfigParse { .. })));
    }

    #[test]
    fn test_config_with_invalid_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cifar.json");
        fs::write(&path, b"{\"name\": \"X\xff\xfe\", \"print_images\": false}").unwrap();

        let result = ConfigLoader::load_benchmark_config(&path);
        assert!(matches!(result, Err(BenchmarkError::ConfigRead { .. })));
    }

    #[test]
    fn test_config_path_to_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = ConfigLoader::load_benchmark_config(dir.path());
        assert!(matches!(result, Err(BenchmarkError::ConfigRead { .. })));
    }

    #[test]
    fn test_invalid_config_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cifar.json");
        fs::write(&path, r#"{"preview_interval": 0}"#).unwrap();

        let result = ConfigLoader::load_benchmark_config(&path);
        assert!(matches!(
            result,
            Err(BenchmarkError::ConfigValidation { field, .. }) if field == "preview_interval"
        ));
    }

    #[test]
    fn test_empty_class_list_is_rejected() {
        let config = BenchmarkConfig {
            class_names: vec![],
            ..BenchmarkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BenchmarkError::ConfigValidation { field, .. }) if field == "class_names"
        ));
    }
}

#[cfg(test)]
mod error_message_tests {
    use super::*;

    #[test]
    fn test_driver_error_is_transparent() {
        let error = BenchmarkError::from(DriverError::UnknownTensor {
            kind: "output",
            name: "Identity:0".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "The model has no output tensor named 'Identity:0'"
        );
    }

    #[test]
    fn test_capacity_message() {
        let error = BenchmarkError::DatasetExceedsCapacity {
            size: 30_730_000,
            capacity: 1_048_576,
        };
        assert_eq!(
            error.to_string(),
            "Dataset of 30730000 bytes exceeds the buffer capacity of 1048576 bytes"
        );
    }

    #[test]
    fn test_empty_scores_message() {
        assert_eq!(
            BenchmarkError::EmptyScores.to_string(),
            "Cannot classify an empty score vector"
        );
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let error = BenchmarkError::Storage {
            path: "test_batch.bin".into(),
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read"),
        };
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("Failed to read dataset file 'test_batch.bin'"));
    }

    #[test]
    fn test_device_fault_message() {
        let error = DriverError::DeviceFault {
            message: "DMA stalled".to_string(),
        };
        assert_eq!(error.to_string(), "Device fault: DMA stalled");
    }
}
