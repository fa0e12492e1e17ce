//! CIFAR binary dataset decoding.
//!
//! The dataset file has no header: it is a plain sequence of records, each
//! holding a one-byte label followed by the red, green and blue planes of a
//! 32x32 image stored row-major. Records are exposed as borrowed views into
//! the buffer, nothing is copied.

use crate::errors::{BenchmarkError, BenchmarkResult};
use log::info;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::slice::ChunksExact;

/// Width of an image in pixels.
pub const IMAGE_WIDTH: usize = 32;

/// Height of an image in pixels.
pub const IMAGE_HEIGHT: usize = 32;

/// Number of pixels in a single channel plane.
pub const PIXELS_PER_CHANNEL: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

/// Number of color channels per image.
pub const CHANNELS: usize = 3;

/// Size in bytes of one labeled record.
pub const RECORD_SIZE: usize = 1 + CHANNELS * PIXELS_PER_CHANNEL;

/// Default capacity of the dataset buffer region.
pub const DEFAULT_DATASET_CAPACITY: usize = 64 * 1024 * 1024;

/// Number of complete records held by a buffer of `buffer_len` bytes.
/// Trailing partial bytes are ignored.
pub fn record_count(buffer_len: usize) -> usize {
    buffer_len / RECORD_SIZE
}

/// One labeled image, borrowed from the dataset buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CifarRecord<'a> {
    label: u8,
    red: &'a [u8],
    green: &'a [u8],
    blue: &'a [u8],
}

impl<'a> CifarRecord<'a> {
    /// Interprets exactly `RECORD_SIZE` bytes as a record.
    fn from_chunk(chunk: &'a [u8]) -> Self {
        let (label, planes) = chunk.split_at(1);
        let (red, rest) = planes.split_at(PIXELS_PER_CHANNEL);
        let (green, blue) = rest.split_at(PIXELS_PER_CHANNEL);

        Self {
            label: label[0],
            red,
            green,
            blue,
        }
    }

    /// Ground-truth class index.
    pub fn label(&self) -> usize {
        self.label as usize
    }

    pub fn red(&self) -> &'a [u8] {
        self.red
    }

    pub fn green(&self) -> &'a [u8] {
        self.green
    }

    pub fn blue(&self) -> &'a [u8] {
        self.blue
    }

    /// The three channel planes in red, green, blue order.
    pub fn channels(&self) -> [&'a [u8]; CHANNELS] {
        [self.red, self.green, self.blue]
    }

    /// RGB intensities of the pixel at row-major position `index`.
    pub fn pixel(&self, index: usize) -> [u8; CHANNELS] {
        [self.red[index], self.green[index], self.blue[index]]
    }
}

/// Lazy sequence of records over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> Records<'a> {
    /// Decodes records from caller-supplied memory. The buffer must stay
    /// untouched for as long as the sequence is consumed.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            chunks: buffer.chunks_exact(RECORD_SIZE),
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = CifarRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(CifarRecord::from_chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Owned dataset buffer, read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct CifarDataset {
    buffer: Vec<u8>,
}

impl CifarDataset {
    /// Wraps an in-memory buffer.
    pub fn from_bytes(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Reads a dataset file into a buffer of at most `capacity` bytes.
    ///
    /// The file size is checked against the capacity before anything is read,
    /// and a short read is reported instead of silently decoding fewer records.
    pub fn load<P: AsRef<Path>>(path: P, capacity: usize) -> BenchmarkResult<Self> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BenchmarkError::DatasetNotFound {
                path: path.to_path_buf(),
            },
            _ => BenchmarkError::Storage {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let size = metadata.len();
        if size > capacity as u64 {
            return Err(BenchmarkError::DatasetExceedsCapacity { size, capacity });
        }
        let expected = size as usize;

        info!("Reading CIFAR test images from {}...", path.display());

        let file = File::open(path).map_err(|source| BenchmarkError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        let buffer = read_exact_size(file, expected, path)?;

        let dataset = Self { buffer };
        info!(
            "Loaded {} bytes holding {} images",
            dataset.byte_len(),
            dataset.len()
        );
        Ok(dataset)
    }

    /// Number of complete records.
    pub fn len(&self) -> usize {
        record_count(self.buffer.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Restartable record sequence; every call starts from the first record.
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.buffer)
    }

    pub fn get(&self, index: usize) -> Option<CifarRecord<'_>> {
        let start = index.checked_mul(RECORD_SIZE)?;
        let end = start.checked_add(RECORD_SIZE)?;
        self.buffer.get(start..end).map(CifarRecord::from_chunk)
    }
}

/// Reads exactly `expected` bytes, reporting a short read as `TruncatedRead`.
fn read_exact_size<R: Read>(reader: R, expected: usize, path: &Path) -> BenchmarkResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(expected);
    reader
        .take(expected as u64)
        .read_to_end(&mut buffer)
        .map_err(|source| BenchmarkError::Storage {
            path: path.to_path_buf(),
            source,
        })?;

    if buffer.len() != expected {
        return Err(BenchmarkError::TruncatedRead {
            path: path.to_path_buf(),
            expected,
            actual: buffer.len(),
        });
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader failing after the first chunk.
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::other("device removed"));
            }
            self.served = true;
            buf[0] = 1;
            Ok(1)
        }
    }

    fn record_bytes(label: u8, red: u8, green: u8, blue: u8) -> Vec<u8> {
        let mut bytes = vec![label];
        bytes.extend(std::iter::repeat_n(red, PIXELS_PER_CHANNEL));
        bytes.extend(std::iter::repeat_n(green, PIXELS_PER_CHANNEL));
        bytes.extend(std::iter::repeat_n(blue, PIXELS_PER_CHANNEL));
        bytes
    }

    #[test]
    fn test_record_splits_planes() {
        let bytes = record_bytes(4, 10, 20, 30);
        let record = CifarRecord::from_chunk(&bytes);

        assert_eq!(record.label(), 4);
        assert!(record.red().iter().all(|&v| v == 10));
        assert!(record.green().iter().all(|&v| v == 20));
        assert!(record.blue().iter().all(|&v| v == 30));
        assert_eq!(record.pixel(17), [10, 20, 30]);
    }

    #[test]
    fn test_get_out_of_range() {
        let dataset = CifarDataset::from_bytes(record_bytes(1, 0, 0, 0));
        assert!(dataset.get(0).is_some());
        assert!(dataset.get(1).is_none());
        assert!(dataset.get(usize::MAX).is_none());
    }

    #[test]
    fn test_short_read_is_truncated() {
        let path = Path::new("test_batch.bin");
        let result = read_exact_size(Cursor::new(vec![0u8; 100]), RECORD_SIZE, path);
        assert!(matches!(
            result,
            Err(BenchmarkError::TruncatedRead { expected, actual: 100, .. }) if expected == RECORD_SIZE
        ));

        let buffer = read_exact_size(Cursor::new(vec![7u8; 10]), 4, path).unwrap();
        assert_eq!(buffer, vec![7u8; 4]);
    }

    #[test]
    fn test_read_failure_is_storage_error() {
        let result = read_exact_size(FailingReader { served: false }, 8, Path::new("test_batch.bin"));
        assert!(matches!(result, Err(BenchmarkError::Storage { .. })));
    }
}
