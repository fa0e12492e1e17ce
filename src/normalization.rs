//! Per-image channel normalization.
//!
//! Every intensity is scaled to `[0, 1]` and centered on the mean of its own
//! channel within the same image. The statistics are recomputed for each
//! image; the reference model was trained against exactly this centering.

use crate::dataset::{CHANNELS, CifarRecord, PIXELS_PER_CHANNEL};

/// Scales a raw intensity to `[0, 1]`.
#[inline(always)]
pub fn channel_to_float(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Arithmetic mean of the scaled intensities of one channel plane.
///
/// Accumulates in array order in single precision. An empty plane has a mean of 0.
pub fn channel_mean(channel: &[u8]) -> f32 {
    if channel.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0f32;
    for &value in channel {
        sum += channel_to_float(value);
    }
    sum / channel.len() as f32
}

/// Centered feature vectors for one image: one `[r, g, b]` triple per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pixels: Vec<[f32; CHANNELS]>,
    means: [f32; CHANNELS],
}

impl NormalizedImage {
    /// Normalizes a decoded record.
    pub fn from_record(record: &CifarRecord<'_>) -> Self {
        let channels = record.channels();
        let means = channels.map(channel_mean);

        let pixels = (0..PIXELS_PER_CHANNEL)
            .map(|j| {
                [
                    channel_to_float(channels[0][j]) - means[0],
                    channel_to_float(channels[1][j]) - means[1],
                    channel_to_float(channels[2][j]) - means[2],
                ]
            })
            .collect();

        Self { pixels, means }
    }

    /// Feature vectors in row-major pixel order.
    pub fn pixels(&self) -> &[[f32; CHANNELS]] {
        &self.pixels
    }

    /// Per-channel means that were subtracted.
    pub fn means(&self) -> [f32; CHANNELS] {
        self.means
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
