//! Immutable camera frames

use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::RgbImage;

/// One captured image plus its position in the capture stream.
///
/// Cloning shares the pixel buffer, so handing a frame to the render loop
/// costs a reference-count bump.
#[derive(Debug, Clone)]
pub struct Frame {
    sequence: u64,
    captured_at: DateTime<Utc>,
    pixels: Arc<RgbImage>,
}

impl Frame {
    pub fn new(sequence: u64, pixels: RgbImage) -> Self {
        Self {
            sequence,
            captured_at: Utc::now(),
            pixels: Arc::new(pixels),
        }
    }

    /// Monotonic per-source counter, starting at 1
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Horizontally flipped copy for selfie-style display. Keeps the
    /// sequence number and capture time.
    pub fn mirrored(&self) -> Frame {
        Frame {
            sequence: self.sequence,
            captured_at: self.captured_at,
            pixels: Arc::new(image::imageops::flip_horizontal(self.pixels.as_ref())),
        }
    }
}
