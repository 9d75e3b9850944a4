//! Fiducial marker detections and their overlay bindings

mod binding;
mod bridge;

use image::RgbImage;
use roomar_core::Point2D;

pub use binding::{MarkerBinding, MarkerBindings};
pub use bridge::MarkerBridge;

/// Errors a detector may report for a frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectorError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Detection failed: {0}")]
    Failed(String),
}

/// Detector output as reported, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawMarker {
    pub id: i64,
    pub corners: [Point2D; 4],
}

impl RawMarker {
    pub fn new(id: i64, corners: [Point2D; 4]) -> Self {
        Self { id, corners }
    }
}

/// External marker detector. Synchronous; only [`MarkerBridge`] calls it.
pub trait MarkerDetector {
    fn detect(&mut self, pixels: &RgbImage) -> Result<Vec<RawMarker>, DetectorError>;
}

/// One marker found in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDetection {
    pub id: u32,
    /// Frame pixel coordinates, in detector winding order
    pub corners: [Point2D; 4],
    pub frame_sequence: u64,
}
