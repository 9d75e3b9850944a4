//! roomar-vision: the camera side of the pipeline
//!
//! - `capture`: a dedicated capture thread feeding a latest-frame slot
//! - `marker`: detector bridge and marker → object bindings
//! - `compositor`: polygon painting for planner and AR views

pub mod capture;
pub mod compositor;
pub mod frame;
pub mod marker;

pub use capture::{CaptureDevice, CaptureError, CaptureEvent, CaptureSettings, DeviceOpener, FrameSource};
pub use compositor::{Compositor, CompositorStyle, Outline, OverlayLabel, Shape, Stroke};
pub use frame::Frame;
pub use marker::{
    DetectorError, MarkerBinding, MarkerBindings, MarkerBridge, MarkerDetection, MarkerDetector,
    RawMarker,
};
