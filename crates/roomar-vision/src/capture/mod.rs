//! Camera capture on a dedicated thread with a latest-frame slot
//!
//! The device is opened, read and dropped on the capture thread only. The
//! render loop sees nothing but whole [`Frame`](crate::Frame)s through
//! [`FrameSource::latest`] and [`CaptureEvent`]s through
//! [`FrameSource::drain_events`].

mod source;

use std::time::Duration;

use image::RgbImage;

pub use source::FrameSource;

/// Capture-side failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    #[error("Frame read failed: {0}")]
    ReadFailed(String),
}

/// Conditions the capture thread surfaces to the render loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// The device could not be opened; capture has stopped for good
    CameraUnavailable(CaptureError),
    /// `stop()` gave up waiting for the device to be released
    ShutdownTimeout,
}

/// A blocking frame producer, owned by the capture thread
pub trait CaptureDevice: Send {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError>;
}

/// Opens a capture device. Called on the capture thread at each start.
pub trait DeviceOpener: Send + Sync {
    fn open(&self) -> Result<Box<dyn CaptureDevice>, CaptureError>;
}

impl<F> DeviceOpener for F
where
    F: Fn() -> Result<Box<dyn CaptureDevice>, CaptureError> + Send + Sync,
{
    fn open(&self) -> Result<Box<dyn CaptureDevice>, CaptureError> {
        self()
    }
}

/// Capture pacing and shutdown bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Pause between device reads
    pub poll_interval: Duration,
    /// How long `stop()` waits for the device to be released
    pub shutdown_timeout: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            shutdown_timeout: Duration::from_secs(2),
        }
    }
}
