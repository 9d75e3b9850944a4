use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::{MarkerDetection, MarkerDetector, RawMarker};
use crate::frame::Frame;

/// Wraps a detector and turns its output into clean, de-duplicated records.
///
/// Detector errors and panics never escape: they are logged and the frame
/// yields no detections.
pub struct MarkerBridge {
    detector: Box<dyn MarkerDetector>,
}

impl MarkerBridge {
    pub fn new(detector: impl MarkerDetector + 'static) -> Self {
        Self {
            detector: Box::new(detector),
        }
    }

    pub fn detect(&mut self, frame: &Frame) -> Vec<MarkerDetection> {
        let detector = &mut self.detector;
        let raw = match panic::catch_unwind(AssertUnwindSafe(|| detector.detect(frame.pixels()))) {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("Marker detection failed on frame {}: {}", frame.sequence(), e);
                return Vec::new();
            }
            Err(payload) => {
                warn!(
                    "Marker detector panicked on frame {}: {}",
                    frame.sequence(),
                    panic_message(payload.as_ref())
                );
                return Vec::new();
            }
        };

        let detections = normalize(raw, frame.sequence());
        debug!("Frame {}: {} marker(s)", frame.sequence(), detections.len());
        detections
    }
}

impl std::fmt::Debug for MarkerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerBridge").finish_non_exhaustive()
    }
}

/// Drop invalid records, then keep the last record per id, at the position
/// that last record held in detector order.
fn normalize(raw: Vec<RawMarker>, frame_sequence: u64) -> Vec<MarkerDetection> {
    let valid = raw.into_iter().filter_map(|m| {
        let id = match u32::try_from(m.id) {
            Ok(id) => id,
            Err(_) => {
                debug!("Dropping marker with invalid id {}", m.id);
                return None;
            }
        };
        if !m.corners.iter().all(|c| c.is_finite()) {
            debug!("Dropping marker {} with non-finite corners", id);
            return None;
        }
        Some(MarkerDetection {
            id,
            corners: m.corners,
            frame_sequence,
        })
    });

    let mut seen = HashSet::new();
    let mut kept: Vec<MarkerDetection> = valid
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .filter(|d| seen.insert(d.id))
        .collect();
    kept.reverse();
    kept
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
