//! Synthetic camera: a moving scene with colour-keyed marker squares

use std::f32::consts::TAU;
use std::thread;
use std::time::Duration;

use image::{Rgb, RgbImage};
use roomar_core::Color;
use roomar_vision::{CaptureDevice, CaptureError, DeviceOpener};

/// Marker squares painted by [`SyntheticCamera`], as (marker id, key color)
pub const SYNTHETIC_MARKERS: [(i64, Color); 3] = [
    (23, Color::rgb(255, 0, 255)),
    (24, Color::rgb(0, 255, 255)),
    (26, Color::rgb(255, 128, 0)),
];

/// Fake camera producing a slowly animated frame per read
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frame_interval: Duration,
    tick: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            frame_interval: Duration::from_millis(33),
            tick: 0,
        }
    }

    /// Simulated exposure time per read
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Opener for the synthetic device list: only index 0 exists
    pub fn opener(device_index: u32, width: u32, height: u32) -> impl DeviceOpener + 'static {
        move || -> Result<Box<dyn CaptureDevice>, CaptureError> {
            if device_index == 0 {
                Ok(Box::new(SyntheticCamera::new(width, height)))
            } else {
                Err(CaptureError::Unavailable(format!(
                    "no capture device at index {device_index}"
                )))
            }
        }
    }

    /// Render frame number `tick` without waiting
    pub fn render(&self, tick: u32) -> RgbImage {
        let (w, h) = (self.width, self.height);
        let shift = tick % 200;
        // Blue channel fixed at 60 so the background never matches a key color
        let mut img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([
                ((x + shift) % 200) as u8,
                ((y * 200) / h) as u8,
                60,
            ])
        });

        let side = (w.min(h) / 6).max(4);
        let phase = tick as f32 * 0.05;
        for (i, (_, key)) in SYNTHETIC_MARKERS.iter().enumerate() {
            let angle = phase + i as f32 * TAU / SYNTHETIC_MARKERS.len() as f32;
            let cx = w as f32 / 2.0 + angle.cos() * w as f32 * 0.3;
            let cy = h as f32 / 2.0 + angle.sin() * h as f32 * 0.25;
            let x0 = (cx - side as f32 / 2.0).max(0.0) as u32;
            let y0 = (cy - side as f32 / 2.0).max(0.0) as u32;
            for y in y0..(y0 + side).min(h) {
                for x in x0..(x0 + side).min(w) {
                    img.put_pixel(x, y, Rgb(key.to_array()));
                }
            }
        }
        img
    }
}

impl CaptureDevice for SyntheticCamera {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        thread::sleep(self.frame_interval);
        self.tick = self.tick.wrapping_add(1);
        Ok(self.render(self.tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_every_key() {
        let cam = SyntheticCamera::new(320, 240);
        let img = cam.render(3);
        for (_, key) in SYNTHETIC_MARKERS {
            assert!(img.pixels().any(|p| p.0 == key.to_array()), "missing {key}");
        }
    }

    #[test]
    fn test_only_index_zero_opens() {
        assert!(SyntheticCamera::opener(0, 32, 32).open().is_ok());
        assert!(matches!(
            SyntheticCamera::opener(2, 32, 32).open(),
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[test]
    fn test_frames_animate() {
        let mut cam = SyntheticCamera::new(64, 48).with_frame_interval(Duration::ZERO);
        let a = cam.read_frame().unwrap();
        let b = cam.read_frame().unwrap();
        assert_ne!(a, b);
    }
}
