//! Stand-in marker detector that looks for solid colour-keyed squares

use image::RgbImage;
use roomar_core::{Color, Point2D};
use roomar_vision::{DetectorError, MarkerDetector, RawMarker};

use super::synthetic::SYNTHETIC_MARKERS;

/// Reports each key color's pixel bounding box as a marker
#[derive(Debug, Clone)]
pub struct ColorKeyDetector {
    keys: Vec<(i64, Color)>,
    min_pixels: usize,
}

impl ColorKeyDetector {
    pub fn new(keys: Vec<(i64, Color)>) -> Self {
        Self {
            keys,
            min_pixels: 16,
        }
    }

    /// Ignore keys covering fewer than `min_pixels` pixels
    pub fn with_min_pixels(mut self, min_pixels: usize) -> Self {
        self.min_pixels = min_pixels.max(1);
        self
    }
}

impl Default for ColorKeyDetector {
    /// Keys painted by the synthetic camera
    fn default() -> Self {
        Self::new(SYNTHETIC_MARKERS.to_vec())
    }
}

#[derive(Clone, Copy)]
struct Extent {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    count: usize,
}

impl MarkerDetector for ColorKeyDetector {
    fn detect(&mut self, pixels: &RgbImage) -> Result<Vec<RawMarker>, DetectorError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(DetectorError::MalformedFrame("empty frame".to_string()));
        }

        let mut extents: Vec<Option<Extent>> = vec![None; self.keys.len()];
        for (x, y, px) in pixels.enumerate_pixels() {
            let Some(slot) = self.keys.iter().position(|(_, key)| key.to_array() == px.0) else {
                continue;
            };
            let extent = extents[slot].get_or_insert(Extent {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                count: 0,
            });
            extent.min_x = extent.min_x.min(x);
            extent.min_y = extent.min_y.min(y);
            extent.max_x = extent.max_x.max(x);
            extent.max_y = extent.max_y.max(y);
            extent.count += 1;
        }

        let markers = self
            .keys
            .iter()
            .zip(extents)
            .filter_map(|((id, _), extent)| {
                let e = extent.filter(|e| e.count >= self.min_pixels)?;
                let (x0, y0) = (e.min_x as f32, e.min_y as f32);
                let (x1, y1) = (e.max_x as f32 + 1.0, e.max_y as f32 + 1.0);
                Some(RawMarker::new(
                    *id,
                    [
                        Point2D::new(x0, y0),
                        Point2D::new(x1, y0),
                        Point2D::new(x1, y1),
                        Point2D::new(x0, y1),
                    ],
                ))
            })
            .collect();
        Ok(markers)
    }
}
