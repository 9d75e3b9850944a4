//! Stand-in collaborators for running without camera hardware or a real
//! marker detector, plus a sample classroom layout.

mod color_key;
mod image_dir;
mod synthetic;

pub use color_key::ColorKeyDetector;
pub use image_dir::ImageDirCamera;
pub use synthetic::{SyntheticCamera, SYNTHETIC_MARKERS};

use roomar_core::{ObjectKind, Point3D};

/// Furniture for a small classroom: podium at the front, two rows of desks
/// with chairs, a cabinet in the corner. Positions are fractions of the
/// room's half extents, so the layout scales with the room.
pub fn classroom_layout() -> Vec<(ObjectKind, f32, f32)> {
    let mut layout = vec![(ObjectKind::Podium, 0.0, -0.7)];
    for row in [-0.1, 0.35] {
        for col in [-0.5, 0.0, 0.5] {
            layout.push((ObjectKind::Desk, col, row));
            layout.push((ObjectKind::Chair, col, row + 0.15));
        }
    }
    layout.push((ObjectKind::Cabinet, 0.85, -0.85));
    layout
}

/// Floor point for a layout entry in a room of `width` × `depth` units
pub fn layout_point(fx: f32, fz: f32, width: f32, depth: f32) -> Point3D {
    Point3D::new(fx * width / 2.0, 0.0, fz * depth / 2.0)
}
