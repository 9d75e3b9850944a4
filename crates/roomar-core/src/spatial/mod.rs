//! Spatial primitives for room-space geometry
//!
//! World space is right-handed in the horizontal plane with Y pointing up:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)
//!
//! One world unit is 1/25 of a foot, matching the room generator.

mod point2d;
mod point3d;
mod vector3d;

pub use point2d::Point2D;
pub use point3d::Point3D;
pub use vector3d::Vector3D;

/// Full turn in radians
pub const TAU: f32 = std::f32::consts::TAU;

/// Wrap an angle in radians into `[0, 2π)`.
pub fn normalize_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
