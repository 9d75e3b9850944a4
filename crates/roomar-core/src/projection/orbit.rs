//! Orbit camera rig for the planner view

use super::camera::CameraPose;
use crate::scene::Room;
use crate::spatial::{normalize_angle, Point3D};

const MAX_ELEVATION_DEG: f32 = 89.0;
const MIN_DISTANCE: f32 = 10.0;
const MIN_FRAMING_DISTANCE: f32 = 1100.0;

/// Camera orbiting a target point at a fixed distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub target: Point3D,
    distance: f32,
    /// Radians about world up, 0 places the camera on +Z
    azimuth: f32,
    /// Radians above the floor plane
    elevation: f32,
}

impl OrbitRig {
    pub fn new(target: Point3D, distance: f32, azimuth_deg: f32, elevation_deg: f32) -> Self {
        let mut rig = Self {
            target,
            distance: MIN_DISTANCE,
            azimuth: 0.0,
            elevation: 0.0,
        };
        rig.set_distance(distance);
        rig.azimuth = normalize_angle(azimuth_deg.to_radians());
        rig.elevation = clamp_elevation(elevation_deg.to_radians());
        rig
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn set_distance(&mut self, distance: f32) {
        if distance.is_finite() {
            self.distance = distance.max(MIN_DISTANCE);
        }
    }

    /// Rotate around the target by the given angles (radians)
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        if d_azimuth.is_finite() {
            self.azimuth = normalize_angle(self.azimuth + d_azimuth);
        }
        if d_elevation.is_finite() {
            self.elevation = clamp_elevation(self.elevation + d_elevation);
        }
    }

    /// Multiply the distance; factors below 1 move closer
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.set_distance(self.distance * factor);
        }
    }

    /// Aim at the room centre, backing off far enough to see all of it.
    /// Never moves the camera closer.
    pub fn frame_room(&mut self, room: &Room) {
        self.target = Point3D::new(0.0, room.height() / 4.0, 0.0);
        let needed = MIN_FRAMING_DISTANCE.max(2.0 * room.largest_side());
        self.set_distance(self.distance.max(needed));
    }

    pub fn eye(&self) -> Point3D {
        let (se, ce) = self.elevation.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        Point3D::new(
            self.target.x + self.distance * ce * sa,
            self.target.y + self.distance * se,
            self.target.z + self.distance * ce * ca,
        )
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::look_at(self.eye(), self.target)
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new(Point3D::ORIGIN, 700.0, 45.0, 35.0)
    }
}

fn clamp_elevation(radians: f32) -> f32 {
    let limit = MAX_ELEVATION_DEG.to_radians();
    if radians.is_finite() {
        radians.clamp(-limit, limit)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RoomDimensions;

    #[test]
    fn test_default_eye_above_floor() {
        let rig = OrbitRig::default();
        let eye = rig.eye();
        assert!(eye.y > 0.0);
        assert!((eye.distance(&rig.target) - 700.0).abs() < 1e-2);
    }

    #[test]
    fn test_pose_faces_target() {
        let rig = OrbitRig::default();
        let pose = rig.pose();
        let to_target = (rig.target - pose.position).normalize();
        assert!(pose.basis().forward.dot(&to_target) > 0.9999);
    }

    #[test]
    fn test_elevation_clamped() {
        let mut rig = OrbitRig::default();
        rig.orbit(0.0, 10.0);
        assert!((rig.elevation() - 89f32.to_radians()).abs() < 1e-6);
        rig.orbit(0.0, -20.0);
        assert!((rig.elevation() + 89f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_ignores_bad_factor() {
        let mut rig = OrbitRig::default();
        rig.zoom(0.5);
        assert!((rig.distance() - 350.0).abs() < 1e-3);
        rig.zoom(-1.0);
        rig.zoom(f32::NAN);
        assert!((rig.distance() - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_room_distance() {
        let mut rig = OrbitRig::default();
        let small = Room::new(RoomDimensions::new(10.0, 10.0, 10.0)).unwrap();
        rig.frame_room(&small);
        assert_eq!(rig.distance(), 1100.0);

        let big = Room::new(RoomDimensions::new(40.0, 30.0, 10.0)).unwrap();
        rig.frame_room(&big);
        assert_eq!(rig.distance(), 2000.0);
    }
}
