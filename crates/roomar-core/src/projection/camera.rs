//! Virtual camera pose and projection parameters

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3D, Vector3D};

/// Largest pitch accepted by `look_at`, just short of straight up/down
const MAX_LOOK_AT_PITCH: f32 = 89.9 * std::f32::consts::PI / 180.0;

/// Orthonormal camera axes in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vector3D,
    pub up: Vector3D,
    pub forward: Vector3D,
}

/// Camera position and orientation.
///
/// `yaw` turns the view about world up (0 looks down +Z, positive turns toward
/// +X); `pitch` tilts it (positive looks down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3D,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Point3D, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Pose at `position` facing `target`
    pub fn look_at(position: Point3D, target: Point3D) -> Self {
        let direction = (target - position).normalize();
        if direction.magnitude() < 1e-6 {
            return Self::new(position, 0.0, 0.0);
        }
        let yaw = direction.x.atan2(direction.z);
        let pitch = (-direction.y)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-MAX_LOOK_AT_PITCH, MAX_LOOK_AT_PITCH);
        Self::new(position, yaw, pitch)
    }

    /// Camera axes derived directly from the angles, so every pitch
    /// (including straight down) has a well-defined basis.
    pub fn basis(&self) -> CameraBasis {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        CameraBasis {
            right: Vector3D::new(cy, 0.0, -sy),
            up: Vector3D::new(sp * sy, cp, sp * cy),
            forward: Vector3D::new(sy * cp, -sp, cy * cp),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Point3D::ORIGIN, 0.0, 0.0)
    }
}

/// Output surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Planner camera: pose plus perspective parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualCamera {
    pub pose: CameraPose,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
}

impl VirtualCamera {
    pub fn perspective(fov_degrees: f32, viewport: Viewport) -> Self {
        Self {
            pose: CameraPose::default(),
            fov_y: fov_degrees.to_radians(),
            near: 0.1,
            far: 10_000.0,
            viewport,
        }
    }

    pub fn with_pose(mut self, pose: CameraPose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Focal length in normalized device units
    pub fn focal(&self) -> f32 {
        1.0 / (self.fov_y / 2.0).tan()
    }
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::perspective(60.0, Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vector3D, b: Vector3D) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity_basis() {
        let basis = CameraPose::default().basis();
        assert_vec_eq(basis.right, Vector3D::new(1.0, 0.0, 0.0));
        assert_vec_eq(basis.up, Vector3D::UP);
        assert_vec_eq(basis.forward, Vector3D::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_basis_orthonormal_when_looking_down() {
        let basis = CameraPose::new(Point3D::ORIGIN, 0.3, FRAC_PI_2).basis();
        assert!(basis.right.dot(&basis.up).abs() < 1e-5);
        assert!(basis.up.dot(&basis.forward).abs() < 1e-5);
        assert!((basis.forward.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_faces_target() {
        let pose = CameraPose::look_at(Point3D::new(0.0, 100.0, -100.0), Point3D::ORIGIN);
        let forward = pose.basis().forward;
        let expected = Vector3D::new(0.0, -1.0, 1.0).normalize();
        assert_vec_eq(forward, expected);
    }

    #[test]
    fn test_focal_for_ninety_degrees() {
        let cam = VirtualCamera::perspective(90.0, Viewport::new(100, 100));
        assert!((cam.focal() - 1.0).abs() < 1e-5);
    }
}
