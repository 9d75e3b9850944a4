//! Pinhole projection from room space to viewport pixels

use super::camera::VirtualCamera;
use crate::scene::Object3D;
use crate::spatial::{Point2D, Point3D, Vector3D};

/// Depth floor below which a point counts as at/behind the camera,
/// regardless of how small the configured near plane is.
pub const MIN_DEPTH: f32 = 1e-3;

/// A world-space ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3D,
    pub direction: Vector3D,
}

impl Ray {
    pub fn at(&self, t: f32) -> Point3D {
        self.origin + self.direction * t
    }
}

/// One object face after projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    /// Screen polygon, same vertex order as the source face
    pub points: Vec<Point2D>,
    /// World-space face normal (from the first three vertices)
    pub normal: Vector3D,
    pub tint: f32,
}

/// Stateless pinhole projector. Safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projector;

impl Projector {
    pub fn new() -> Self {
        Self
    }

    /// World point expressed in camera axes: (right, up, depth)
    pub fn camera_space(&self, point: Point3D, camera: &VirtualCamera) -> Vector3D {
        let basis = camera.pose.basis();
        let rel = point - camera.pose.position;
        Vector3D::new(rel.dot(&basis.right), rel.dot(&basis.up), rel.dot(&basis.forward))
    }

    /// Project a world point into viewport pixels.
    ///
    /// Returns `None` when the camera-space depth is at or below the near
    /// clip (never less than [`MIN_DEPTH`]); callers skip drawing such points.
    pub fn project(&self, point: Point3D, camera: &VirtualCamera) -> Option<Point2D> {
        let local = self.camera_space(point, camera);
        let near = camera.near.max(MIN_DEPTH);
        if !(local.z > near) {
            return None;
        }

        let f = camera.focal();
        let x_ndc = local.x * f / (local.z * camera.aspect());
        let y_ndc = local.y * f / local.z;

        let width = camera.viewport.width as f32;
        let height = camera.viewport.height as f32;
        let screen = Point2D::new(
            (x_ndc * 0.5 + 0.5) * width,
            (1.0 - (y_ndc * 0.5 + 0.5)) * height,
        );
        screen.is_finite().then_some(screen)
    }

    /// Project a polygon, all or nothing. Output order matches input order.
    pub fn project_polygon(&self, vertices: &[Point3D], camera: &VirtualCamera) -> Option<Vec<Point2D>> {
        vertices.iter().map(|v| self.project(*v, camera)).collect()
    }

    /// Project every face of an object in template order.
    ///
    /// `None` if any vertex is not projectable, or if the whole object lies
    /// beyond the far plane; the object is then skipped rather than drawn
    /// degenerate.
    pub fn project_object(&self, object: &Object3D, camera: &VirtualCamera) -> Option<Vec<ProjectedFace>> {
        let faces = object.world_faces();

        let beyond_far = faces
            .iter()
            .flat_map(|f| f.vertices.iter())
            .all(|v| self.camera_space(*v, camera).z > camera.far);
        if beyond_far {
            return None;
        }

        faces
            .iter()
            .map(|face| {
                let points = self.project_polygon(&face.vertices, camera)?;
                Some(ProjectedFace {
                    points,
                    normal: face_normal(&face.vertices),
                    tint: face.tint,
                })
            })
            .collect()
    }

    /// Ray from the camera through a viewport pixel
    pub fn screen_to_ray(&self, x: f32, y: f32, camera: &VirtualCamera) -> Ray {
        let width = camera.viewport.width.max(1) as f32;
        let height = camera.viewport.height.max(1) as f32;
        let x_ndc = (x / width) * 2.0 - 1.0;
        let y_ndc = 1.0 - (y / height) * 2.0;

        let tan_half = (camera.fov_y / 2.0).tan();
        let dx = x_ndc * camera.aspect() * tan_half;
        let dy = y_ndc * tan_half;

        let basis = camera.pose.basis();
        let direction = (basis.right * dx + basis.up * dy + basis.forward).normalize();
        Ray {
            origin: camera.pose.position,
            direction,
        }
    }

    /// Where the ray through a pixel meets the horizontal plane `y = floor_y`.
    ///
    /// A ray parallel to the plane yields the point straight below the camera.
    /// A plane behind the camera yields the point one unit along the ray,
    /// dropped onto the plane.
    pub fn unproject_to_floor(&self, x: f32, y: f32, camera: &VirtualCamera, floor_y: f32) -> Point3D {
        let ray = self.screen_to_ray(x, y, camera);
        if ray.direction.y.abs() < 1e-5 {
            return Point3D::new(ray.origin.x, floor_y, ray.origin.z);
        }
        let t = (floor_y - ray.origin.y) / ray.direction.y;
        if t <= 0.0 {
            let ahead = ray.at(1.0);
            return Point3D::new(ahead.x, floor_y, ahead.z);
        }
        let hit = ray.at(t);
        Point3D::new(hit.x, floor_y, hit.z)
    }
}

fn face_normal(vertices: &[Point3D]) -> Vector3D {
    match vertices {
        [a, b, c, ..] => (*b - *a).cross(&(*c - *a)).normalize(),
        _ => Vector3D::ZERO,
    }
}
