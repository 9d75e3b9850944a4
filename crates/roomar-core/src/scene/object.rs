//! Furniture objects and their poses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::template;
use super::SceneError;
use crate::color::Color;
use crate::spatial::{normalize_angle, Point3D, Vector3D};

/// Session-unique object identifier. Never reused, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Furniture kinds. Kinds differ only in geometry template and default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Desk,
    Chair,
    Table,
    Podium,
    Cabinet,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Desk,
        ObjectKind::Chair,
        ObjectKind::Table,
        ObjectKind::Podium,
        ObjectKind::Cabinet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Desk => "desk",
            ObjectKind::Chair => "chair",
            ObjectKind::Table => "table",
            ObjectKind::Podium => "podium",
            ObjectKind::Cabinet => "cabinet",
        }
    }

    pub fn default_color(&self) -> Color {
        match self {
            ObjectKind::Desk | ObjectKind::Chair | ObjectKind::Table => Color::WOOD,
            ObjectKind::Podium => Color::DARK_WOOD,
            ObjectKind::Cabinet => Color::METAL,
        }
    }

    /// Rotation a freshly placed object starts with. Chairs face the desks.
    pub fn default_rotation(&self) -> f32 {
        match self {
            ObjectKind::Chair => std::f32::consts::PI,
            _ => 0.0,
        }
    }

    /// Local-space faces at unit scale
    pub fn template(&self) -> Vec<Face> {
        template::faces_for(*self)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SceneError::UnknownKind(s.to_string()))
    }
}

/// Per-axis scale factors, all finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Scale3 {
    pub const UNIT: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Result<Self, SceneError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(x) && valid(y) && valid(z) {
            Ok(Self { x, y, z })
        } else {
            Err(SceneError::InvalidPose(format!(
                "scale factors must be positive, got ({x}, {y}, {z})"
            )))
        }
    }

    pub fn uniform(factor: f32) -> Result<Self, SceneError> {
        Self::new(factor, factor, factor)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    fn apply(&self, v: Point3D) -> Vector3D {
        Vector3D::new(v.x * self.x, v.y * self.y, v.z * self.z)
    }
}

impl Default for Scale3 {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Position, yaw and scale of a placed object.
///
/// Fields are private so the invariants hold for every value: rotation in
/// `[0, 2π)`, scale factors > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPose {
    position: Point3D,
    rotation: f32,
    scale: Scale3,
}

impl ObjectPose {
    pub fn new(position: Point3D) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: Scale3::UNIT,
        }
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = normalize_angle(radians);
        self
    }

    pub fn with_rotation_degrees(self, degrees: f32) -> Self {
        self.with_rotation(degrees.to_radians())
    }

    pub fn with_scale(mut self, scale: Scale3) -> Self {
        self.scale = scale;
        self
    }

    pub fn position(&self) -> Point3D {
        self.position
    }

    /// Yaw about the vertical axis in radians, in `[0, 2π)`
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Scale3 {
        self.scale
    }

    /// Map a local-space vertex into world space: scale, yaw, translate
    pub fn to_world(&self, local: Point3D) -> Point3D {
        self.position + self.scale.apply(local).rotate_y(self.rotation)
    }

    fn apply(&self, delta: &PoseDelta) -> Result<Self, SceneError> {
        let position = self.position + delta.translation;
        if !position.is_finite() || !delta.rotation.is_finite() {
            return Err(SceneError::InvalidPose(
                "translation and rotation must be finite".to_string(),
            ));
        }
        let scale = Scale3::new(
            self.scale.x * delta.scale_factor.0,
            self.scale.y * delta.scale_factor.1,
            self.scale.z * delta.scale_factor.2,
        )?;
        Ok(Self {
            position,
            rotation: normalize_angle(self.rotation + delta.rotation),
            scale,
        })
    }
}

impl Default for ObjectPose {
    fn default() -> Self {
        Self::new(Point3D::ORIGIN)
    }
}

/// Relative change to an object's pose: move, spin, and multiplicative scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDelta {
    pub translation: Vector3D,
    pub rotation: f32,
    pub scale_factor: (f32, f32, f32),
}

impl PoseDelta {
    pub fn translate(offset: Vector3D) -> Self {
        Self {
            translation: offset,
            ..Self::default()
        }
    }

    pub fn rotate(radians: f32) -> Self {
        Self {
            rotation: radians,
            ..Self::default()
        }
    }

    pub fn rotate_degrees(degrees: f32) -> Self {
        Self::rotate(degrees.to_radians())
    }

    pub fn scale_by(factor: f32) -> Self {
        Self {
            scale_factor: (factor, factor, factor),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(&self, pose: &ObjectPose) -> Result<ObjectPose, SceneError> {
        pose.apply(self)
    }
}

impl Default for PoseDelta {
    fn default() -> Self {
        Self {
            translation: Vector3D::ZERO,
            rotation: 0.0,
            scale_factor: (1.0, 1.0, 1.0),
        }
    }
}

/// One drawable polygon of an object's geometry.
///
/// Vertices are ordered with a consistent winding; `tint` darkens the owning
/// object's color for secondary parts such as legs.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<Point3D>,
    pub tint: f32,
}

impl Face {
    pub fn new(vertices: Vec<Point3D>) -> Self {
        Self {
            vertices,
            tint: 1.0,
        }
    }

    pub fn with_tint(mut self, tint: f32) -> Self {
        self.tint = tint;
        self
    }
}

/// A piece of furniture in the room
#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    id: ObjectId,
    kind: ObjectKind,
    pub pose: ObjectPose,
    geometry: Vec<Face>,
    pub color: Color,
}

impl Object3D {
    pub(crate) fn new(id: ObjectId, kind: ObjectKind, pose: ObjectPose) -> Self {
        Self {
            id,
            kind,
            pose,
            geometry: kind.template(),
            color: kind.default_color(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Faces in local space
    pub fn geometry(&self) -> &[Face] {
        &self.geometry
    }

    /// Faces transformed into world space, in template order
    pub fn world_faces(&self) -> Vec<Face> {
        self.geometry
            .iter()
            .map(|face| Face {
                vertices: face.vertices.iter().map(|v| self.pose.to_world(*v)).collect(),
                tint: face.tint,
            })
            .collect()
    }
}
