//! Room shell generated from user-entered dimensions

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::spatial::{Point3D, Vector3D};

/// Smallest accepted room side, in feet
pub const MIN_ROOM_FEET: f32 = 8.0;

/// World units per foot
pub const DEFAULT_UNITS_PER_FOOT: f32 = 25.0;

/// Errors raised while generating a room
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomError {
    #[error("Room {axis} must be at least {min} feet, got {value}")]
    TooSmall {
        axis: &'static str,
        min: f32,
        value: f32,
    },

    #[error("Room {0} is not a finite number")]
    NotFinite(&'static str),

    #[error("Units per foot must be positive, got {0}")]
    InvalidScale(f32),
}

/// Height of grid lines above the floor, so they are not lost in it
const GRID_LIFT: f32 = 1.0;
const AXIS_LIFT: f32 = 1.5;

/// A straight marking on the floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLine {
    pub start: Point3D,
    pub end: Point3D,
    /// One of the two centre lines through the origin
    pub axis: bool,
}

/// Room size in feet, as typed on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width_ft: f32,
    pub depth_ft: f32,
    pub height_ft: f32,
}

impl RoomDimensions {
    pub fn new(width_ft: f32, depth_ft: f32, height_ft: f32) -> Self {
        Self {
            width_ft,
            depth_ft,
            height_ft,
        }
    }

    fn validate(&self) -> Result<(), RoomError> {
        for (axis, value) in [
            ("width", self.width_ft),
            ("depth", self.depth_ft),
            ("height", self.height_ft),
        ] {
            if !value.is_finite() {
                return Err(RoomError::NotFinite(axis));
            }
            if value < MIN_ROOM_FEET {
                return Err(RoomError::TooSmall {
                    axis,
                    min: MIN_ROOM_FEET,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self::new(30.0, 24.0, 10.0)
    }
}

/// A static, colored polygon of the room shell.
///
/// One-sided surfaces carry an inward `normal` and are hidden when the camera
/// is behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub name: &'static str,
    pub vertices: Vec<Point3D>,
    pub color: Color,
    pub normal: Option<Vector3D>,
}

impl Surface {
    pub fn visible_from(&self, eye: Point3D) -> bool {
        match (self.normal, self.vertices.first()) {
            (Some(normal), Some(anchor)) => (eye - *anchor).dot(&normal) > 0.0,
            _ => true,
        }
    }
}

/// A generated room: floor footprint centred on the origin, walls up to `height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    dimensions: RoomDimensions,
    width: f32,
    depth: f32,
    height: f32,
}

impl Room {
    pub fn new(dimensions: RoomDimensions) -> Result<Self, RoomError> {
        Self::with_units(dimensions, DEFAULT_UNITS_PER_FOOT)
    }

    pub fn with_units(dimensions: RoomDimensions, units_per_foot: f32) -> Result<Self, RoomError> {
        if !(units_per_foot.is_finite() && units_per_foot > 0.0) {
            return Err(RoomError::InvalidScale(units_per_foot));
        }
        dimensions.validate()?;
        Ok(Self {
            dimensions,
            width: (dimensions.width_ft * units_per_foot).trunc(),
            depth: (dimensions.depth_ft * units_per_foot).trunc(),
            height: (dimensions.height_ft * units_per_foot).trunc(),
        })
    }

    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    /// Width along X in world units
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Depth along Z in world units
    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn largest_side(&self) -> f32 {
        self.width.max(self.depth).max(self.height)
    }

    /// Clamp a point into the floor footprint (x/z only)
    pub fn clamp(&self, point: Point3D) -> Point3D {
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        Point3D::new(point.x.clamp(-hw, hw), point.y, point.z.clamp(-hd, hd))
    }

    pub fn contains(&self, point: Point3D) -> bool {
        point.x.abs() <= self.width / 2.0 && point.z.abs() <= self.depth / 2.0
    }

    /// Grid lines every `spacing` units across the floor, then the two centre
    /// axes. A non-positive spacing leaves only the axes.
    pub fn floor_grid(&self, spacing: f32) -> Vec<FloorLine> {
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        let mut lines = Vec::new();

        if spacing.is_finite() && spacing > 0.0 {
            for x in grid_steps(hw, spacing) {
                lines.push(FloorLine {
                    start: Point3D::new(x, GRID_LIFT, -hd),
                    end: Point3D::new(x, GRID_LIFT, hd),
                    axis: false,
                });
            }
            for z in grid_steps(hd, spacing) {
                lines.push(FloorLine {
                    start: Point3D::new(-hw, GRID_LIFT, z),
                    end: Point3D::new(hw, GRID_LIFT, z),
                    axis: false,
                });
            }
        }

        lines.push(FloorLine {
            start: Point3D::new(-hw, AXIS_LIFT, 0.0),
            end: Point3D::new(hw, AXIS_LIFT, 0.0),
            axis: true,
        });
        lines.push(FloorLine {
            start: Point3D::new(0.0, AXIS_LIFT, -hd),
            end: Point3D::new(0.0, AXIS_LIFT, hd),
            axis: true,
        });
        lines
    }

    /// Floor, back wall and blackboard in draw order
    pub fn surfaces(&self) -> Vec<Surface> {
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        let wall_h = self.height;
        let board_hw = (hw * 0.8).min(400.0);
        let board_bottom = (wall_h * 0.32).min(80.0);
        let board_top = (wall_h * 0.64).min(160.0);
        let inward = Some(Vector3D::new(0.0, 0.0, 1.0));

        vec![
            Surface {
                name: "floor",
                vertices: vec![
                    Point3D::new(-hw, 0.0, -hd),
                    Point3D::new(hw, 0.0, -hd),
                    Point3D::new(hw, 0.0, hd),
                    Point3D::new(-hw, 0.0, hd),
                ],
                color: Color::FLOOR,
                normal: Some(Vector3D::UP),
            },
            Surface {
                name: "back_wall",
                vertices: vec![
                    Point3D::new(-hw, 0.0, -hd),
                    Point3D::new(hw, 0.0, -hd),
                    Point3D::new(hw, wall_h, -hd),
                    Point3D::new(-hw, wall_h, -hd),
                ],
                color: Color::WALL,
                normal: inward,
            },
            Surface {
                name: "blackboard",
                vertices: vec![
                    Point3D::new(-board_hw, board_bottom, -hd + 2.0),
                    Point3D::new(board_hw, board_bottom, -hd + 2.0),
                    Point3D::new(board_hw, board_top, -hd + 2.0),
                    Point3D::new(-board_hw, board_top, -hd + 2.0),
                ],
                color: Color::BLACKBOARD,
                normal: inward,
            },
        ]
    }
}

/// Multiples of `spacing` within `[-half, half]`, skipping zero
fn grid_steps(half: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let first = (-half / spacing).ceil() as i64;
    let last = (half / spacing).floor() as i64;
    (first..=last)
        .filter(|i| *i != 0)
        .map(move |i| i as f32 * spacing)
}
