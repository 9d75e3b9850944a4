//! Placement rules for dropping furniture onto the floor

use super::object::{ObjectKind, ObjectPose};
use super::room::Room;
use crate::spatial::Point3D;

/// Grid snapping and footprint clamping applied to user placements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    pub grid_size: f32,
    pub snap_to_grid: bool,
}

impl PlacementRules {
    pub fn new(grid_size: f32, snap_to_grid: bool) -> Self {
        Self {
            grid_size,
            snap_to_grid,
        }
    }

    /// Snap a floor hit to the grid and keep it inside the room
    pub fn resolve(&self, hit: Point3D, room: &Room) -> Point3D {
        let mut point = Point3D::new(hit.x, 0.0, hit.z);
        if self.snap_to_grid && self.grid_size > 0.0 {
            point.x = (point.x / self.grid_size).round() * self.grid_size;
            point.z = (point.z / self.grid_size).round() * self.grid_size;
        }
        room.clamp(point)
    }

    /// Pose for a new object of `kind` dropped at `hit`
    pub fn pose_for(&self, kind: ObjectKind, hit: Point3D, room: &Room) -> ObjectPose {
        ObjectPose::new(self.resolve(hit, room)).with_rotation(kind.default_rotation())
    }
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::new(25.0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RoomDimensions;

    fn room() -> Room {
        Room::new(RoomDimensions::new(20.0, 20.0, 10.0)).unwrap()
    }

    #[test]
    fn test_snaps_to_grid() {
        let rules = PlacementRules::default();
        let p = rules.resolve(Point3D::new(37.0, 12.0, -13.0), &room());
        assert_eq!(p, Point3D::new(25.0, 0.0, -25.0));
    }

    #[test]
    fn test_no_snap_keeps_position() {
        let rules = PlacementRules::new(25.0, false);
        let p = rules.resolve(Point3D::new(37.0, 0.0, -13.0), &room());
        assert_eq!(p, Point3D::new(37.0, 0.0, -13.0));
    }

    #[test]
    fn test_clamped_to_room() {
        let rules = PlacementRules::default();
        let p = rules.resolve(Point3D::new(10_000.0, 0.0, 0.0), &room());
        assert_eq!(p.x, 250.0);
    }

    #[test]
    fn test_chair_pose_turned_around() {
        let pose = PlacementRules::default().pose_for(ObjectKind::Chair, Point3D::ORIGIN, &room());
        assert!((pose.rotation() - std::f32::consts::PI).abs() < 1e-6);
    }
}
