//! roomar-core: scene model and projection math for the room planner
//!
//! This crate owns everything that happens in world space:
//! - Spatial primitives (points, vectors, screen points)
//! - The furniture scene graph with edit history and placement rules
//! - Room generation (floor, walls, blackboard)
//! - The virtual camera, orbit rig and pinhole projector

pub mod color;
pub mod projection;
pub mod scene;
pub mod spatial;

pub use color::Color;
pub use projection::{CameraPose, OrbitRig, ProjectedFace, Projector, VirtualCamera, Viewport};
pub use scene::{
    Face, FloorLine, Object3D, ObjectId, ObjectKind, ObjectPose, PlacementRules, PoseDelta, Room,
    RoomDimensions, RoomError, Scale3, SceneError, SceneHistory, SceneModel, Surface,
};
pub use spatial::{Point2D, Point3D, Vector3D};
