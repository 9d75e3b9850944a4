//! Room scene: furniture objects, edit history, placement and room shell

mod history;
mod model;
mod object;
mod placement;
mod room;
mod template;

pub use history::SceneHistory;
pub use model::SceneModel;
pub use object::{Face, Object3D, ObjectId, ObjectKind, ObjectPose, PoseDelta, Scale3};
pub use placement::PlacementRules;
pub use room::{FloorLine, Room, RoomDimensions, RoomError, Surface};

/// Errors raised by scene operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Invalid pose: {0}")]
    InvalidPose(String),

    #[error("Unknown object kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
