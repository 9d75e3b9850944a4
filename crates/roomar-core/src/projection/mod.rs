//! Virtual camera and pinhole projection for planner mode

mod camera;
mod orbit;
mod projector;

pub use camera::{CameraBasis, CameraPose, VirtualCamera, Viewport};
pub use orbit::OrbitRig;
pub use projector::{ProjectedFace, Projector, Ray, MIN_DEPTH};
