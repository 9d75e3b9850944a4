//! The furniture scene graph

use tracing::debug;

use super::object::{Object3D, ObjectId, ObjectKind, ObjectPose, PoseDelta};
use super::{Result, SceneError};

/// Owns every placed object, in insertion order.
///
/// Lives on the render thread; there is no interior locking.
#[derive(Debug, Clone, Default)]
pub struct SceneModel {
    objects: Vec<Object3D>,
    next_id: u64,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new object and return its fresh id
    pub fn add_object(&mut self, kind: ObjectKind, pose: ObjectPose) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.push(Object3D::new(id, kind, pose));
        debug!("Placed {} {} at {:?}", kind, id, pose.position());
        id
    }

    /// Apply a relative pose change. The object is untouched on error.
    pub fn update_object(&mut self, id: ObjectId, delta: &PoseDelta) -> Result<()> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(SceneError::NotFound(id))?;
        object.pose = delta.apply_to(&object.pose)?;
        Ok(())
    }

    /// Remove an object, handing it back to the caller
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Object3D> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(SceneError::NotFound(id))?;
        let removed = self.objects.remove(index);
        debug!("Removed {} {}", removed.kind(), id);
        Ok(removed)
    }

    /// Objects in insertion order, which is also draw order
    pub fn list_objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Vec<Object3D> {
        self.objects.clone()
    }

    /// Replace the object list. The id counter only ever moves forward.
    pub(crate) fn restore(&mut self, objects: Vec<Object3D>) {
        let highest = objects.iter().map(|o| o.id().get()).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest);
        self.objects = objects;
    }
}
