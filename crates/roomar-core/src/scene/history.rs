//! Snapshot-based undo/redo for scene edits

use super::model::SceneModel;
use super::object::Object3D;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Linear edit history. Committing after an undo drops the redo branch.
#[derive(Debug, Clone)]
pub struct SceneHistory {
    snapshots: Vec<Vec<Object3D>>,
    cursor: usize,
    capacity: usize,
}

impl SceneHistory {
    /// Start a history whose baseline is the current scene
    pub fn new(scene: &SceneModel) -> Self {
        Self::with_capacity(scene, DEFAULT_HISTORY_DEPTH)
    }

    pub fn with_capacity(scene: &SceneModel, capacity: usize) -> Self {
        Self {
            snapshots: vec![scene.snapshot()],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record the scene after an edit
    pub fn commit(&mut self, scene: &SceneModel) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene.snapshot());
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back one edit. Returns false when already at the oldest snapshot.
    pub fn undo(&mut self, scene: &mut SceneModel) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        scene.restore(self.snapshots[self.cursor].clone());
        true
    }

    /// Re-apply an undone edit
    pub fn redo(&mut self, scene: &mut SceneModel) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        scene.restore(self.snapshots[self.cursor].clone());
        true
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
