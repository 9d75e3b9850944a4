use roomar_core::{Color, ObjectKind};
use serde::{Deserialize, Serialize};

/// Which virtual object a marker id anchors, and in what color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerBinding {
    pub marker_id: u32,
    pub kind: ObjectKind,
    pub color: Color,
}

impl MarkerBinding {
    pub fn new(marker_id: u32, kind: ObjectKind, color: Color) -> Self {
        Self {
            marker_id,
            kind,
            color,
        }
    }
}

/// Lookup table from marker id to binding. At most one binding per id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBindings {
    entries: Vec<MarkerBinding>,
}

impl MarkerBindings {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, marker_id: u32) -> Option<&MarkerBinding> {
        self.entries.iter().find(|b| b.marker_id == marker_id)
    }

    /// Add a binding, replacing any existing one for the same id
    pub fn insert(&mut self, binding: MarkerBinding) -> Option<MarkerBinding> {
        match self.entries.iter_mut().find(|b| b.marker_id == binding.marker_id) {
            Some(existing) => Some(std::mem::replace(existing, binding)),
            None => {
                self.entries.push(binding);
                None
            }
        }
    }

    pub fn remove(&mut self, marker_id: u32) -> Option<MarkerBinding> {
        let index = self.entries.iter().position(|b| b.marker_id == marker_id)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerBinding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MarkerBindings {
    /// Desk, chair and cabinet on markers 23, 24 and 25
    fn default() -> Self {
        [
            MarkerBinding::new(23, ObjectKind::Desk, Color::BLUE),
            MarkerBinding::new(24, ObjectKind::Chair, Color::RED),
            MarkerBinding::new(25, ObjectKind::Cabinet, Color::YELLOW),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<MarkerBinding> for MarkerBindings {
    fn from_iter<I: IntoIterator<Item = MarkerBinding>>(iter: I) -> Self {
        let mut bindings = Self::empty();
        for binding in iter {
            bindings.insert(binding);
        }
        bindings
    }
}
