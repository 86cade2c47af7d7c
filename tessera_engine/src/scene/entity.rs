/// Entity: one placed instance of a shared mesh.
///
/// Holds the transform (position, rotation, uniform scale), the atlas cell
/// index used to pick a sub-image of the mesh texture, and a selection flag.

use glam::{Quat, Vec3};
use slotmap::new_key_type;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable handle to an entity stored in an `EntityRegistry`
    pub struct EntityKey;
}

// ===== ENTITY =====

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    position: Vec3,
    rotation: Quat,
    scale: f32,
    atlas_index: u32,
    selected: bool,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            atlas_index: 0,
            selected: false,
        }
    }
}

impl Entity {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_atlas_index(mut self, index: u32) -> Self {
        self.atlas_index = index;
        self
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Cell of the material texture atlas, row-major
    pub fn atlas_index(&self) -> u32 {
        self.atlas_index
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn set_atlas_index(&mut self, index: u32) {
        self.atlas_index = index;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
