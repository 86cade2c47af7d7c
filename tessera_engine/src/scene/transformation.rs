/// Model matrix utility.

use glam::{Mat4, Quat, Vec3};
use crate::scene::Entity;

pub struct Transformation;

impl Transformation {
    /// Translation * rotation * uniform scale
    pub fn build_model_matrix(position: Vec3, rotation: Quat, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
    }

    pub fn model_matrix(entity: &Entity) -> Mat4 {
        Self::build_model_matrix(entity.position(), entity.rotation(), entity.scale())
    }

    /// View * model
    pub fn model_view_matrix(entity: &Entity, view: &Mat4) -> Mat4 {
        *view * Self::model_matrix(entity)
    }
}

#[cfg(test)]
#[path = "transformation_tests.rs"]
mod tests;
