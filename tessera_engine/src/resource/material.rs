/// Resource-level material type.
///
/// A Material is a pure data description of a surface: ambient, diffuse and
/// specular RGBA colors, a reflectance factor, and an optional shared texture.
/// No GPU resources are created at this level.

use std::sync::Arc;
use crate::resource::Texture;

/// Surface description attached to every mesh
#[derive(Debug, Clone)]
pub struct Material {
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    reflectance: f32,
    texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Self::DEFAULT_COLOR,
            diffuse: Self::DEFAULT_COLOR,
            specular: Self::DEFAULT_COLOR,
            reflectance: 0.0,
            texture: None,
        }
    }
}

impl Material {
    /// Color used for any channel that is not specified (opaque white)
    pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub fn new(
        ambient: [f32; 4],
        diffuse: [f32; 4],
        specular: [f32; 4],
        texture: Option<Arc<Texture>>,
        reflectance: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            reflectance,
            texture,
        }
    }

    /// Default colors with a texture
    pub fn with_texture(texture: Arc<Texture>) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    // ===== GETTERS =====

    pub fn ambient(&self) -> [f32; 4] {
        self.ambient
    }

    pub fn diffuse(&self) -> [f32; 4] {
        self.diffuse
    }

    pub fn specular(&self) -> [f32; 4] {
        self.specular
    }

    pub fn reflectance(&self) -> f32 {
        self.reflectance
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }

    // ===== SETTERS =====

    pub fn set_ambient(&mut self, color: [f32; 4]) {
        self.ambient = color;
    }

    pub fn set_diffuse(&mut self, color: [f32; 4]) {
        self.diffuse = color;
    }

    pub fn set_specular(&mut self, color: [f32; 4]) {
        self.specular = color;
    }

    pub fn set_reflectance(&mut self, reflectance: f32) {
        self.reflectance = reflectance;
    }

    pub fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
