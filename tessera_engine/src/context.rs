/// Engine context: the device, the texture cache and the configuration that
/// importers and builders share.
///
/// Replaces process-wide singletons with one owned value. Only the logger
/// stays global; `EngineContext::new` applies the configured severity to it.
///
/// # Example
///
/// ```ignore
/// let ctx = EngineContext::new(device, EngineConfig::default().with_texture_dir("assets/textures"));
/// let scene = ctx.import_scene(Path::new("assets/forest.gltf"))?;
/// let trees = ctx.import_line_format(Path::new("assets/tree.txt"), 256)?;
/// ```

use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::import::{self, ImportedScene};
use crate::resource::{InstancedMesh, Mesh, TextureCache};
use crate::text::{Font, GlyphAtlas, TextMesh};

pub struct EngineContext {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    texture_cache: TextureCache,
    config: EngineConfig,
}

impl EngineContext {
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: EngineConfig) -> Self {
        crate::log::set_min_severity(config.log_severity);
        crate::engine_info!(
            "tessera::EngineContext",
            "Context created (textures: '{}', charset: {}, instance capacity: {})",
            config.texture_dir.display(),
            config.charset,
            config.default_instance_capacity
        );

        Self {
            device,
            texture_cache: TextureCache::new(),
            config,
        }
    }

    /// Import a glTF scene, resolving textures against `config.texture_dir`
    pub fn import_scene(&mut self, path: &Path) -> Result<ImportedScene> {
        import::import_scene(&self.device, &mut self.texture_cache, path, &self.config.texture_dir)
    }

    /// Import a line-format file as an instanced mesh
    pub fn import_line_format(&self, path: &Path, instance_count: usize) -> Result<InstancedMesh> {
        import::import_line_format(Arc::clone(&self.device), path, instance_count)
    }

    /// Import a line-format file with `config.default_instance_capacity`
    pub fn import_line_format_default(&self, path: &Path) -> Result<InstancedMesh> {
        self.import_line_format(path, self.config.default_instance_capacity)
    }

    /// Import a line-format file as a plain mesh
    pub fn import_line_format_static(&self, path: &Path) -> Result<Mesh> {
        import::import_line_format_static(Arc::clone(&self.device), path)
    }

    /// Build an atlas of `config.charset` for `font`
    pub fn build_glyph_atlas(&self, font: &dyn Font) -> Result<Arc<GlyphAtlas>> {
        GlyphAtlas::build(&self.device, font, &self.config.charset).map(Arc::new)
    }

    pub fn build_text(&self, atlas: Arc<GlyphAtlas>, text: &str) -> Result<TextMesh> {
        TextMesh::build(Arc::clone(&self.device), atlas, text)
    }

    // ===== GETTERS =====

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    pub fn texture_cache(&self) -> &TextureCache {
        &self.texture_cache
    }

    pub fn texture_cache_mut(&mut self) -> &mut TextureCache {
        &mut self.texture_cache
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
