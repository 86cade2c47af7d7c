/// Path-keyed texture cache.
///
/// The first request for a path decodes and uploads the image; later requests
/// for the same path get the same `Arc<Texture>`. The cache has a single
/// writer (the loading code holding `&mut TextureCache`). Handed-out textures
/// are immutable, so readers need no locking.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::resource::Texture;

#[derive(Default)]
pub struct TextureCache {
    textures: FxHashMap<PathBuf, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached texture for `path`, loading it on first request
    pub fn get_or_load(
        &mut self,
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        path: &Path,
    ) -> Result<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            crate::engine_trace!("tessera::TextureCache", "Cache hit '{}'", path.display());
            return Ok(Arc::clone(texture));
        }

        let texture = Arc::new(Texture::load(device, path)?);
        self.textures.insert(path.to_path_buf(), Arc::clone(&texture));
        Ok(texture)
    }

    /// Register an already-built texture under `path`, replacing any previous entry
    pub fn insert(&mut self, path: impl Into<PathBuf>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(path.into(), Arc::clone(&texture));
        texture
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.textures.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop every cached handle. Textures still referenced elsewhere stay alive.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
#[path = "texture_cache_tests.rs"]
mod tests;
