/// Resource-level texture.
///
/// Wraps a GPU texture with the path it was loaded from and an atlas grid
/// (`cols x rows` cells) used by instanced meshes to pick a sub-image per
/// instance. Textures are shared as `Arc<Texture>` and never mutated after
/// creation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use image::RgbaImage;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    self, GraphicsDevice, TextureDesc, TextureFormat, TextureUsage,
    Texture as GpuTexture,
};

pub struct Texture {
    gpu_texture: Arc<dyn GpuTexture>,
    path: Option<PathBuf>,
    cols: u32,
    rows: u32,
}

impl Texture {
    /// Wrap an existing GPU texture (1x1 grid)
    pub fn new(gpu_texture: Arc<dyn GpuTexture>, path: Option<PathBuf>) -> Self {
        Self {
            gpu_texture,
            path,
            cols: 1,
            rows: 1,
        }
    }

    /// Upload an RGBA8 image
    pub fn from_image(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        image: &RgbaImage,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            engine_bail!("tessera::Texture", Error::InvalidResource(format!(
                "Texture image is {}x{}", image.width(), image.height()
            )));
        }

        let gpu_texture = graphics_device::lock_device(device, "tessera::Texture")?
            .create_texture(TextureDesc {
                width: image.width(),
                height: image.height(),
                format: TextureFormat::R8G8B8A8_UNORM,
                usage: TextureUsage::Sampled,
                data: Some(image.as_raw().clone()),
            })?;

        Ok(Self::new(gpu_texture, path))
    }

    /// Decode an image file (PNG or JPEG) and upload it
    pub fn load(device: &Arc<Mutex<dyn GraphicsDevice>>, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            crate::engine_err!("tessera::Texture", Error::Io(format!("{}: {}", path.display(), e)))
        })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| {
                crate::engine_err!("tessera::Texture", Error::Image(format!("{}: {}", path.display(), e)))
            })?
            .to_rgba8();

        crate::engine_debug!("tessera::Texture", "Loaded '{}' ({}x{})", path.display(), image.width(), image.height());
        Self::from_image(device, &image, Some(path.to_path_buf()))
    }

    /// Set the atlas grid; both dimensions must be at least 1
    pub fn with_grid(mut self, cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            engine_bail!("tessera::Texture", Error::InvalidArgument(format!(
                "Atlas grid must be at least 1x1, got {}x{}", cols, rows
            )));
        }
        self.cols = cols;
        self.rows = rows;
        Ok(self)
    }

    // ===== GETTERS =====

    pub fn gpu_texture(&self) -> &Arc<dyn GpuTexture> {
        &self.gpu_texture
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.gpu_texture.info().width
    }

    pub fn height(&self) -> u32 {
        self.gpu_texture.info().height
    }

    /// Atlas columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Atlas rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// True when the texture is split into more than one cell
    pub fn is_atlas(&self) -> bool {
        self.cols > 1 || self.rows > 1
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("path", &self.path)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .finish()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
