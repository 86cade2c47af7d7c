/// Glyph atlas: every char of a character set drawn side by side in one
/// RGBA texture.
///
/// Glyphs are laid out left to right in code point order. Each glyph cell
/// is its advance width wide and the font's line height tall.

use std::sync::{Arc, Mutex};
use image::RgbaImage;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::GraphicsDevice;
use crate::resource::Texture;
use crate::text::{CharacterSet, Font};

/// Horizontal placement of one glyph in the atlas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInfo {
    pub start_x: u32,
    pub width: u32,
}

pub struct GlyphAtlas {
    charset: CharacterSet,
    glyphs: FxHashMap<char, GlyphInfo>,
    width: u32,
    height: u32,
    texture: Arc<Texture>,
}

impl GlyphAtlas {
    /// Measure, draw and upload every char of the named set
    pub fn build(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        font: &dyn Font,
        charset_name: &str,
    ) -> Result<Self> {
        let charset = CharacterSet::from_name(charset_name)?;

        let mut glyphs = FxHashMap::default();
        let mut width = 0u32;
        for c in charset.chars() {
            let glyph_width = font.advance_width(c);
            glyphs.insert(c, GlyphInfo { start_x: width, width: glyph_width });
            width = match width.checked_add(glyph_width) {
                Some(width) => width,
                None => engine_bail!("tessera::text::GlyphAtlas", Error::InvalidResource(format!(
                    "Atlas width overflows at {:?}", c
                ))),
            };
        }
        let height = font.line_height();

        if width == 0 || height == 0 {
            engine_bail!("tessera::text::GlyphAtlas", Error::InvalidResource(format!(
                "Atlas for {} would be {}x{}", charset.name(), width, height
            )));
        }

        let mut image = RgbaImage::new(width, height);
        let baseline = font.ascent();
        for c in charset.chars() {
            if let Some(info) = glyphs.get(&c) {
                font.draw_glyph(c, &mut image, info.start_x, baseline);
            }
        }

        let texture = Arc::new(Texture::from_image(device, &image, None)?);

        crate::engine_debug!(
            "tessera::text::GlyphAtlas",
            "Built {} atlas: {} glyphs, {}x{}",
            charset.name(),
            glyphs.len(),
            width,
            height
        );

        Ok(Self {
            charset,
            glyphs,
            width,
            height,
            texture,
        })
    }

    /// Placement of `c`; chars outside the set are `Error::GlyphNotFound`
    pub fn char_info(&self, c: char) -> Result<GlyphInfo> {
        match self.glyphs.get(&c) {
            Some(info) => Ok(*info),
            None => Err(crate::engine_err!("tessera::text::GlyphAtlas", Error::GlyphNotFound(c))),
        }
    }

    // ===== GETTERS =====

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }
}

#[cfg(test)]
#[path = "glyph_atlas_tests.rs"]
mod tests;
