/// Fonts used to build glyph atlases.
///
/// `Font` is the measuring and drawing seam used by `GlyphAtlas::build`.
/// `TtfFont` implements it for TrueType/OpenType data through `ab_glyph`,
/// which parses the face once and rasterizes outlines with anti-aliased
/// coverage.

use std::path::Path;
use ab_glyph::{point, Font as _, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use crate::error::{Error, Result};

/// Pixel metrics and glyph drawing
pub trait Font: Send + Sync {
    /// Horizontal advance of `c` in pixels
    fn advance_width(&self, c: char) -> u32;

    /// Height of one line of text in pixels
    fn line_height(&self) -> u32;

    /// Distance from the top of a line to the baseline in pixels
    fn ascent(&self) -> f32;

    /// Draw `c` in white with alpha = coverage, pen at `x`, baseline at `baseline`
    fn draw_glyph(&self, c: char, image: &mut RgbaImage, x: u32, baseline: f32);
}

// ============================================================================
// TtfFont
// ============================================================================

pub struct TtfFont {
    font: FontVec,
    pixel_size: f32,
    scale: PxScale,
}

impl TtfFont {
    /// Parse font data rendered at `pixel_size` pixels per em
    pub fn from_bytes(data: Vec<u8>, pixel_size: f32) -> Result<Self> {
        if pixel_size.is_nan() || pixel_size <= 0.0 {
            crate::engine_bail!(
                "tessera::text::TtfFont",
                Error::InvalidArgument(format!("Pixel size must be positive, got {}", pixel_size))
            );
        }

        let font = FontVec::try_from_vec(data).map_err(|e| {
            crate::engine_err!(
                "tessera::text::TtfFont",
                Error::InvalidResource(format!("Invalid font data: {}", e))
            )
        })?;
        let units_per_em = font.units_per_em().ok_or_else(|| {
            crate::engine_err!(
                "tessera::text::TtfFont",
                Error::InvalidResource("Font has no units per em".to_string())
            )
        })?;

        // PxScale is the ascent-to-descent height, not the em size
        let scale = PxScale::from(pixel_size * font.height_unscaled() / units_per_em);

        Ok(Self {
            font,
            pixel_size,
            scale,
        })
    }

    /// Read a font file
    pub fn load(path: &Path, pixel_size: f32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            crate::engine_err!("tessera::text::TtfFont", Error::Io(format!("{}: {}", path.display(), e)))
        })?;
        Self::from_bytes(data, pixel_size)
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }
}

impl Font for TtfFont {
    fn advance_width(&self, c: char) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.h_advance(self.font.glyph_id(c)).round().max(0.0) as u32
    }

    fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.height() + scaled.line_gap()).ceil().max(0.0) as u32
    }

    fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    fn draw_glyph(&self, c: char, image: &mut RgbaImage, x: u32, baseline: f32) {
        let glyph = self
            .font
            .glyph_id(c)
            .with_scale_and_position(self.scale, point(x as f32, baseline));
        let Some(outlined) = self.font.outline_glyph(glyph) else {
            // Blank glyph (space, control chars)
            return;
        };

        let bounds = outlined.px_bounds();
        let (width, height) = image.dimensions();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + gx as i64;
            let py = bounds.min.y as i64 + gy as i64;
            if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                return;
            }
            let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            if alpha == 0 {
                return;
            }
            let pixel = image.get_pixel_mut(px as u32, py as u32);
            let alpha = alpha.max(pixel[3]);
            *pixel = Rgba([255, 255, 255, alpha]);
        });
    }
}

#[cfg(test)]
#[path = "font_tests.rs"]
mod tests;
