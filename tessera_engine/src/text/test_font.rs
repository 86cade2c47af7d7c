/// Deterministic font for tests
///
/// Every char advances by `advance` pixels unless overridden. Drawing fills
/// the glyph cell from the top to the baseline with opaque white, except for
/// whitespace and control chars which stay transparent.

use image::{Rgba, RgbaImage};
use rustc_hash::FxHashMap;
use crate::text::Font;

pub struct FixedWidthFont {
    pub advance: u32,
    pub line_height: u32,
    pub ascent: f32,
    pub overrides: FxHashMap<char, u32>,
}

impl FixedWidthFont {
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
            ascent: line_height as f32 * 0.75,
            overrides: FxHashMap::default(),
        }
    }

    pub fn with_width(mut self, c: char, width: u32) -> Self {
        self.overrides.insert(c, width);
        self
    }
}

impl Font for FixedWidthFont {
    fn advance_width(&self, c: char) -> u32 {
        self.overrides.get(&c).copied().unwrap_or(self.advance)
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn draw_glyph(&self, c: char, image: &mut RgbaImage, x: u32, baseline: f32) {
        if c.is_whitespace() || c.is_control() {
            return;
        }
        let right = (x + self.advance_width(c)).min(image.width());
        let bottom = (baseline.ceil() as u32).min(image.height());
        for py in 0..bottom {
            for px in x..right {
                image.put_pixel(px, py, Rgba([255, 255, 255, 255]));
            }
        }
    }
}
