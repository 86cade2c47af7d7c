/// Text mesh: one textured quad per char, sampling a `GlyphAtlas`.
///
/// Quads are laid out on one line in the XY plane, left to right, y down.
/// Per char `i` with pen X `p`, glyph width `w` and atlas height `H`:
///
/// ```text
///  0 (p, 0) ---- 3 (p+w, 0)
///    |              |
///  1 (p, H) ---- 2 (p+w, H)
/// ```
///
/// Indices are `[0, 1, 2, 0, 2, 3] + 4i`.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::resource::{Material, Mesh, MeshData};
use crate::text::GlyphAtlas;

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub struct TextMesh {
    text: String,
    atlas: Arc<GlyphAtlas>,
    mesh: Mesh,
}

impl TextMesh {
    /// Build the quads for `text` with a material sampling the atlas texture
    pub fn build(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        atlas: Arc<GlyphAtlas>,
        text: &str,
    ) -> Result<Self> {
        let data = Self::geometry(&atlas, text)?;
        let material = Material::with_texture(Arc::clone(atlas.texture()));
        let mesh = Mesh::new(device, data, material)?;

        Ok(Self {
            text: text.to_string(),
            atlas,
            mesh,
        })
    }

    /// Replace the text. Glyphs are looked up first, so an unknown char
    /// leaves the current mesh untouched.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let data = Self::geometry(&self.atlas, text)?;
        let material = self.mesh.material().clone();
        let device = Arc::clone(self.mesh.device());

        self.mesh.destroy();
        self.mesh = Mesh::new(device, data, material)?;
        self.text = text.to_string();

        crate::engine_trace!("tessera::text::TextMesh", "Rebuilt text mesh: {} chars", self.text.chars().count());
        Ok(())
    }

    fn geometry(atlas: &GlyphAtlas, text: &str) -> Result<MeshData> {
        let glyphs = text
            .chars()
            .map(|c| atlas.char_info(c))
            .collect::<Result<Vec<_>>>()?;

        let atlas_width = atlas.width() as f32;
        let height = atlas.height() as f32;
        let mut positions = Vec::with_capacity(glyphs.len() * 12);
        let mut uvs = Vec::with_capacity(glyphs.len() * 8);
        let mut indices = Vec::with_capacity(glyphs.len() * 6);
        let mut pen_x = 0.0f32;

        for (i, glyph) in glyphs.iter().enumerate() {
            let width = glyph.width as f32;
            let u0 = glyph.start_x as f32 / atlas_width;
            let u1 = (glyph.start_x + glyph.width) as f32 / atlas_width;

            positions.extend_from_slice(&[
                pen_x, 0.0, 0.0,
                pen_x, height, 0.0,
                pen_x + width, height, 0.0,
                pen_x + width, 0.0, 0.0,
            ]);
            uvs.extend_from_slice(&[
                u0, 0.0,
                u0, 1.0,
                u1, 1.0,
                u1, 0.0,
            ]);
            let base = (i * 4) as u32;
            indices.extend(QUAD_INDICES.iter().map(|index| index + base));

            pen_x += width;
        }

        Ok(MeshData::new(positions, uvs, Vec::new(), indices))
    }

    // ===== GETTERS =====

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn atlas(&self) -> &Arc<GlyphAtlas> {
        &self.atlas
    }
}

#[cfg(test)]
#[path = "text_mesh_tests.rs"]
mod tests;
