//! Text rendering resources
//!
//! A `GlyphAtlas` draws a whole character set into one texture once.
//! `TextMesh` builds textured quads for a string against that atlas.

pub mod charset;
pub mod font;
pub mod glyph_atlas;
pub mod text_mesh;

#[cfg(test)]
pub(crate) mod test_font;

pub use charset::CharacterSet;
pub use font::{Font, TtfFont};
pub use glyph_atlas::{GlyphAtlas, GlyphInfo};
pub use text_mesh::TextMesh;
