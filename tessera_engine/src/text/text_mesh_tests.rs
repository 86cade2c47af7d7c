/// Tests for TextMesh
///
/// Geometry is checked against a FixedWidthFont atlas; buffer lifetimes
/// against MockGraphicsDevice live buffer counts.

use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::text::test_font::FixedWidthFont;

// ============================================================================
// Helper Functions
// ============================================================================

fn atlas(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Arc<GlyphAtlas> {
    let font = FixedWidthFont::new(4, 10).with_width('i', 2);
    Arc::new(GlyphAtlas::build(device, &font, "US-ASCII").unwrap())
}

fn vertex(mesh: &TextMesh, index: usize) -> [f32; 3] {
    let p = &mesh.mesh().data().positions[index * 3..index * 3 + 3];
    [p[0], p[1], p[2]]
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_counts_per_char() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let text = TextMesh::build(Arc::clone(&device), atlas(&device), "Hello").unwrap();

    assert_eq!(text.mesh().vertex_count(), 20);
    assert_eq!(text.mesh().index_count(), 30);
    assert!(text.mesh().data().normals.is_empty());
    assert_eq!(text.text(), "Hello");
}

#[test]
fn test_quad_corners_and_pen_advance() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let text = TextMesh::build(Arc::clone(&device), atlas(&device), "iA").unwrap();

    // 'i' is 2 wide, 'A' starts at pen x 2
    assert_eq!(vertex(&text, 0), [0.0, 0.0, 0.0]);
    assert_eq!(vertex(&text, 1), [0.0, 10.0, 0.0]);
    assert_eq!(vertex(&text, 2), [2.0, 10.0, 0.0]);
    assert_eq!(vertex(&text, 3), [2.0, 0.0, 0.0]);
    assert_eq!(vertex(&text, 4), [2.0, 0.0, 0.0]);
    assert_eq!(vertex(&text, 6), [6.0, 10.0, 0.0]);
}

#[test]
fn test_uvs_span_glyph_cell() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let atlas = atlas(&device);
    let text = TextMesh::build(Arc::clone(&device), Arc::clone(&atlas), "A").unwrap();

    let info = atlas.char_info('A').unwrap();
    let w = atlas.width() as f32;
    let u0 = info.start_x as f32 / w;
    let u1 = (info.start_x + info.width) as f32 / w;
    assert_eq!(text.mesh().data().uvs, vec![u0, 0.0, u0, 1.0, u1, 1.0, u1, 0.0]);
}

#[test]
fn test_index_winding() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let text = TextMesh::build(Arc::clone(&device), atlas(&device), "ab").unwrap();

    assert_eq!(text.mesh().data().indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
}

#[test]
fn test_material_samples_atlas_texture() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let atlas = atlas(&device);
    let text = TextMesh::build(Arc::clone(&device), Arc::clone(&atlas), "x").unwrap();

    let texture = text.mesh().material().texture().unwrap();
    assert!(Arc::ptr_eq(texture, atlas.texture()));
    assert!(Arc::ptr_eq(text.atlas(), &atlas));
}

#[test]
fn test_empty_text_has_no_geometry() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let text = TextMesh::build(Arc::clone(&device), atlas(&device), "").unwrap();

    assert_eq!(text.mesh().vertex_count(), 0);
    assert_eq!(text.mesh().index_count(), 0);
}

// ============================================================================
// set_text
// ============================================================================

#[test]
fn test_set_text_keeps_one_buffer_set_live() {
    let (device, mock) = MockGraphicsDevice::shared();
    let mut text = TextMesh::build(Arc::clone(&device), atlas(&device), "one").unwrap();
    let live_after_build = mock.lock().unwrap().live_buffers();

    for word in ["two", "six", "ten", "one"] {
        text.set_text(word).unwrap();
    }

    assert_eq!(mock.lock().unwrap().live_buffers(), live_after_build);
    assert_eq!(text.text(), "one");
    assert!(!text.mesh().is_destroyed());
}

#[test]
fn test_set_text_releases_old_buffers_before_creating_new() {
    let (device, mock) = MockGraphicsDevice::shared();
    let mut text = TextMesh::build(Arc::clone(&device), atlas(&device), "abc").unwrap();
    let one_set = mock.lock().unwrap().live_buffers();
    assert!(one_set > 0);

    for word in ["def", "ghi", "abc"] {
        text.set_text(word).unwrap();
        // Two sets alive at once would push the mark to 2 * one_set
        assert_eq!(mock.lock().unwrap().peak_buffers(), one_set);
    }
}

#[test]
fn test_set_text_resizes_geometry() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let mut text = TextMesh::build(Arc::clone(&device), atlas(&device), "ab").unwrap();

    text.set_text("abcd").unwrap();

    assert_eq!(text.mesh().vertex_count(), 16);
    assert_eq!(text.mesh().index_count(), 24);
}

#[test]
fn test_unknown_glyph_leaves_mesh_intact() {
    let (device, mock) = MockGraphicsDevice::shared();
    let mut text = TextMesh::build(Arc::clone(&device), atlas(&device), "ok").unwrap();
    let live = mock.lock().unwrap().live_buffers();

    let result = text.set_text("café");

    assert!(matches!(result, Err(Error::GlyphNotFound('é'))));
    assert_eq!(text.text(), "ok");
    assert_eq!(text.mesh().vertex_count(), 8);
    assert!(!text.mesh().is_destroyed());
    assert_eq!(mock.lock().unwrap().live_buffers(), live);
}

#[test]
fn test_build_with_unknown_glyph_fails() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let result = TextMesh::build(Arc::clone(&device), atlas(&device), "€");
    assert!(matches!(result, Err(Error::GlyphNotFound('€'))));
}
