/// Tests for GlyphAtlas
///
/// Uses FixedWidthFont so that widths and pixels are predictable.

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::text::test_font::FixedWidthFont;

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_ascii_atlas_size() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let font = FixedWidthFont::new(8, 16);

    let atlas = GlyphAtlas::build(&device, &font, "US-ASCII").unwrap();

    assert_eq!(atlas.width(), 128 * 8);
    assert_eq!(atlas.height(), 16);
    assert_eq!(atlas.glyph_count(), 128);
    assert_eq!(atlas.charset().name(), "US-ASCII");
}

#[test]
fn test_width_is_sum_of_advances() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let font = FixedWidthFont::new(6, 10).with_width('A', 11).with_width('i', 2);

    let atlas = GlyphAtlas::build(&device, &font, "ISO-8859-1").unwrap();

    assert_eq!(atlas.width(), 254 * 6 + 11 + 2);
    assert_eq!(atlas.glyph_count(), 256);
}

#[test]
fn test_start_x_is_running_width() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let font = FixedWidthFont::new(4, 8).with_width('A', 10);

    let atlas = GlyphAtlas::build(&device, &font, "ASCII").unwrap();

    assert_eq!(atlas.char_info('\0').unwrap(), GlyphInfo { start_x: 0, width: 4 });
    assert_eq!(atlas.char_info('A').unwrap(), GlyphInfo { start_x: 65 * 4, width: 10 });
    assert_eq!(atlas.char_info('B').unwrap(), GlyphInfo { start_x: 65 * 4 + 10, width: 4 });

    let mut expected = 0;
    for c in CharacterSet::US_ASCII.chars() {
        let info = atlas.char_info(c).unwrap();
        assert_eq!(info.start_x, expected);
        expected += info.width;
    }
    assert_eq!(expected, atlas.width());
}

// ============================================================================
// Lookup and errors
// ============================================================================

#[test]
fn test_char_outside_set_is_glyph_not_found() {
    let (device, _mock) = MockGraphicsDevice::shared();
    let atlas = GlyphAtlas::build(&device, &FixedWidthFont::new(4, 8), "US-ASCII").unwrap();

    assert!(matches!(atlas.char_info('é'), Err(Error::GlyphNotFound('é'))));
}

#[test]
fn test_unknown_charset_is_invalid_argument() {
    let (device, mock) = MockGraphicsDevice::shared();

    let result = GlyphAtlas::build(&device, &FixedWidthFont::new(4, 8), "KOI8-R");

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(mock.lock().unwrap().created_textures.is_empty());
}

#[test]
fn test_zero_sized_atlas_is_invalid_resource() {
    let (device, _mock) = MockGraphicsDevice::shared();

    let zero_width = GlyphAtlas::build(&device, &FixedWidthFont::new(0, 8), "US-ASCII");
    let zero_height = GlyphAtlas::build(&device, &FixedWidthFont::new(4, 0), "US-ASCII");

    assert!(matches!(zero_width, Err(Error::InvalidResource(_))));
    assert!(matches!(zero_height, Err(Error::InvalidResource(_))));
}

// ============================================================================
// Texture
// ============================================================================

#[test]
fn test_single_texture_upload_with_drawn_glyphs() {
    let (device, mock) = MockGraphicsDevice::shared();
    let font = FixedWidthFont::new(4, 8);

    let atlas = GlyphAtlas::build(&device, &font, "US-ASCII").unwrap();

    let mock = mock.lock().unwrap();
    assert_eq!(mock.created_textures.len(), 1);
    let desc = &mock.created_textures[0];
    assert_eq!((desc.width, desc.height), (atlas.width(), atlas.height()));
    assert_eq!(atlas.texture().width(), atlas.width());

    let pixels = desc.data.as_ref().unwrap();
    let alpha_at = |x: u32, y: u32| pixels[((y * desc.width + x) * 4 + 3) as usize];

    // 'A' is drawn above the baseline (ascent 6), space stays empty
    let a = atlas.char_info('A').unwrap();
    assert_eq!(alpha_at(a.start_x, 0), 255);
    assert_eq!(alpha_at(a.start_x + 3, 5), 255);
    assert_eq!(alpha_at(a.start_x, 7), 0);
    let space = atlas.char_info(' ').unwrap();
    assert_eq!(alpha_at(space.start_x, 0), 0);
}
