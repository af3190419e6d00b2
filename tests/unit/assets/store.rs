use super::*;

#[test]
fn source_image_rejects_wrong_buffer_len() {
    assert!(SourceImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_premul_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn source_image_premultiplies_straight_input() {
    let img = SourceImage::from_straight_rgba8(1, 1, vec![200, 100, 50, 0]).unwrap();
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(1, 0), None);
}

#[test]
fn text_layout_smoke_with_system_font_if_present() {
    let Some(font) = crate::assets::font::CaptionFont::resolve(None) else {
        return;
    };

    let mut engine = TextLayoutEngine::with_font(font.bytes()).unwrap();
    assert!(!engine.family_name().is_empty());

    let small = engine
        .layout_line("hello", 12.0, TextBrushRgba8::WHITE)
        .unwrap();
    let large = engine
        .layout_line("hello", 48.0, TextBrushRgba8::WHITE)
        .unwrap();
    assert!(small.width() > 0.0);
    assert!(large.width() > small.width());
    assert!(engine.layout_line("hello", 0.0, TextBrushRgba8::WHITE).is_err());
}

#[test]
fn text_engine_rejects_non_font_bytes() {
    assert!(TextLayoutEngine::with_font(b"not a font").is_err());
}
