use std::io::Cursor;

use super::*;
use crate::foundation::error::PicframeError;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn session(overlay: Option<OverlayAsset>) -> EditorSession {
    EditorSession::with_parts(
        SessionSettings::default(),
        Compositor::without_caption(),
        overlay,
    )
}

#[test]
fn starts_in_default_mode_without_preview() {
    let mut s = session(None);
    assert_eq!(s.mode(), Some(DecorationMode::Banner));
    assert!(s.source().is_none());
    assert!(s.preview().is_none());
    assert_eq!(s.export().unwrap(), None);
    assert_eq!(s.render_preview().unwrap(), None);
}

#[test]
fn loading_a_source_renders_a_preview() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(64, 48, [10, 200, 30, 255]))
        .unwrap();
    let p = s.preview().unwrap();
    assert_eq!(p.revision(), s.revision());
    assert_eq!((p.frame().width, p.frame().height), (64, 48));
    assert!(p.to_data_url().unwrap().starts_with("data:image/png;base64,"));
}

#[test]
fn failed_load_keeps_previous_state() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(20, 10, [1, 2, 3, 255])).unwrap();
    let rev = s.revision();
    let before = s.preview().cloned();

    let err = s.load_source_bytes(b"garbage").unwrap_err();
    assert!(err.is_decode());
    assert_eq!(s.revision(), rev);
    assert_eq!(s.preview().cloned(), before);
    assert_eq!(s.source().unwrap().width(), 20);
}

#[test]
fn failed_render_leaves_source_and_mode_untouched() {
    let mut s = session(None);
    s.select_mode(Some(DecorationMode::Frame)).unwrap();
    s.load_source_bytes(&png_bytes(20, 10, [1, 2, 3, 255])).unwrap();
    let rev = s.revision();
    let before = s.preview().cloned();

    let too_wide =
        SourceImage::from_premul_rgba8(70_000, 1, [9, 9, 9, 255].repeat(70_000)).unwrap();
    let err = s.set_source(too_wide.clone()).unwrap_err();
    assert!(matches!(err, PicframeError::Validation(_)));
    assert_eq!(s.source().unwrap().width(), 20);
    assert_eq!(s.revision(), rev);
    assert_eq!(s.preview().cloned(), before);

    s.select_mode(None).unwrap();
    s.set_source(too_wide).unwrap();
    let rev = s.revision();
    assert!(s.select_mode(Some(DecorationMode::Banner)).is_err());
    assert_eq!(s.mode(), None);
    assert_eq!(s.revision(), rev);
    assert_eq!(s.preview().unwrap().revision(), rev);
}

#[test]
fn mode_switch_redraws_from_source() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(100, 80, [255, 255, 255, 255]))
        .unwrap();

    s.set_mode("frame").unwrap();
    assert_eq!(s.mode(), Some(DecorationMode::Frame));
    let framed = s.preview().unwrap().frame().clone();
    assert_eq!(framed.pixel(1, 1), Some([0, 0, 0, 255]));

    s.set_mode("overlay").unwrap();
    let plain = s.preview().unwrap().frame().clone();
    assert_eq!(plain.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(plain.data, s.source().unwrap().rgba8_premul());
}

#[test]
fn unknown_mode_passes_through() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(30, 30, [5, 6, 7, 255])).unwrap();
    s.set_mode("vignette").unwrap();
    assert_eq!(s.mode(), None);
    assert_eq!(
        s.preview().unwrap().frame().data,
        s.source().unwrap().rgba8_premul()
    );
}

#[test]
fn late_overlay_load_triggers_redraw() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(10, 10, [100, 100, 100, 255]))
        .unwrap();
    s.select_mode(Some(DecorationMode::Overlay)).unwrap();
    assert_eq!(
        s.preview().unwrap().frame().pixel(5, 5),
        Some([100, 100, 100, 255])
    );

    let eye = SourceImage::from_premul_rgba8(2, 2, [200, 200, 200, 255].repeat(4)).unwrap();
    s.set_overlay(Some(OverlayAsset::new(eye))).unwrap();
    let px = s.preview().unwrap().frame().pixel(5, 5).unwrap();
    assert!(px[0].abs_diff(130) <= 2, "{px:?}");
}

#[test]
fn stale_previews_are_dropped() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(40, 40, [50, 60, 70, 255])).unwrap();
    s.select_mode(Some(DecorationMode::Frame)).unwrap();
    let stale = s.render_preview().unwrap().unwrap();

    s.select_mode(Some(DecorationMode::Banner)).unwrap();
    let current = s.preview().cloned().unwrap();
    assert!(stale.revision() < current.revision());

    assert!(!s.offer_preview(stale));
    assert_eq!(s.preview(), Some(&current));

    let fresh = s.render_preview().unwrap().unwrap();
    assert!(s.offer_preview(fresh));
}

#[test]
fn export_matches_preview_pixels() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(120, 90, [180, 90, 45, 255]))
        .unwrap();
    for mode in DecorationMode::ALL {
        s.select_mode(Some(mode)).unwrap();
        let preview = s.preview().unwrap().frame().clone();
        let export = s.export().unwrap().unwrap();
        assert_eq!(export.file_name, "edited-image.png");

        let back = decode_image(&export.bytes).unwrap();
        assert_eq!((back.width(), back.height()), (120, 90));
        assert_eq!(back.rgba8_premul(), preview.data.as_slice(), "{mode}");
    }
}

#[test]
fn reprocessing_an_export_keeps_dimensions() {
    let mut s = session(None);
    s.load_source_bytes(&png_bytes(64, 64, [255, 255, 255, 255]))
        .unwrap();
    s.select_mode(Some(DecorationMode::Frame)).unwrap();
    let first = s.export().unwrap().unwrap();

    s.load_source_bytes(&first.bytes).unwrap();
    let second = s.export().unwrap().unwrap();
    let back = decode_image(&second.bytes).unwrap();
    assert_eq!((back.width(), back.height()), (64, 64));
    // 0.05 * 64 = 3.2: the border re-covers itself, the interior stays white.
    assert_eq!(back.pixel(32, 32), Some([255, 255, 255, 255]));
    assert_eq!(back.pixel(0, 0), Some([0, 0, 0, 255]));
}
