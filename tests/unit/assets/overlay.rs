use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> SourceImage {
    let data = px.repeat((width * height) as usize);
    SourceImage::from_premul_rgba8(width, height, data).unwrap()
}

#[test]
fn same_size_overlay_is_not_resampled() {
    let img = SourceImage::from_premul_rgba8(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let ov = OverlayAsset::new(img.clone());
    let out = ov.scaled_to(img.size()).unwrap();
    assert_eq!(out, img.rgba8_premul());
}

#[test]
fn scaled_overlay_matches_target_size() {
    let ov = OverlayAsset::new(solid(4, 4, [10, 20, 30, 255]));
    let out = ov.scaled_to(ImageSize::new(9, 3).unwrap()).unwrap();
    assert_eq!(out.len(), 9 * 3 * 4);
    for px in out.chunks_exact(4) {
        assert_eq!(px, &[10, 20, 30, 255]);
    }
}

#[test]
fn load_optional_missing_file_is_none() {
    let missing = std::path::Path::new("target/overlay_missing/does-not-exist.jpg");
    assert!(OverlayAsset::load_optional(missing).is_none());
    assert!(OverlayAsset::load(missing).is_err());
}
