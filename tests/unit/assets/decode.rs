use std::io::Cursor;

use base64::Engine as _;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let src = decode_image(&buf).unwrap();
    assert_eq!(src.width(), 1);
    assert_eq!(src.height(), 1);
    assert_eq!(
        src.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage_and_empty() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.is_decode());
    assert!(decode_image(&[]).unwrap_err().is_decode());
}

#[test]
fn data_url_round_trip() {
    let buf = png_bytes(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    let url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buf)
    );

    let src = decode_data_url(&url).unwrap();
    assert_eq!((src.width(), src.height()), (2, 1));
    assert_eq!(src.pixel(1, 0), Some([0, 0, 255, 255]));
}

#[test]
fn data_url_rejections_are_decode_errors() {
    for bad in [
        "image/png;base64,AAAA",
        "data:image/png;base64",
        "data:text/plain;base64,aGVsbG8=",
        "data:image/png,rawbytes",
        "data:image/png;base64,!!!not-base64!!!",
    ] {
        let err = decode_data_url(bad).unwrap_err();
        assert!(err.is_decode(), "{bad}: {err}");
    }
}

#[test]
fn image_mime_check() {
    assert!(is_image_mime("image/jpeg"));
    assert!(is_image_mime(" IMAGE/PNG "));
    assert!(!is_image_mime("application/pdf"));
    assert!(!is_image_mime(""));
}
