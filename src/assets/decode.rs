use base64::Engine as _;

use crate::assets::store::SourceImage;
use crate::foundation::error::{PicframeError, PicframeResult};

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PicframeResult<SourceImage> {
    if bytes.is_empty() {
        return Err(PicframeError::decode("image bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PicframeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PicframeError::decode(format!(
            "decoded image has no pixels ({width}x{height})"
        )));
    }

    SourceImage::from_straight_rgba8(width, height, rgba.into_raw())
        .map_err(|e| PicframeError::decode(e.to_string()))
}

/// Decode a `data:image/...;base64,...` URL, as produced by browser file readers.
pub fn decode_data_url(url: &str) -> PicframeResult<SourceImage> {
    let bytes = data_url_payload(url)?;
    decode_image(&bytes)
}

/// Return `true` for MIME types the decoder should be offered.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

fn data_url_payload(url: &str) -> PicframeResult<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PicframeError::decode("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PicframeError::decode("data URL has no payload separator"))?;

    let mut parts = meta.split(';');
    let mime = parts.next().unwrap_or_default();
    if !is_image_mime(mime) {
        return Err(PicframeError::decode(format!(
            "data URL media type '{mime}' is not an image"
        )));
    }
    if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(PicframeError::decode(
            "only base64-encoded data URLs are supported",
        ));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| PicframeError::decode(format!("data URL base64 payload: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
