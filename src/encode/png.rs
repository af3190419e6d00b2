use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::error::{PicframeError, PicframeResult};
use crate::render::backend::Composited;

/// Suggested file name for exported pictures.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "edited-image.png";

/// PNG bytes ready for a "save as" action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedPng {
    /// Suggested file name.
    pub file_name: String,
    /// Encoded PNG stream.
    pub bytes: Vec<u8>,
}

/// Encode a composited picture as PNG (straight alpha).
pub fn encode_png(frame: &Composited) -> PicframeResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| PicframeError::encode("invalid rgba buffer size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PicframeError::encode(format!("write png: {e}")))?;
    Ok(buf)
}

/// Encode a composited picture as a `data:image/png;base64,...` URL.
pub fn png_data_url(frame: &Composited) -> PicframeResult<String> {
    let png = encode_png(frame)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
