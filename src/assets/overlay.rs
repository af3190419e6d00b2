use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::decode::decode_image;
use crate::assets::store::SourceImage;
use crate::foundation::core::ImageSize;
use crate::foundation::error::{PicframeError, PicframeResult};

/// Well-known location of the overlay graphic, relative to the working directory.
pub const DEFAULT_OVERLAY_PATH: &str = "eye.jpg";

/// Secondary image blended over the whole picture in overlay mode.
#[derive(Clone, Debug)]
pub struct OverlayAsset {
    image: SourceImage,
}

impl OverlayAsset {
    /// Wrap an already decoded image.
    pub fn new(image: SourceImage) -> Self {
        Self { image }
    }

    /// Read and decode the overlay from disk.
    pub fn load(path: impl AsRef<Path>) -> PicframeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read overlay asset '{}'", path.display()))?;
        let image = decode_image(&bytes).map_err(|e| {
            PicframeError::decode(format!("overlay asset '{}': {e}", path.display()))
        })?;
        Ok(Self { image })
    }

    /// Like [`OverlayAsset::load`], but a missing or broken asset only yields `None`.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        match Self::load(&path) {
            Ok(asset) => {
                tracing::debug!(
                    path = %path.display(),
                    width = asset.image.width(),
                    height = asset.image.height(),
                    "overlay asset loaded"
                );
                Some(asset)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "overlay asset unavailable");
                None
            }
        }
    }

    /// The decoded overlay.
    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    /// Premultiplied RGBA8 pixels stretched to exactly `size`.
    ///
    /// Same-size overlays are returned untouched; others are resampled with a triangle filter.
    pub(crate) fn scaled_to(&self, size: ImageSize) -> PicframeResult<Vec<u8>> {
        if self.image.size() == size {
            return Ok(self.image.rgba8_premul().to_vec());
        }
        let src = image::RgbaImage::from_raw(
            self.image.width(),
            self.image.height(),
            self.image.rgba8_premul().to_vec(),
        )
        .ok_or_else(|| PicframeError::render("overlay pixel buffer size mismatch"))?;
        let scaled = image::imageops::resize(
            &src,
            size.width,
            size.height,
            image::imageops::FilterType::Triangle,
        );
        Ok(scaled.into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/overlay.rs"]
mod tests;
