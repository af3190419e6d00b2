use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{PicframeError, PicframeResult};

/// Bold fonts with Hebrew coverage commonly found on desktop systems, tried in order.
const SYSTEM_BOLD_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Font file used to measure and draw the banner caption.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    bytes: Arc<Vec<u8>>,
    origin: PathBuf,
}

impl CaptionFont {
    /// Read a font file from disk.
    pub fn load(path: impl AsRef<Path>) -> PicframeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read caption font '{}'", path.display()))?;
        Self::from_bytes(bytes, path)
    }

    /// Wrap in-memory font bytes. `origin` is only used for diagnostics.
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<PathBuf>) -> PicframeResult<Self> {
        if bytes.is_empty() {
            return Err(PicframeError::validation("caption font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            origin: origin.into(),
        })
    }

    /// Resolve a caption font: `explicit` first, then the well-known system locations.
    ///
    /// Never fails; a missing font only disables caption text.
    pub fn resolve(explicit: Option<&Path>) -> Option<Self> {
        if let Some(path) = explicit {
            match Self::load(path) {
                Ok(font) => return Some(font),
                Err(e) => tracing::warn!(error = %e, "configured caption font unusable"),
            }
        }

        let found = SYSTEM_BOLD_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .find_map(|p| Self::load(p).ok());
        match &found {
            Some(font) => tracing::debug!(path = %font.origin.display(), "caption font resolved"),
            None => tracing::warn!("no caption font found; banner text will be skipped"),
        }
        found
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Where the font was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}
