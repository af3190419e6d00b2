use crate::assets::decode::{decode_data_url, decode_image};
use crate::assets::font::CaptionFont;
use crate::assets::overlay::OverlayAsset;
use crate::assets::store::SourceImage;
use crate::decor::mode::DecorationMode;
use crate::encode::png::{ExportedPng, encode_png, png_data_url};
use crate::foundation::error::PicframeResult;
use crate::render::backend::Composited;
use crate::render::cpu::Compositor;
use crate::session::settings::SessionSettings;

/// A composited picture tagged with the session revision that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    revision: u64,
    frame: Composited,
}

impl Preview {
    /// Session revision the preview was rendered for.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Rendered pixels.
    pub fn frame(&self) -> &Composited {
        &self.frame
    }

    /// Preview as a `data:image/png;base64,...` URL for display surfaces.
    pub fn to_data_url(&self) -> PicframeResult<String> {
        png_data_url(&self.frame)
    }
}

enum Change {
    Source(SourceImage),
    Mode(Option<DecorationMode>),
    Overlay(Option<OverlayAsset>),
}

/// Holds the current picture, mode and overlay, and keeps a preview in sync with them.
///
/// Every change bumps the revision and redraws the preview from the source. A change whose
/// render fails is not applied: state, revision and displayed preview stay as they were. Exports
/// use the same [`Compositor`] as previews, so both are pixel-identical for the same state.
pub struct EditorSession {
    settings: SessionSettings,
    compositor: Compositor,
    source: Option<SourceImage>,
    mode: Option<DecorationMode>,
    overlay: Option<OverlayAsset>,
    revision: u64,
    preview: Option<Preview>,
}

impl EditorSession {
    /// Construct a session, resolving the caption font and the overlay asset from `settings`.
    ///
    /// Neither asset is required: a missing font drops the caption text, a missing overlay turns
    /// overlay mode into a pass-through.
    pub fn new(settings: SessionSettings) -> PicframeResult<Self> {
        settings.validate()?;
        let font = CaptionFont::resolve(settings.font_path.as_deref());
        let compositor = Compositor::new(font)?;
        let overlay = settings
            .overlay_path
            .as_deref()
            .and_then(OverlayAsset::load_optional);
        Ok(Self::with_parts(settings, compositor, overlay))
    }

    /// Construct a session from already prepared parts, without touching the filesystem.
    pub fn with_parts(
        settings: SessionSettings,
        compositor: Compositor,
        overlay: Option<OverlayAsset>,
    ) -> Self {
        let mode = Some(settings.default_mode);
        Self {
            settings,
            compositor,
            source: None,
            mode,
            overlay,
            revision: 0,
            preview: None,
        }
    }

    /// Active decoration, `None` after an unrecognized selection.
    pub fn mode(&self) -> Option<DecorationMode> {
        self.mode
    }

    /// Current source picture.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Loaded overlay asset.
    pub fn overlay(&self) -> Option<&OverlayAsset> {
        self.overlay.as_ref()
    }

    /// Monotonic counter bumped by every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Most recently accepted preview.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Decode `bytes` and make them the new source.
    ///
    /// Undecodable input returns the decode error and leaves the session untouched.
    pub fn load_source_bytes(&mut self, bytes: &[u8]) -> PicframeResult<()> {
        let image = decode_image(bytes)?;
        self.set_source(image)
    }

    /// Decode a `data:image/...;base64,...` URL and make it the new source.
    pub fn load_source_data_url(&mut self, url: &str) -> PicframeResult<()> {
        let image = decode_data_url(url)?;
        self.set_source(image)
    }

    /// Replace the source picture and redraw. On a render error the previous source stays.
    pub fn set_source(&mut self, image: SourceImage) -> PicframeResult<()> {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "source image replaced"
        );
        self.apply(Change::Source(image))
    }

    /// Select a mode by identifier (`banner`, `frame`, `overlay`) and redraw.
    ///
    /// Unknown identifiers select "no decoration".
    pub fn set_mode(&mut self, id: &str) -> PicframeResult<()> {
        self.select_mode(DecorationMode::parse_lenient(id))
    }

    /// Select a mode and redraw.
    pub fn select_mode(&mut self, mode: Option<DecorationMode>) -> PicframeResult<()> {
        self.apply(Change::Mode(mode))
    }

    /// Install or remove the overlay asset and redraw.
    pub fn set_overlay(&mut self, overlay: Option<OverlayAsset>) -> PicframeResult<()> {
        self.apply(Change::Overlay(overlay))
    }

    /// Render the current state without committing it as the displayed preview.
    ///
    /// Returns `None` when no source is loaded.
    pub fn render_preview(&mut self) -> PicframeResult<Option<Preview>> {
        let Some(frame) = self.render()? else {
            return Ok(None);
        };
        Ok(Some(Preview {
            revision: self.revision,
            frame,
        }))
    }

    /// Offer a rendered preview for display. Previews older than the displayed one are dropped.
    ///
    /// Returns `true` when the preview was accepted.
    pub fn offer_preview(&mut self, preview: Preview) -> bool {
        if let Some(current) = &self.preview
            && preview.revision < current.revision
        {
            tracing::debug!(
                stale = preview.revision,
                current = current.revision,
                "dropping stale preview"
            );
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// Redraw the current state at full resolution and encode it for saving.
    ///
    /// Returns `None` when no source is loaded.
    #[tracing::instrument(skip(self), fields(revision = self.revision))]
    pub fn export(&mut self) -> PicframeResult<Option<ExportedPng>> {
        let Some(frame) = self.render()? else {
            return Ok(None);
        };
        let bytes = encode_png(&frame)?;
        tracing::debug!(bytes = bytes.len(), "export encoded");
        Ok(Some(ExportedPng {
            file_name: self.settings.export_file_name.clone(),
            bytes,
        }))
    }

    fn render(&mut self) -> PicframeResult<Option<Composited>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };
        let frame = self
            .compositor
            .composite(source, self.mode, self.overlay.as_ref())?;
        Ok(Some(frame))
    }

    /// Render with `change` applied and commit it only when rendering succeeds.
    fn apply(&mut self, change: Change) -> PicframeResult<()> {
        let source = match &change {
            Change::Source(image) => Some(image),
            _ => self.source.as_ref(),
        };
        let mode = match &change {
            Change::Mode(mode) => *mode,
            _ => self.mode,
        };
        let overlay = match &change {
            Change::Overlay(overlay) => overlay.as_ref(),
            _ => self.overlay.as_ref(),
        };
        let frame = source
            .map(|source| self.compositor.composite(source, mode, overlay))
            .transpose()?;

        match change {
            Change::Source(image) => self.source = Some(image),
            Change::Mode(mode) => self.mode = mode,
            Change::Overlay(overlay) => self.overlay = overlay,
        }
        self.revision += 1;
        if let Some(frame) = frame {
            self.offer_preview(Preview {
                revision: self.revision,
                frame,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
