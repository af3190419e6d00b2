//! picframe decorates a picture with one of three fixed treatments and exports it as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `bytes | data URL -> SourceImage` (premultiplied RGBA8), failing with
//!    [`PicframeError::Decode`] on unreadable input
//! 2. **Composite**: `SourceImage + DecorationMode + Option<OverlayAsset> -> Composited`
//! 3. **Encode**: `Composited -> PNG bytes` (or a `data:image/png;base64,` preview URL)
//!
//! The decorations are:
//!
//! - **Banner**: a 70% black band along the bottom, `max(60, 0.15 * h)` tall, with a bold
//!   right-to-left caption shrunk in 1px steps until it fits 90% of the width (12px floor).
//! - **Frame**: opaque black strips `0.05 * w` thick on all four edges.
//! - **Overlay**: the overlay asset stretched over the picture at 30% opacity; a pass-through
//!   while the asset is unavailable.
//!
//! [`EditorSession`] wraps the pipeline with the state a front end needs: it redraws the preview
//! on every change, drops stale previews, and exports through the same [`Compositor`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod decor;
mod encode;
mod foundation;
mod render;
mod session;

pub use crate::assets::decode::{decode_data_url, decode_image, is_image_mime};
pub use crate::assets::font::CaptionFont;
pub use crate::assets::overlay::{DEFAULT_OVERLAY_PATH, OverlayAsset};
pub use crate::assets::store::SourceImage;
pub use crate::decor::geometry::{
    BANNER_HEIGHT_RATIO, BANNER_MIN_HEIGHT_PX, BANNER_OPACITY, BannerPlan, CAPTION_FONT_RATIO,
    CAPTION_MAX_WIDTH_RATIO, CAPTION_MIN_FONT_PX, CAPTION_TEXT, FRAME_WIDTH_RATIO, FontFit,
    OVERLAY_OPACITY, TextMeasure, banner_band, banner_height, fit_font_size, frame_strips,
    frame_width,
};
pub use crate::decor::mode::DecorationMode;
pub use crate::encode::png::{DEFAULT_EXPORT_FILE_NAME, ExportedPng, encode_png, png_data_url};
pub use crate::foundation::core::{ImageSize, Point, Rect};
pub use crate::foundation::error::{PicframeError, PicframeResult};
pub use crate::render::backend::Composited;
pub use crate::render::cpu::Compositor;
pub use crate::session::editor::{EditorSession, Preview};
pub use crate::session::settings::SessionSettings;
