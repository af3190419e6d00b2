//! Placement rules for the banner and frame decorations.
//!
//! Everything here is pure arithmetic over the image size, so it can be checked without
//! rasterizing anything.

use crate::foundation::core::{ImageSize, Point, Rect};
use crate::foundation::error::{PicframeError, PicframeResult};

/// Caption drawn inside the banner band.
pub const CAPTION_TEXT: &str = "רונן בר וגלי מיארה שלטון צללים";

/// Minimum banner band height in pixels.
pub const BANNER_MIN_HEIGHT_PX: f64 = 60.0;
/// Banner band height as a fraction of image height.
pub const BANNER_HEIGHT_RATIO: f64 = 0.15;
/// Opacity of the black banner band.
pub const BANNER_OPACITY: f32 = 0.7;
/// Initial caption font size as a fraction of band height.
pub const CAPTION_FONT_RATIO: f64 = 0.4;
/// Caption must fit inside this fraction of image width.
pub const CAPTION_MAX_WIDTH_RATIO: f64 = 0.9;
/// The shrink loop never steps below this size.
pub const CAPTION_MIN_FONT_PX: f32 = 12.0;

/// Frame strip thickness as a fraction of image width.
pub const FRAME_WIDTH_RATIO: f64 = 0.05;

/// Opacity of the overlay asset.
pub const OVERLAY_OPACITY: f32 = 0.3;

/// `max(60, 0.15 * h)`.
pub fn banner_height(image_height: f64) -> f64 {
    (image_height * BANNER_HEIGHT_RATIO).max(BANNER_MIN_HEIGHT_PX)
}

/// Full-width band covering the bottom `banner_height` rows.
///
/// On images shorter than the minimum band the rectangle starts above the top edge; the
/// rasterizer clips it.
pub fn banner_band(size: ImageSize) -> Rect {
    let h = size.height_f64();
    let band = banner_height(h);
    Rect::new(0.0, h - band, size.width_f64(), h)
}

/// `0.05 * w`.
pub fn frame_width(image_width: f64) -> f64 {
    image_width * FRAME_WIDTH_RATIO
}

/// Border strips in paint order: top, bottom, left, right.
pub fn frame_strips(size: ImageSize) -> [Rect; 4] {
    let w = size.width_f64();
    let h = size.height_f64();
    let fw = frame_width(w);
    [
        Rect::new(0.0, 0.0, w, fw),
        Rect::new(0.0, h - fw, w, h),
        Rect::new(0.0, 0.0, fw, h),
        Rect::new(w - fw, 0.0, w, h),
    ]
}

/// Text width oracle used by the caption fit loop.
///
/// Exact widths depend on the font backend, so the loop is written against this seam.
pub trait TextMeasure {
    /// Advance width of `text` laid out on one line at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> PicframeResult<f32>;
}

/// Outcome of fitting the caption into the banner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontFit {
    /// Font size the caption is drawn at.
    pub size_px: f32,
    /// Measured width at `size_px`.
    pub width_px: f32,
    /// `false` when the floor was reached and the caption still overflows.
    pub fits: bool,
}

/// Shrink `initial_px` in 1px steps until `text` fits `max_width_px` or the size reaches the
/// 12px floor, whichever happens first.
///
/// The size only ever decreases, so the result is deterministic for a given measurer.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    initial_px: f32,
    max_width_px: f32,
) -> PicframeResult<FontFit> {
    if !initial_px.is_finite() || initial_px <= 0.0 {
        return Err(PicframeError::validation(
            "caption font size must be finite and > 0",
        ));
    }

    let mut size_px = initial_px;
    let mut width_px = measure.measure(text, size_px)?;
    while width_px > max_width_px && size_px > CAPTION_MIN_FONT_PX {
        size_px -= 1.0;
        width_px = measure.measure(text, size_px)?;
    }

    Ok(FontFit {
        size_px,
        width_px,
        fits: width_px <= max_width_px,
    })
}

/// Resolved banner placement for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BannerPlan {
    /// Band rectangle in image space.
    pub band: Rect,
    /// Caption sizing, `None` when no text backend is available.
    pub font: Option<FontFit>,
}

impl BannerPlan {
    /// Plan the banner for `size`, fitting the caption with `measure` when given.
    pub fn new(size: ImageSize, measure: Option<&mut dyn TextMeasure>) -> PicframeResult<Self> {
        let band = banner_band(size);
        let font = match measure {
            Some(m) => Some(fit_font_size(
                m,
                CAPTION_TEXT,
                (band.height() * CAPTION_FONT_RATIO) as f32,
                (size.width_f64() * CAPTION_MAX_WIDTH_RATIO) as f32,
            )?),
            None => None,
        };
        Ok(Self { band, font })
    }

    /// Band center; the caption is centered on this point in both axes.
    pub fn caption_center(&self) -> Point {
        self.band.center()
    }

    /// Top-left origin for a laid-out caption of `text_w` x `text_h`.
    ///
    /// Overflowing captions get a negative x and spill past both edges symmetrically.
    pub fn caption_origin(&self, text_w: f64, text_h: f64) -> Point {
        let c = self.caption_center();
        Point::new(c.x - text_w / 2.0, c.y - text_h / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decor/geometry.rs"]
mod tests;
