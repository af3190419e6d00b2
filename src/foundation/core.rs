use crate::foundation::error::{PicframeError, PicframeResult};

pub use kurbo::{Point, Rect};

/// Image dimensions in pixels. Both edges are always non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Create a validated size with positive width and height.
    pub fn new(width: u32, height: u32) -> PicframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PicframeError::validation(format!(
                "image size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Width as `f64`, for geometry.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`, for geometry.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Full-image rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
