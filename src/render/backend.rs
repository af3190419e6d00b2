use crate::foundation::core::ImageSize;
use crate::render::blend::unpremultiply_rgba8_in_place;

/// A composited picture as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, matching [`crate::SourceImage`]. Use
/// [`Composited::to_straight_rgba8`] at encode boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composited {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Composited {
    /// Pixel dimensions.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with alpha un-premultiplied.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        straight
    }
}
