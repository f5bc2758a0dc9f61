use crate::foundation::error::{UnboxError, UnboxResult};

pub use kurbo::{Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> UnboxResult<Self> {
        if width == 0 || height == 0 {
            return Err(UnboxError::validation(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Horizontal center in pixel space (integer division, like the frame layout uses).
    pub fn center_x(self) -> f64 {
        f64::from(self.width / 2)
    }

    /// Vertical center in pixel space.
    pub fn center_y(self) -> f64 {
        f64::from(self.height / 2)
    }

    /// Number of RGBA8 bytes in one frame of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque RGBA pixel for this color.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }

    /// Offset every channel by the matching delta, clamping to `[0, 255]`.
    pub fn offset_clamped(self, dr: i32, dg: i32, db: i32) -> Self {
        fn ch(c: u8, d: i32) -> u8 {
            (i32::from(c) + d).clamp(0, 255) as u8
        }

        Self {
            r: ch(self.r, dr),
            g: ch(self.g, dg),
            b: ch(self.b, db),
        }
    }

    /// `#rrggbb` form, as used in SVG paint attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
