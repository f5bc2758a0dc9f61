use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::core::Canvas;

/// A fully composed animation frame (straight RGBA8, opaque in practice).
///
/// Frames are immutable once built. Repeated frames (the landing pause) share one raster.
#[derive(Clone, Debug)]
pub struct Frame {
    image: Arc<RgbaImage>,
}

impl Frame {
    /// Freeze a composed raster into a frame.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Borrow the pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Owned copy of the pixels, for building a new frame on top of this one.
    pub fn to_image(&self) -> RgbaImage {
        self.image.as_ref().clone()
    }

    /// `true` when both frames share the same raster allocation.
    pub fn shares_raster_with(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
